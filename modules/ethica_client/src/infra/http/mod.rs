//! HTTP adapters for the auth and profile endpoints.

pub mod auth_client;
pub mod profile_client;

pub use auth_client::HttpAuthClient;
pub use profile_client::HttpProfileClient;

use serde_json::{Map, Value};
use url::Url;

use crate::contract::error::ClientError;

/// `base` joined with `segments`, keeping any path prefix of the base.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ClientError::validation(format!("invalid API base URL: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Status and JSON body of a response. A body that is not JSON reads as `{}`.
pub(crate) async fn read_json(response: reqwest::Response) -> (reqwest::StatusCode, Value) {
    let status = response.status();
    let body = match response.bytes().await {
        Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::Object(Map::new())),
        Err(e) => {
            tracing::debug!(error = %e, "failed to read response body");
            Value::Object(Map::new())
        }
    };
    (status, body)
}

/// Server-provided `message`, or `fallback`.
pub(crate) fn server_message(body: &Value, fallback: &str) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

pub(crate) fn rejection(status: reqwest::StatusCode, body: &Value, fallback: &str) -> ClientError {
    ClientError::rejected(status.as_u16(), server_message(body, fallback))
}

pub(crate) fn transport(e: reqwest::Error) -> ClientError {
    ClientError::transport(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn endpoint_appends_segments() {
        let base = Url::parse("http://api.local").unwrap();
        let url = endpoint(&base, &["api", "auth", "login"]).unwrap();
        assert_eq!(url.as_str(), "http://api.local/api/auth/login");
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let base = Url::parse("http://api.local/v1/").unwrap();
        let url = endpoint(&base, &["user", "updateUserProfile", "a b"]).unwrap();
        assert_eq!(url.as_str(), "http://api.local/v1/user/updateUserProfile/a%20b");
    }

    #[test]
    fn endpoint_rejects_cannot_be_a_base_urls() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(endpoint(&base, &["x"]).is_err());
    }

    #[test]
    fn server_message_prefers_body() {
        assert_eq!(
            server_message(&json!({ "message": "Email taken" }), "Signup failed"),
            "Email taken"
        );
        assert_eq!(server_message(&json!({}), "Signup failed"), "Signup failed");
        assert_eq!(
            server_message(&json!({ "message": "" }), "Login failed"),
            "Login failed"
        );
        assert_eq!(
            server_message(&json!({ "message": 42 }), "Login failed"),
            "Login failed"
        );
    }
}
