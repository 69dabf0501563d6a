use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::contract::{
    client::ProfileApi,
    error::ClientError,
    model::{Profile, ProfilePayload, ProfileUpdate},
};
use crate::domain::error::DomainError;
use crate::domain::ports::SessionStore;
use crate::infra::http::{endpoint, read_json, rejection, transport};
use modkit::TracedClient;

pub const LOAD_FALLBACK: &str = "Failed to load profile";
pub const UPDATE_FALLBACK: &str = "Failed to update profile";

/// HTTP adapter for `/user/*`, authenticated with the stored bearer token.
pub struct HttpProfileClient {
    client: TracedClient,
    base: Url,
    session: Arc<dyn SessionStore>,
}

impl HttpProfileClient {
    pub fn new(client: TracedClient, base: Url, session: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            base,
            session,
        }
    }

    /// Fails before any request goes out when no token is stored.
    fn bearer(&self) -> Result<String, ClientError> {
        match self.session.token() {
            Ok(Some(token)) => Ok(token),
            Ok(None) => Err(ClientError::NotAuthenticated),
            Err(e) => {
                warn!(error = %e, "failed to read session token");
                Err(DomainError::session(e.to_string()).into())
            }
        }
    }
}

#[async_trait]
impl ProfileApi for HttpProfileClient {
    #[instrument(name = "ethica.http.profile.get", skip_all, fields(base = %self.base))]
    async fn get_profile(&self) -> Result<ProfilePayload, ClientError> {
        let token = self.bearer()?;
        let url = endpoint(&self.base, &["user", "getUserProfile"])?;
        let response = self
            .client
            .send_json::<()>(Method::GET, url.as_str(), Some(&token), None)
            .await
            .map_err(transport)?;

        let (status, body) = read_json(response).await;
        if !status.is_success() {
            return Err(rejection(status, &body, LOAD_FALLBACK));
        }
        debug!("profile payload received");
        serde_json::from_value(body)
            .map_err(|e| ClientError::invalid_payload(format!("profile response: {e}")))
    }

    #[instrument(
        name = "ethica.http.profile.update",
        skip_all,
        fields(base = %self.base, profile_id = %id)
    )]
    async fn update_profile(
        &self,
        id: &str,
        update: &ProfileUpdate,
    ) -> Result<Profile, ClientError> {
        let token = self.bearer()?;
        let url = endpoint(&self.base, &["user", "updateUserProfile", id])?;
        let response = self
            .client
            .send_json(Method::PUT, url.as_str(), Some(&token), Some(update))
            .await
            .map_err(transport)?;

        let (status, body) = read_json(response).await;
        if !status.is_success() {
            return Err(rejection(status, &body, UPDATE_FALLBACK));
        }
        serde_json::from_value(body)
            .map_err(|e| ClientError::invalid_payload(format!("update response: {e}")))
    }
}
