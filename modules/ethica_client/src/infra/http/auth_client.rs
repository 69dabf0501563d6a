use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::{info, instrument, warn};
use url::Url;

use crate::contract::{
    client::AuthApi,
    error::ClientError,
    model::{AuthSession, LoginRequest, SignupRequest},
};
use crate::domain::error::DomainError;
use crate::domain::ports::SessionStore;
use crate::infra::http::{endpoint, read_json, rejection, transport};
use modkit::TracedClient;

pub const SIGNUP_FALLBACK: &str = "Signup failed";
pub const LOGIN_FALLBACK: &str = "Login failed";

/// HTTP adapter for `/api/auth/*`. A successful login is written to the
/// session store before it is returned.
pub struct HttpAuthClient {
    client: TracedClient,
    base: Url,
    session: Arc<dyn SessionStore>,
}

impl HttpAuthClient {
    pub fn new(client: TracedClient, base: Url, session: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            base,
            session,
        }
    }
}

#[async_trait]
impl AuthApi for HttpAuthClient {
    #[instrument(
        name = "ethica.http.auth.signup",
        skip_all,
        fields(base = %self.base, email = %request.email)
    )]
    async fn signup(&self, request: SignupRequest) -> Result<serde_json::Value, ClientError> {
        let url = endpoint(&self.base, &["api", "auth", "signup"])?;
        let response = self
            .client
            .send_json(Method::POST, url.as_str(), None, Some(&request))
            .await
            .map_err(transport)?;

        let (status, body) = read_json(response).await;
        if !status.is_success() {
            return Err(rejection(status, &body, SIGNUP_FALLBACK));
        }
        info!("account created");
        Ok(body)
    }

    #[instrument(
        name = "ethica.http.auth.login",
        skip_all,
        fields(base = %self.base, email = %request.email)
    )]
    async fn login(&self, request: LoginRequest) -> Result<AuthSession, ClientError> {
        let url = endpoint(&self.base, &["api", "auth", "login"])?;
        let response = self
            .client
            .send_json(Method::POST, url.as_str(), None, Some(&request))
            .await
            .map_err(transport)?;

        let (status, body) = read_json(response).await;
        if !status.is_success() {
            return Err(rejection(status, &body, LOGIN_FALLBACK));
        }

        let session: AuthSession = serde_json::from_value(body)
            .map_err(|e| ClientError::invalid_payload(format!("login response: {e}")))?;
        self.session.store(&session).map_err(|e| {
            warn!(error = %e, "failed to persist session");
            DomainError::session(e.to_string())
        })?;
        info!("session stored");
        Ok(session)
    }
}
