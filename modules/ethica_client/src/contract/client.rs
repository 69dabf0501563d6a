use async_trait::async_trait;
use modkit::{Page, PageRequest};

use crate::contract::{
    error::ClientError,
    model::{AuthSession, LoginRequest, Profile, ProfilePayload, ProfileUpdate, SignupRequest},
};

/// Account endpoints. Implementations persist the session after a successful login.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Create an account; the success body is returned untouched.
    async fn signup(&self, request: SignupRequest) -> Result<serde_json::Value, ClientError>;

    /// Exchange credentials for a token and user snapshot.
    async fn login(&self, request: LoginRequest) -> Result<AuthSession, ClientError>;
}

/// Profile endpoints; both require a stored token.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn get_profile(&self) -> Result<ProfilePayload, ClientError>;

    async fn update_profile(
        &self,
        id: &str,
        update: &ProfileUpdate,
    ) -> Result<Profile, ClientError>;
}

/// Paginated read-only provider of page content.
#[async_trait]
pub trait CollectionSource<T>: Send + Sync {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<T>, ClientError>;
}
