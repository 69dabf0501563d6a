use crate::contract::model::{AuthSession, UserSnapshot};

/// Local storage for the bearer token and the serialized user.
///
/// Access is synchronous; implementations guard their own state.
pub trait SessionStore: Send + Sync {
    fn token(&self) -> anyhow::Result<Option<String>>;

    fn user(&self) -> anyhow::Result<Option<UserSnapshot>>;

    fn store(&self, session: &AuthSession) -> anyhow::Result<()>;

    fn clear(&self) -> anyhow::Result<()>;
}
