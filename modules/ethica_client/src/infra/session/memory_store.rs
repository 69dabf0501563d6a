use std::collections::HashMap;

use anyhow::Context;
use parking_lot::Mutex;

use crate::contract::model::{AuthSession, UserSnapshot};
use crate::domain::ports::SessionStore;
use crate::infra::session::{TOKEN_KEY, USER_KEY};

/// In-process session store.
#[derive(Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`, as if a login had happened.
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::default();
        store.values.lock().insert(TOKEN_KEY.to_string(), token.into());
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> anyhow::Result<Option<String>> {
        Ok(self.values.lock().get(TOKEN_KEY).cloned())
    }

    fn user(&self) -> anyhow::Result<Option<UserSnapshot>> {
        let raw = self.values.lock().get(USER_KEY).cloned();
        raw.map(|r| serde_json::from_str(&r).context("stored user is not valid JSON"))
            .transpose()
    }

    fn store(&self, session: &AuthSession) -> anyhow::Result<()> {
        let user = serde_json::to_string(&session.user)?;
        let mut values = self.values.lock();
        values.insert(TOKEN_KEY.to_string(), session.token.clone());
        values.insert(USER_KEY.to_string(), user);
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        let mut values = self.values.lock();
        values.remove(TOKEN_KEY);
        values.remove(USER_KEY);
        Ok(())
    }
}
