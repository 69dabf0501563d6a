use std::path::{Path, PathBuf};

use anyhow::Context;
use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::contract::model::{AuthSession, UserSnapshot};
use crate::domain::ports::SessionStore;
use crate::infra::session::{TOKEN_KEY, USER_KEY};

/// Session persisted as a flat JSON object of string values, the same shape
/// browser local storage gives it: `{"token": "...", "user": "<json>"}`.
/// Keys other than these two are left untouched.
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> anyhow::Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read session file {}", self.path.display()))?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&raw)
            .with_context(|| format!("session file {} is not a JSON object", self.path.display()))
    }

    fn write_map(&self, map: &Map<String, Value>) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let raw = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("failed to write session file {}", self.path.display()))
    }

    fn read_key(&self, key: &str) -> anyhow::Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self
            .read_map()?
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> anyhow::Result<Option<String>> {
        self.read_key(TOKEN_KEY)
    }

    fn user(&self) -> anyhow::Result<Option<UserSnapshot>> {
        match self.read_key(USER_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .context("stored user is not valid JSON"),
            None => Ok(None),
        }
    }

    fn store(&self, session: &AuthSession) -> anyhow::Result<()> {
        let user = serde_json::to_string(&session.user)?;
        let _guard = self.lock.lock();
        let mut map = self.read_map()?;
        map.insert(TOKEN_KEY.to_string(), Value::String(session.token.clone()));
        map.insert(USER_KEY.to_string(), Value::String(user));
        self.write_map(&map)?;
        tracing::debug!(path = %self.path.display(), "session stored");
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        let _guard = self.lock.lock();
        if !self.path.exists() {
            return Ok(());
        }
        let mut map = self.read_map()?;
        map.remove(TOKEN_KEY);
        map.remove(USER_KEY);
        self.write_map(&map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session() -> AuthSession {
        serde_json::from_value(serde_json::json!({
            "token": "t0k3n",
            "user": { "_id": "u1", "name": "Ada", "email": "ada@example.com" }
        }))
        .unwrap()
    }

    #[test]
    fn empty_store_has_nothing() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.token().unwrap(), None);
        assert!(store.user().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn store_then_read_back() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/session.json"));
        store.store(&session()).unwrap();

        assert_eq!(store.token().unwrap().as_deref(), Some("t0k3n"));
        let user = store.user().unwrap().unwrap();
        assert_eq!(user.name(), Some("Ada"));

        // The user is kept as a serialized string, like local storage.
        let raw: Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert!(raw[USER_KEY].is_string());
    }

    #[test]
    fn clear_keeps_foreign_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();
        let store = FileSessionStore::new(&path);
        store.store(&session()).unwrap();
        store.clear().unwrap();

        assert_eq!(store.token().unwrap(), None);
        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!({ "theme": "dark" }));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        let store = FileSessionStore::new(&path);
        assert!(store.token().is_err());
    }
}
