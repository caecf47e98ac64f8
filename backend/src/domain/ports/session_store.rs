//! Driven port for durable key/value storage of the auth session.
//!
//! Values are opaque JSON strings; the auth gate owns their shape.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by session storage adapters.
    pub enum SessionStoreError {
        /// The backing medium could not be read or written.
        Io { message: String } => "session storage i/o failed: {message}",
        /// A stored value exists but cannot be used.
        Corrupt { message: String } => "session storage is corrupt: {message}",
    }
}

/// Port for persisting small string values under fixed keys.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn load(&self, key: &str) -> Result<Option<String>, SessionStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn save(&self, key: &str, value: &str) -> Result<(), SessionStoreError>;

    /// Remove `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), SessionStoreError>;
}

/// Process-local store; nothing survives the process. Used by tests and
/// doc examples that need a session store without touching the filesystem.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemorySessionStore {
    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, String>) -> T,
    ) -> Result<T, SessionStoreError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|err| SessionStoreError::io(err.to_string()))?;
        Ok(f(&mut guard))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        self.with_entries(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    async fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn in_memory_store_round_trips_and_removes() {
        let store = InMemorySessionStore::default();
        assert_eq!(store.load("k").await.expect("load"), None);

        store.save("k", "v1").await.expect("save");
        store.save("k", "v2").await.expect("overwrite");
        assert_eq!(store.load("k").await.expect("load").as_deref(), Some("v2"));

        store.remove("k").await.expect("remove");
        store.remove("k").await.expect("remove twice");
        assert_eq!(store.load("k").await.expect("load"), None);
    }
}
