//! Persisted session snapshot access

use crate::{AuthResult, KeyValueStore, SessionSnapshot, SESSION_STORAGE_KEY};

/// Source of the last persisted session, consulted when no live state exists
pub trait SessionLoader {
    fn load(&self) -> Option<SessionSnapshot>;
}

impl<F> SessionLoader for F
where
    F: Fn() -> Option<SessionSnapshot>,
{
    fn load(&self) -> Option<SessionSnapshot> {
        self()
    }
}

/// Snapshot stored as JSON in a [`KeyValueStore`]
#[derive(Debug)]
pub struct PersistedSession<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistedSession<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, SESSION_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save(&self, snapshot: &SessionSnapshot) -> AuthResult<()> {
        let json = serde_json::to_string(snapshot)?;
        self.store.set(&self.key, &json)
    }

    pub fn clear(&self) -> AuthResult<()> {
        self.store.remove(&self.key)
    }

    /// Read and parse the snapshot, surfacing storage and parse errors
    pub fn read(&self) -> AuthResult<Option<SessionSnapshot>> {
        match self.store.get(&self.key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

impl<S: KeyValueStore> SessionLoader for PersistedSession<S> {
    /// Unreadable or malformed snapshots count as no session
    fn load(&self) -> Option<SessionSnapshot> {
        match self.read() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("Ignoring session snapshot under {:?}: {}", self.key, e);
                None
            }
        }
    }
}
