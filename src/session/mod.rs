//! Session Store
//!
//! Holds the opaque auth token and the cached user profile between runs.
//!
//! The layout mirrors browser local storage: two string entries, `token`
//! and `user` (the profile serialized as JSON), over a pluggable
//! [`KeyValueStore`]. [`SessionStore`] is the explicit context object handed
//! to every service that needs the session.

mod file;

pub use file::FileStore;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::model::{Session, SessionToken, User};

/// Key holding the bearer token
pub const TOKEN_KEY: &str = "token";
/// Key holding the serialized user profile
pub const USER_KEY: &str = "user";

/// Errors from the persistent session backend
#[derive(Error, Debug)]
pub enum SessionError {
    /// Reading or writing the backing file failed
    #[error("Session storage I/O error at {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    /// The backing file is not a JSON object of strings
    #[error("Corrupt session file {path:?}: {error}")]
    Corrupt { path: PathBuf, error: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Minimal string key-value storage, the shape of `window.localStorage`
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// Volatile store, used for tests and one-shot runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

/// Session context: explicit load / save / clear over a key-value backend
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Session kept only in memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Session persisted to `<data_dir>/session.json`
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileStore::new(data_dir.into().join("session.json"))))
    }

    /// Current token, if one is stored and non-empty
    pub fn token(&self) -> Result<Option<SessionToken>, SessionError> {
        Ok(self
            .backend
            .get(TOKEN_KEY)?
            .filter(|t| !t.is_empty())
            .map(SessionToken::new))
    }

    /// Cached profile. An unreadable entry is treated as absent.
    pub fn user(&self) -> Result<Option<User>, SessionError> {
        let Some(raw) = self.backend.get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable cached user profile");
                Ok(None)
            }
        }
    }

    /// Full session, present whenever a token is
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        match self.token()? {
            Some(token) => Ok(Some(Session::new(token, self.user()?))),
            None => Ok(None),
        }
    }

    /// Persist a fresh session, replacing any previous profile
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        self.backend.set(TOKEN_KEY, session.token.as_str())?;
        match &session.user {
            Some(user) => self.backend.set(USER_KEY, &serde_json::to_string(user)?)?,
            None => self.backend.remove(USER_KEY)?,
        }
        Ok(())
    }

    /// Forget the session (logout)
    pub fn clear(&self) -> Result<(), SessionError> {
        self.backend.remove(TOKEN_KEY)?;
        self.backend.remove(USER_KEY)
    }
}
