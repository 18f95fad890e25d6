//! File-backed key-value store
//!
//! Keeps the entries as one JSON object. Writes go to a temporary file that
//! is then renamed over the original.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{KeyValueStore, SessionError};

/// Durable key-value store in a single JSON file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, error: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            error: error.to_string(),
        }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, SessionError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| SessionError::Corrupt {
            path: self.path.clone(),
            error: e.to_string(),
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(entries)?;
        write_private(&tmp, &body).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.read_entries()?;
        apply(&mut entries);
        self.write_entries(&entries)
    }
}

/// Write `body` to a fresh file readable only by its owner (on unix)
fn write_private(path: &Path, body: &[u8]) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(body)?;
    file.sync_all()
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Session, SessionToken, User};
    use crate::session::SessionStore;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("session.json"));
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn test_session_survives_reopen() {
        let dir = tempdir().unwrap();
        let session = Session::new(SessionToken::new("jwt-1"), Some(User::new("Grace")));

        SessionStore::in_dir(dir.path()).save(&session).unwrap();

        // A second process sees the same session
        let reopened = SessionStore::in_dir(dir.path());
        assert_eq!(reopened.load().unwrap(), Some(session));

        reopened.clear().unwrap();
        assert!(SessionStore::in_dir(dir.path()).load().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileStore::new(&path);
        store.set("token", "secret").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.get("token").unwrap().as_deref(), Some("secret"));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.get("token"), Err(SessionError::Corrupt { .. })));
    }

    #[test]
    fn test_user_entry_is_serialized_json_string() {
        let dir = tempdir().unwrap();
        SessionStore::in_dir(dir.path())
            .save(&Session::new(SessionToken::new("t"), Some(User::new("Lin"))))
            .unwrap();

        let raw = std::fs::read_to_string(dir.path().join("session.json")).unwrap();
        let entries: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(entries["token"], "t");
        let user: serde_json::Value = serde_json::from_str(&entries["user"]).unwrap();
        assert_eq!(user["name"], "Lin");
    }
}
