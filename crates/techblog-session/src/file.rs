//! A session store persisted to a small JSON file.
//!
//! The file holds one JSON object of string entries, the way a browser's
//! local storage holds key/value pairs for an origin. The token lives under
//! [`TOKEN_KEY`]; any other entries are preserved untouched.
//!
//! ```json
//! { "authToken": "eyJhbGciOi..." }
//! ```
//!
//! Writes go to a [`tempfile::NamedTempFile`] in the same directory that is
//! then persisted over the target, so a crash mid-write never leaves a
//! truncated file behind.

use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tempfile::NamedTempFile;

use crate::{SessionError, SessionStore, TOKEN_KEY};

type Entries = BTreeMap<String, serde_json::Value>;

/// A [`SessionStore`] backed by a JSON file on disk.
///
/// The file is read on every [`get_token`](SessionStore::get_token), so two
/// processes sharing the file see each other's logins and logouts.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileSessionStore {
    /// Opens (lazily) the store at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stores `token`, reporting write failures.
    pub fn try_set_token(&self, token: &str) -> Result<(), SessionError> {
        let _guard = self.guard();
        let mut entries = self.read_entries();
        entries.insert(
            TOKEN_KEY.to_string(),
            serde_json::Value::String(token.to_string()),
        );
        self.write_entries(&entries)?;
        tracing::debug!(path = %self.path.display(), "session token stored");
        Ok(())
    }

    /// Removes the token, reporting write failures.
    ///
    /// Leaves the file alone when there is no token to remove.
    pub fn try_clear_token(&self) -> Result<(), SessionError> {
        let _guard = self.guard();
        let mut entries = self.read_entries();
        if entries.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        self.write_entries(&entries)?;
        tracing::debug!(path = %self.path.display(), "session token cleared");
        Ok(())
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn read_entries(&self) -> Entries {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Entries::new(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "session file unreadable, treating as logged out"
                );
                return Entries::new();
            }
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            return Entries::new();
        }

        match serde_json::from_slice(&data) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "session file corrupt, treating as logged out"
                );
                Entries::new()
            }
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), SessionError> {
        let data = serde_json::to_vec_pretty(entries)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|source| SessionError::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let write_err = |source| SessionError::Write {
            path: self.path.clone(),
            source,
        };

        // Dropped (and deleted) on any early return.
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(&data).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get_token(&self) -> Option<String> {
        let _guard = self.guard();
        match self.read_entries().remove(TOKEN_KEY) {
            Some(serde_json::Value::String(token)) => Some(token),
            Some(other) => {
                tracing::warn!(
                    path = %self.path.display(),
                    value_type = %json_type(&other),
                    "stored token is not a string, ignoring it"
                );
                None
            }
            None => None,
        }
    }

    fn set_token(&self, token: &str) {
        if let Err(e) = self.try_set_token(token) {
            tracing::error!(error = %e, "failed to persist session token");
        }
    }

    fn clear_token(&self) {
        if let Err(e) = self.try_clear_token() {
            tracing::error!(error = %e, "failed to clear session token");
        }
    }
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileSessionStore {
        FileSessionStore::new(dir.path().join("session.json"))
    }

    #[test]
    fn test_file_store_missing_file_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.get_token().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_writes_auth_token_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.try_set_token("abc123").unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["authToken"], "abc123");
    }

    #[test]
    fn test_file_store_preserves_other_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"theme": "dark"}"#).unwrap();

        store.set_token("abc");
        store.clear_token();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json, serde_json::json!({ "theme": "dark" }));
    }

    #[test]
    fn test_file_store_corrupt_file_reads_as_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(store.get_token().is_none());

        // Writing recovers the file.
        store.set_token("fresh");
        assert_eq!(store.get_token().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_file_store_non_string_token_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"authToken": 42}"#).unwrap();
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_file_store_clear_without_file_does_not_create_it() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.try_clear_token().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("a/b/session.json"));
        store.try_set_token("t").unwrap();
        assert_eq!(store.get_token().as_deref(), Some("t"));
    }

    #[test]
    fn test_file_store_failed_write_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the final rename fail.
        let store = store_in(&dir);
        std::fs::create_dir(store.path()).unwrap();

        let err = store.try_set_token("t").unwrap_err();
        assert!(matches!(err, SessionError::Write { ref path, .. } if path == store.path()));

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["session.json".to_string()]);
    }

    #[test]
    fn test_file_store_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set_token("a");
        store.set_token("b");
        store.clear_token();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["session.json".to_string()]);
    }
}
