//! # Filesystem-backed key-value store
//!
//! [`FileStore`] persists every entry into a single TOML file. It is used on
//! desktop builds so the session survives restarts, the same way the browser
//! build relies on `localStorage`.
//!
//! ```toml
//! access = "eyJhbGciOi..."
//! ```
//!
//! Every write rewrites the whole file. The store holds one or two keys, so
//! there is nothing to gain from anything smarter.
//!
//! ## Platform data directories
//!
//! [`FileStore::default_location`] resolves to:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/recipal/session.toml` |
//! | Linux | `~/.local/share/recipal/session.toml` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\recipal\session.toml` |

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::kv::KeyValueStore;

/// Filesystem-backed KeyValueStore for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<data_dir>/recipal/session.toml`, or `./recipal/session.toml` when the
    /// platform has no data directory.
    pub fn default_location() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recipal");
        Self::new(base.join("session.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        toml::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = toml::to_string(entries).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&self.path, content).map_err(io_err)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.toml");

        let store = FileStore::new(path.clone());
        store.set("access", "token-1").unwrap();
        store.set("theme", "dark").unwrap();

        // Re-open from the same file
        let reopened = FileStore::new(path);
        assert_eq!(reopened.get("access").unwrap().as_deref(), Some("token-1"));
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));

        reopened.remove("access").unwrap();
        assert_eq!(store.get("access").unwrap(), None);
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.toml"));

        assert_eq!(store.get("access").unwrap(), None);
        assert!(store.remove("access").is_ok());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "access = [unterminated").unwrap();

        let store = FileStore::new(path);
        assert!(matches!(
            store.get("access"),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        Session::new(FileStore::new(path.clone())).set_token("persisted");

        let session = Session::new(FileStore::new(path));
        assert_eq!(session.token().as_deref(), Some("persisted"));
    }
}
