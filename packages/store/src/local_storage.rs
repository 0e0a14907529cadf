//! # `localStorage` store — browser-side persistence
//!
//! [`LocalStorageStore`] maps the [`KeyValueStore`] trait onto
//! `window.localStorage`. Keys are namespaced with a prefix so the client does
//! not collide with other scripts on the same origin.
//!
//! The storage handle is looked up on every call: it is cheap, and it keeps
//! the struct `Clone` without holding a `JsValue`.

use web_sys::Storage;

use crate::error::StoreError;
use crate::kv::KeyValueStore;

const DEFAULT_PREFIX: &str = "recipal";

/// `localStorage`-backed KeyValueStore for the web platform.
#[derive(Clone, Debug)]
pub struct LocalStorageStore {
    prefix: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorageStore {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }

    /// Keys are stored as `"<prefix>:<key>"`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn storage(&self) -> Result<Storage, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".into()))
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}:{key}", self.prefix)
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(&self.scoped(key))
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(&self.scoped(key), value)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(&self.scoped(key))
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}
