use crate::error::StoreError;

/// A durable string-to-string map.
///
/// Implementations are synchronous: browser `localStorage` is, and the native
/// file backend is small enough that blocking I/O is fine.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
