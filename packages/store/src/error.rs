use std::path::PathBuf;

/// Failures raised by a [`KeyValueStore`](crate::KeyValueStore) backend.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt store file {path}: {message}")]
    Corrupt { path: PathBuf, message: String },

    /// Browser storage is missing or refused the operation (private mode, quota).
    #[error("browser storage unavailable: {0}")]
    Unavailable(String),

    #[error("store lock poisoned")]
    Poisoned,
}
