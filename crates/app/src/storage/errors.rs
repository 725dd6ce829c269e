//! Storage errors.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("failed to access storage key {key:?}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize value for storage key {key:?}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage lock poisoned")]
    Poisoned,
}
