//! Storage errors.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Storage error variants.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage io error on {path}")]
    Io {
        /// Backing file
        path: PathBuf,

        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The backing file does not contain a valid key-value document.
    #[error("corrupt storage file {path}")]
    Corrupt {
        /// Backing file
        path: PathBuf,

        /// Decoding failure
        #[source]
        source: serde_json::Error,
    },

    /// A stored value is not valid base64.
    #[error("corrupt value for key {key}")]
    CorruptValue {
        /// Key of the unreadable value
        key: String,

        /// Decoding failure
        #[source]
        source: base64::DecodeError,
    },

    /// The store lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}
