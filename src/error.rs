//! Error types for idf-simhash

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fingerprints were requested from the process-wide pipeline before
    /// [`load_dictionary`](crate::load_dictionary) completed.
    #[error("simhash resources not initialized; call load_dictionary first")]
    NotInitialized,

    /// The process-wide resources were already loaded. They are never reloaded.
    #[error("simhash resources already initialized")]
    AlreadyInitialized,

    #[error("failed to read resource {path}: {source}")]
    ResourceLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed {resource} at line {line}: {reason}")]
    Malformed {
        resource: String,
        line: usize,
        reason: String,
    },

    #[error("{0} contains no entries")]
    EmptyResource(String),
}

pub type Result<T> = std::result::Result<T, Error>;
