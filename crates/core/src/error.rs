// crates/core/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the durable stores (session ledger, nickname registry).
///
/// Read-side failures never surface here — a missing or corrupt file loads
/// as an empty table. These are write-side failures only: if the atomic
/// replace cannot complete, the caller must know, because the alternative
/// (a half-written canonical file) is the one outcome the store forbids.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write temporary file {path}: {source}")]
    WriteTemp {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not replace {path}: {source}")]
    Replace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
