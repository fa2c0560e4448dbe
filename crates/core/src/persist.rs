// crates/core/src/persist.rs
//! Atomic JSON persistence shared by the session ledger and the registry.
//!
//! Both stores follow the same pattern: serialize the full table, write it
//! to `<path>.tmp`, then rename over the canonical path. A crash at any
//! point leaves either the previous valid file or the complete new one.
//! This makes a single writer's own crash-recovery safe; it is not a
//! multi-writer coordination mechanism.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StoreError;

/// Serialize `value` as JSON and atomically replace `path` with it.
///
/// Creates the parent directory if needed.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let data = serde_json::to_vec(value).map_err(|source| StoreError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, data).map_err(|source| StoreError::WriteTemp {
        path: tmp.clone(),
        source,
    })?;

    fs::rename(&tmp, path).map_err(|source| StoreError::Replace {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a JSON value from `path`, falling back to `T::default()` when the
/// file is missing or unreadable as `T`.
///
/// Corruption is logged and swallowed: a store that cannot be read is an
/// empty store, never a fatal condition.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let data = match fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "store file not present, starting empty");
            return T::default();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read store file, starting empty");
            return T::default();
        }
    };

    match serde_json::from_str(&data) {
        Ok(v) => v,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "corrupt store file, starting empty");
            T::default()
        }
    }
}
