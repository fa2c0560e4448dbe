// crates/core/src/sessions.rs
//! The session ledger: MAC → arrival timestamp.
//!
//! A MAC is in the ledger iff it appeared in the most recent successful
//! poll's active set. The arrival is set once, when the MAC transitions
//! absent→present, and never touched while the MAC stays present — the
//! ledger tracks "time since first seen", not "time since last lease
//! renewal".
//!
//! The in-memory table is the source of truth between polls; the JSON file
//! at `path` exists to recover sessions across restarts. Writes go through
//! the atomic temp-then-rename pattern and happen outside the lock, so slow
//! disk I/O never stalls readers or the next poll.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info};
use whoshere_types::MacAddr;

use crate::error::StoreError;
use crate::lease::ActiveLeases;
use crate::persist;

pub struct SessionTracker {
    sessions: Mutex<HashMap<MacAddr, i64>>,
    path: PathBuf,
}

impl SessionTracker {
    /// Create a tracker persisting to `path`. The table starts empty; call
    /// [`load`](Self::load) once at startup to recover persisted sessions.
    pub fn new(path: PathBuf) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            path,
        }
    }

    /// Replace the in-memory table with the persisted copy. A missing or
    /// corrupt file yields an empty table, never an error.
    pub fn load(&self) {
        let table: HashMap<MacAddr, i64> = persist::read_json_or_default(&self.path);
        if !table.is_empty() {
            info!(sessions = table.len(), path = %self.path.display(), "recovered sessions");
        }
        *self.lock() = table;
    }

    /// Diff `active` against the ledger: insert new arrivals (arrival =
    /// reported lease start, else `now`), evict departed MACs. Returns
    /// whether membership changed — arrival-value differences for MACs that
    /// stayed present never count, because arrivals are never rewritten.
    pub fn reconcile(&self, active: &ActiveLeases, now: i64) -> bool {
        let mut sessions = self.lock();
        let mut changed = false;

        for (mac, lease_start) in active {
            sessions.entry(*mac).or_insert_with(|| {
                changed = true;
                debug!(mac = %mac, "arrived");
                lease_start.unwrap_or(now)
            });
        }

        sessions.retain(|mac, _| {
            let present = active.contains_key(mac);
            if !present {
                changed = true;
                debug!(mac = %mac, "departed");
            }
            present
        });

        changed
    }

    /// Atomically write the current table to the persisted copy.
    ///
    /// The snapshot is taken under the lock; the file I/O happens after the
    /// lock is released.
    pub fn persist(&self) -> Result<(), StoreError> {
        let snapshot = self.snapshot();
        persist::write_json_atomic(&self.path, &snapshot)
    }

    /// An owned copy of the current table. Holds the lock only for the copy.
    pub fn snapshot(&self) -> HashMap<MacAddr, i64> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<MacAddr, i64>> {
        match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::error!("session table lock poisoned, continuing with inner value");
                poisoned.into_inner()
            }
        }
    }
}
