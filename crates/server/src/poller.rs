// crates/server/src/poller.rs
//! The background poll loop.
//!
//! One long-lived task re-reads the lease source in full every cycle,
//! normalizes it through the format adapter, and reconciles the result into
//! the session tracker. Persistence runs only on cycles where membership
//! actually changed.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error, warn};
use whoshere_core::{parse_active, ActiveLeases, IgnoreList, LeaseFormat, SessionTracker};

/// What to do with tracked sessions when the lease source cannot be read.
///
/// Historical versions of this system disagreed: some treated a missing
/// file as "no active leases" and evicted everyone, others as "no
/// information" and kept the previous state. Preserving is the safer
/// default — a transient read failure should not empty the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFailurePolicy {
    /// A failed read is "no information this cycle"; sessions are untouched.
    PreserveSessions,
    /// A failed read is an empty active set; everyone is evicted.
    EvictAll,
}

impl FromStr for ReadFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preserve-sessions" => Ok(Self::PreserveSessions),
            "evict-all" => Ok(Self::EvictAll),
            other => Err(format!(
                "unknown read-failure policy {other:?} (expected preserve-sessions or evict-all)"
            )),
        }
    }
}

impl fmt::Display for ReadFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreserveSessions => write!(f, "preserve-sessions"),
            Self::EvictAll => write!(f, "evict-all"),
        }
    }
}

/// Everything the poll loop needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub lease_file: PathBuf,
    pub format: LeaseFormat,
    pub ignore_file: PathBuf,
    pub interval: Duration,
    pub on_read_failure: ReadFailurePolicy,
}

/// Run one poll cycle: read, parse, reconcile, persist if changed.
///
/// The ignore list is re-read each cycle so edits take effect without a
/// restart. A persistence failure is logged and does not abort the loop —
/// the in-memory ledger is already up to date and the next changed cycle
/// retries the write.
pub async fn poll_once(config: &PollerConfig, tracker: &SessionTracker) {
    let now = Utc::now().timestamp();

    let active: Option<ActiveLeases> = match tokio::fs::read_to_string(&config.lease_file).await {
        Ok(raw) => {
            let ignore = IgnoreList::load(&config.ignore_file);
            Some(parse_active(config.format, &raw, &ignore, now))
        }
        Err(e) => {
            warn!(
                path = %config.lease_file.display(),
                error = %e,
                policy = %config.on_read_failure,
                "could not read lease source"
            );
            match config.on_read_failure {
                ReadFailurePolicy::PreserveSessions => None,
                ReadFailurePolicy::EvictAll => Some(ActiveLeases::new()),
            }
        }
    };

    let Some(active) = active else {
        return;
    };

    if tracker.reconcile(&active, now) {
        debug!(active = active.len(), "session membership changed");
        if let Err(e) = tracker.persist() {
            error!(error = %e, "failed to persist session ledger");
        }
    }
}

/// Load persisted sessions, then poll forever at the configured interval.
pub async fn run_poller(config: PollerConfig, tracker: Arc<SessionTracker>) {
    tracker.load();

    tracing::info!(
        lease_file = %config.lease_file.display(),
        format = %config.format,
        interval_secs = config.interval.as_secs(),
        "lease poller started"
    );

    let mut interval = tokio::time::interval(config.interval);
    loop {
        interval.tick().await;
        poll_once(&config, &tracker).await;
    }
}
