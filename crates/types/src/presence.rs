// crates/types/src/presence.rs
//! Presence view response types.

use serde::{Deserialize, Serialize};

/// One registered nickname currently present.
///
/// A nickname can own several MACs; `arrived` is the earliest arrival among
/// the ones present. `arrived`/`duration` are omitted from JSON in the
/// (guarded, not normally reachable) case where no arrival resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceEntry {
    pub nick: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrived: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// The full presence projection: registered nicknames sorted by arrival,
/// plus a count of present-but-unregistered devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceSummary {
    pub registered: Vec<PresenceEntry>,
    pub others: usize,
}
