// crates/server/src/routes/presence.rs
//! Presence view endpoints.
//!
//! Both endpoints snapshot the session ledger, join it with the registry,
//! and render. A presence query never fails: missing upstream data renders
//! as "no one registered, N others".

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use whoshere_core::presence_summary;
use whoshere_types::PresenceSummary;

use crate::state::AppState;

/// GET /api/presence - Presence summary as JSON.
pub async fn presence_json(State(state): State<Arc<AppState>>) -> Json<PresenceSummary> {
    Json(summary(&state))
}

/// GET /api/presence/plain - Presence summary as a comma-joined string.
pub async fn presence_plain(State(state): State<Arc<AppState>>) -> String {
    render_plain(&summary(&state))
}

fn summary(state: &AppState) -> PresenceSummary {
    let sessions = state.tracker.snapshot();
    let registrations = state.registry.all();
    presence_summary(&sessions, &registrations, Utc::now().timestamp())
}

/// Render as `"alice (2m), bob (1h 5m)"` with an `" - Unregistered: N"`
/// suffix when unregistered devices are present. Nicknames without a
/// resolvable arrival render bare.
fn render_plain(summary: &PresenceSummary) -> String {
    let parts: Vec<String> = summary
        .registered
        .iter()
        .map(|entry| match &entry.duration {
            Some(duration) => format!("{} ({duration})", entry.nick),
            None => entry.nick.clone(),
        })
        .collect();

    let mut out = parts.join(", ");
    if summary.others > 0 {
        out.push_str(&format!(" - Unregistered: {}", summary.others));
    }
    out
}

/// Create the presence routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/presence", get(presence_json))
        .route("/presence/plain", get(presence_plain))
}

#[cfg(test)]
mod tests {
    use whoshere_core::format_duration;
    use whoshere_types::PresenceEntry;

    use super::*;

    fn entry(nick: &str, secs: Option<i64>) -> PresenceEntry {
        PresenceEntry {
            nick: nick.to_string(),
            arrived: secs,
            duration: secs.map(format_duration),
        }
    }

    #[test]
    fn plain_rendering_joins_with_durations() {
        let summary = PresenceSummary {
            registered: vec![entry("alice", Some(125)), entry("bob", Some(3900))],
            others: 0,
        };
        assert_eq!(render_plain(&summary), "alice (2m), bob (1h 5m)");
    }

    #[test]
    fn plain_rendering_appends_unregistered_count() {
        let summary = PresenceSummary {
            registered: vec![entry("alice", Some(45))],
            others: 3,
        };
        assert_eq!(render_plain(&summary), "alice (45s) - Unregistered: 3");
    }

    #[test]
    fn plain_rendering_of_empty_room() {
        let summary = PresenceSummary {
            registered: vec![],
            others: 0,
        };
        assert_eq!(render_plain(&summary), "");

        let only_others = PresenceSummary {
            registered: vec![],
            others: 2,
        };
        assert_eq!(render_plain(&only_others), " - Unregistered: 2");
    }

    #[test]
    fn nickname_without_arrival_renders_bare() {
        let summary = PresenceSummary {
            registered: vec![entry("alice", None)],
            others: 0,
        };
        assert_eq!(render_plain(&summary), "alice");
    }
}
