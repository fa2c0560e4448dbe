// crates/core/src/lease/neigh.rs
//! `ip neigh show` neighbor table format.
//!
//! ```text
//! 192.168.1.1 dev eth0 lladdr e6:21:32:29:ca:2a REACHABLE
//! 192.168.1.98 dev eth0 lladdr 96:31:2c:ca:51:72 STALE
//! 192.168.1.237 dev eth0 FAILED
//! ```
//!
//! A line counts as active iff it carries an `lladdr` field and its
//! reachability state is not `FAILED`. The neighbor table has no
//! lease-start concept, so the start is always `None` ("observed now").

use whoshere_types::MacAddr;

pub(super) fn parse_into(input: &str, emit: &mut dyn FnMut(MacAddr, Option<i64>)) {
    for line in input.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();

        let Some(pos) = parts.iter().position(|p| *p == "lladdr") else {
            continue;
        };
        if parts.last() == Some(&"FAILED") {
            continue;
        }
        let Some(mac) = parts.get(pos + 1).and_then(|s| s.parse::<MacAddr>().ok()) else {
            continue;
        };

        emit(mac, None);
    }
}
