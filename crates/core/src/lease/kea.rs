// crates/core/src/lease/kea.rs
//! Kea DHCPv4 memfile CSV format.
//!
//! The memfile is a header row followed by one lease per line:
//!
//! ```text
//! address,hwaddr,client_id,valid_lifetime,expire,subnet_id,...,state,...
//! 192.168.1.5,aa:bb:cc:dd:ee:ff,01:aa,3600,1704880800,1,...,0,...
//! ```
//!
//! Column positions are resolved from the header row, so Kea schema
//! additions don't break the parse. A record is active iff its numeric
//! state is the default (0) and its expiry is strictly in the future. The
//! memfile stores no lease-start column; the start is derived as
//! `expire - valid_lifetime`.

use tracing::warn;
use whoshere_types::MacAddr;

/// Kea lease state 0: a normal, non-declined, non-expired-reclaimed lease.
const STATE_DEFAULT: i64 = 0;

pub(super) fn parse_into(input: &str, now: i64, emit: &mut dyn FnMut(MacAddr, Option<i64>)) {
    let mut lines = input.lines();
    let header = match lines.next() {
        Some(h) => h,
        None => return,
    };

    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let index_of = |name: &str| columns.iter().position(|c| *c == name);

    let (Some(hwaddr), Some(valid_lifetime), Some(expire), Some(state)) = (
        index_of("hwaddr"),
        index_of("valid_lifetime"),
        index_of("expire"),
        index_of("state"),
    ) else {
        warn!("Kea memfile header missing required columns, nothing parsed");
        return;
    };

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();

        let Some(mac) = fields.get(hwaddr).and_then(|s| s.trim().parse::<MacAddr>().ok()) else {
            continue;
        };
        let Some(expire_ts) = fields.get(expire).and_then(|s| s.trim().parse::<i64>().ok()) else {
            continue;
        };
        let Some(state_code) = fields.get(state).and_then(|s| s.trim().parse::<i64>().ok()) else {
            continue;
        };

        if state_code != STATE_DEFAULT || expire_ts <= now {
            continue;
        }

        let start = fields
            .get(valid_lifetime)
            .and_then(|s| s.trim().parse::<i64>().ok())
            .map(|lifetime| expire_ts - lifetime);
        emit(mac, start);
    }
}
