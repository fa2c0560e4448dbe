// crates/core/src/lease/isc.rs
//! ISC `dhcpd.leases` text format.
//!
//! The lease file is a sequence of blocks:
//!
//! ```text
//! lease 192.168.1.5 {
//!   starts 3 2024/01/10 10:00:00;
//!   ends 3 2024/01/10 22:00:00;
//!   binding state active;
//!   hardware ethernet aa:bb:cc:dd:ee:ff;
//! }
//! ```
//!
//! A record is active iff its binding state is `active` and its end time is
//! either the literal `never` or strictly in the future. Timestamps are UTC
//! in `<weekday> %Y/%m/%d %H:%M:%S` form. A missing or unparseable end time
//! makes the record inactive, never a parse failure.

use chrono::NaiveDateTime;
use whoshere_types::MacAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeaseEnd {
    Never,
    At(i64),
}

#[derive(Default)]
struct Block {
    mac: Option<MacAddr>,
    starts: Option<i64>,
    ends: Option<LeaseEnd>,
    active: bool,
}

impl Block {
    fn emit_if_active(&self, now: i64, emit: &mut dyn FnMut(MacAddr, Option<i64>)) {
        let mac = match self.mac {
            Some(mac) => mac,
            None => return,
        };
        let live = match self.ends {
            Some(LeaseEnd::Never) => true,
            Some(LeaseEnd::At(end)) => end > now,
            None => false,
        };
        if self.active && live {
            emit(mac, self.starts);
        }
    }
}

pub(super) fn parse_into(input: &str, now: i64, emit: &mut dyn FnMut(MacAddr, Option<i64>)) {
    let mut block: Option<Block> = None;

    for raw in input.lines() {
        let line = raw.trim();

        let Some(current) = block.as_mut() else {
            if line.starts_with("lease ") && line.ends_with('{') {
                block = Some(Block::default());
            }
            continue;
        };

        if line.starts_with('}') {
            current.emit_if_active(now, emit);
            block = None;
            continue;
        }

        let line = line.trim_end_matches(';');
        if let Some(rest) = line.strip_prefix("hardware ethernet ") {
            current.mac = rest.trim().parse().ok();
        } else if let Some(rest) = line.strip_prefix("starts ") {
            current.starts = parse_lease_time(rest);
        } else if let Some(rest) = line.strip_prefix("ends ") {
            current.ends = if rest.trim() == "never" {
                Some(LeaseEnd::Never)
            } else {
                parse_lease_time(rest).map(LeaseEnd::At)
            };
        } else if let Some(rest) = line.strip_prefix("binding state ") {
            current.active = rest.trim() == "active";
        }
    }
}

/// Parse `"<weekday> 2024/01/10 22:00:00"` as UTC unix seconds.
fn parse_lease_time(s: &str) -> Option<i64> {
    let (_weekday, datetime) = s.trim().split_once(' ')?;
    NaiveDateTime::parse_from_str(datetime.trim(), "%Y/%m/%d %H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc().timestamp())
}
