// crates/core/src/lease/mod.rs
//! Lease format adapters.
//!
//! Three lease sources are supported, each with its own notion of "active":
//!
//! - [`LeaseFormat::IscDhcpd`] — ISC `dhcpd.leases` text blocks
//! - [`LeaseFormat::KeaCsv`] — Kea memfile CSV, with an optional
//!   `# RESERVED_MACS:` exclusion header
//! - [`LeaseFormat::IpNeigh`] — `ip neigh show` output
//!
//! All of them normalize to the same canonical shape: a map of active MAC to
//! optional lease-start time. Parsing is total — a malformed record is
//! skipped, never fatal to the whole parse.

mod isc;
mod kea;
mod neigh;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use tracing::warn;
use whoshere_types::MacAddr;

use crate::ignore::IgnoreList;

/// Canonical adapter output: active MAC → optional lease-start unix seconds.
///
/// `None` means the source has no lease-start concept for this record
/// ("observed now").
pub type ActiveLeases = HashMap<MacAddr, Option<i64>>;

/// The closed set of supported lease source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseFormat {
    /// ISC `dhcpd.leases` lease blocks.
    IscDhcpd,
    /// Kea DHCPv4 memfile CSV.
    KeaCsv,
    /// `ip neigh show` neighbor table output.
    IpNeigh,
}

impl FromStr for LeaseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "isc-dhcpd" => Ok(Self::IscDhcpd),
            "kea-csv" => Ok(Self::KeaCsv),
            "ip-neigh" => Ok(Self::IpNeigh),
            other => Err(format!(
                "unknown lease format {other:?} (expected isc-dhcpd, kea-csv, or ip-neigh)"
            )),
        }
    }
}

impl fmt::Display for LeaseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IscDhcpd => write!(f, "isc-dhcpd"),
            Self::KeaCsv => write!(f, "kea-csv"),
            Self::IpNeigh => write!(f, "ip-neigh"),
        }
    }
}

/// Parse `input` as `format` and return the currently-active leases.
///
/// Shared behaviors across every format:
///
/// - MACs on the [`IgnoreList`] never appear in the result.
/// - A leading `# RESERVED_MACS: <mac>,<mac>,...` line extends the
///   exclusion set for this parse only and is stripped before the body is
///   parsed as structured data.
/// - Duplicate records for one MAC keep the earliest non-null start; an
///   occurrence with no derivable start still counts the MAC as active.
///
/// `now` is the activity cutoff: records whose end/expiry is not strictly
/// in the future are inactive.
pub fn parse_active(
    format: LeaseFormat,
    input: &str,
    ignore: &IgnoreList,
    now: i64,
) -> ActiveLeases {
    let (reserved, body) = strip_reserved_header(input);

    let mut active = ActiveLeases::new();
    let mut emit = |mac: MacAddr, start: Option<i64>| {
        if ignore.contains(&mac) || reserved.contains(&mac) {
            return;
        }
        merge_earliest(&mut active, mac, start);
    };

    match format {
        LeaseFormat::IscDhcpd => isc::parse_into(body, now, &mut emit),
        LeaseFormat::KeaCsv => kea::parse_into(body, now, &mut emit),
        LeaseFormat::IpNeigh => neigh::parse_into(body, &mut emit),
    }

    active
}

/// Earliest-wins merge: a non-null start always beats null, and the
/// smaller of two non-null starts wins.
fn merge_earliest(active: &mut ActiveLeases, mac: MacAddr, start: Option<i64>) {
    let slot = active.entry(mac).or_insert(start);
    match (*slot, start) {
        (None, Some(_)) => *slot = start,
        (Some(existing), Some(new)) if new < existing => *slot = start,
        _ => {}
    }
}

/// If the first line is a `# RESERVED_MACS:` header, parse the listed MACs
/// and return them along with the remaining body.
fn strip_reserved_header(input: &str) -> (HashSet<MacAddr>, &str) {
    let first = match input.split('\n').next() {
        Some(line) => line,
        None => return (HashSet::new(), input),
    };

    let listed = match first.trim().strip_prefix("# RESERVED_MACS:") {
        Some(rest) => rest,
        None => return (HashSet::new(), input),
    };

    let mut reserved = HashSet::new();
    for token in listed.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match token.parse::<MacAddr>() {
            Ok(mac) => {
                reserved.insert(mac);
            }
            Err(e) => warn!(error = %e, "skipping entry in RESERVED_MACS header"),
        }
    }

    let body = match input.split_once('\n') {
        Some((_, rest)) => rest,
        None => "",
    };
    (reserved, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mac(s: &str) -> MacAddr {
        s.parse().unwrap()
    }

    #[test]
    fn lease_format_from_str_roundtrip() {
        for f in [
            LeaseFormat::IscDhcpd,
            LeaseFormat::KeaCsv,
            LeaseFormat::IpNeigh,
        ] {
            assert_eq!(f.to_string().parse::<LeaseFormat>().unwrap(), f);
        }
        assert!("dnsmasq".parse::<LeaseFormat>().is_err());
    }

    #[test]
    fn merge_keeps_earliest_nonnull_start() {
        let mut active = ActiveLeases::new();
        merge_earliest(&mut active, mac("aa:bb:cc:dd:ee:ff"), Some(800));
        merge_earliest(&mut active, mac("aa:bb:cc:dd:ee:ff"), Some(500));
        merge_earliest(&mut active, mac("aa:bb:cc:dd:ee:ff"), Some(900));
        assert_eq!(active[&mac("aa:bb:cc:dd:ee:ff")], Some(500));
    }

    #[test]
    fn merge_prefers_nonnull_over_null() {
        let mut active = ActiveLeases::new();
        merge_earliest(&mut active, mac("aa:bb:cc:dd:ee:ff"), None);
        merge_earliest(&mut active, mac("aa:bb:cc:dd:ee:ff"), Some(500));
        merge_earliest(&mut active, mac("aa:bb:cc:dd:ee:ff"), None);
        assert_eq!(active[&mac("aa:bb:cc:dd:ee:ff")], Some(500));
    }

    #[test]
    fn reserved_header_is_parsed_and_stripped() {
        let input = "# RESERVED_MACS: aa:bb:cc:dd:ee:ff, 11-22-33-44-55-66\nbody line";
        let (reserved, body) = strip_reserved_header(input);
        assert_eq!(reserved.len(), 2);
        assert!(reserved.contains(&mac("aa:bb:cc:dd:ee:ff")));
        assert!(reserved.contains(&mac("11:22:33:44:55:66")));
        assert_eq!(body, "body line");
    }

    #[test]
    fn non_header_input_passes_through_untouched() {
        let input = "192.168.1.1 dev eth0 lladdr aa:bb:cc:dd:ee:ff REACHABLE\n";
        let (reserved, body) = strip_reserved_header(input);
        assert!(reserved.is_empty());
        assert_eq!(body, input);
    }

    #[test]
    fn reserved_header_excludes_otherwise_active_csv_row() {
        let input = "# RESERVED_MACS: aa:bb:cc:dd:ee:ff\n\
                     address,hwaddr,client_id,valid_lifetime,expire,subnet_id,fqdn_fwd,fqdn_rev,hostname,state\n\
                     192.168.1.5,aa:bb:cc:dd:ee:ff,01:aa,3600,5000,1,0,0,host,0\n\
                     192.168.1.6,11:22:33:44:55:66,01:11,3600,5000,1,0,0,host2,0\n";

        let active = parse_active(LeaseFormat::KeaCsv, input, &IgnoreList::default(), 1000);
        assert!(!active.contains_key(&mac("aa:bb:cc:dd:ee:ff")));
        assert_eq!(active[&mac("11:22:33:44:55:66")], Some(1400));
    }

    #[test]
    fn ignore_list_applies_to_every_format() {
        let ignore: IgnoreList = [mac("aa:bb:cc:dd:ee:ff")].into_iter().collect();
        let input = "10.0.0.1 dev eth0 lladdr aa:bb:cc:dd:ee:ff REACHABLE\n\
                     10.0.0.2 dev eth0 lladdr 11:22:33:44:55:66 STALE\n";

        let active = parse_active(LeaseFormat::IpNeigh, input, &ignore, 0);
        assert_eq!(active.len(), 1);
        assert!(active.contains_key(&mac("11:22:33:44:55:66")));
    }

    #[test]
    fn duplicate_lease_blocks_keep_earliest_start() {
        // Two blocks for the same MAC: starts at epoch 500 and 800
        // (1970/01/01 00:08:20 and 00:13:20), both ending "never".
        let input = "\
lease 192.168.1.5 {
  starts 4 1970/01/01 00:08:20;
  ends never;
  binding state active;
  hardware ethernet aa:bb:cc:dd:ee:ff;
}
lease 192.168.1.5 {
  starts 4 1970/01/01 00:13:20;
  ends never;
  binding state active;
  hardware ethernet aa:bb:cc:dd:ee:ff;
}
";
        let active = parse_active(LeaseFormat::IscDhcpd, input, &IgnoreList::default(), 1000);
        assert_eq!(active[&mac("aa:bb:cc:dd:ee:ff")], Some(500));
    }

    #[test]
    fn empty_input_yields_empty_set() {
        for format in [
            LeaseFormat::IscDhcpd,
            LeaseFormat::KeaCsv,
            LeaseFormat::IpNeigh,
        ] {
            assert!(parse_active(format, "", &IgnoreList::default(), 0).is_empty());
        }
    }
}
