// crates/core/src/presence.rs
//! The presence view: sessions joined with the registry.

use std::collections::{BTreeMap, HashMap};

use whoshere_types::{MacAddr, PresenceEntry, PresenceSummary};

/// Join a session snapshot against the registration table.
///
/// Registered nicknames keep the earliest arrival among their present MACs
/// (one person, several devices). Unregistered MACs fold into the `others`
/// count and are never named. The registered list is sorted by arrival
/// ascending; entries without a resolvable arrival sort last.
///
/// This never fails: empty upstream data degrades to "no one registered,
/// N others", which is valid output rather than an error state.
pub fn presence_summary(
    sessions: &HashMap<MacAddr, i64>,
    registrations: &BTreeMap<String, String>,
    now: i64,
) -> PresenceSummary {
    let mut earliest: HashMap<&str, i64> = HashMap::new();
    let mut others = 0;

    for (mac, arrival) in sessions {
        match registrations.get(&mac.to_string()) {
            Some(nick) => {
                earliest
                    .entry(nick.as_str())
                    .and_modify(|a| *a = (*a).min(*arrival))
                    .or_insert(*arrival);
            }
            None => others += 1,
        }
    }

    let mut registered: Vec<PresenceEntry> = earliest
        .into_iter()
        .map(|(nick, arrived)| PresenceEntry {
            nick: nick.to_string(),
            arrived: Some(arrived),
            duration: Some(format_duration(now - arrived)),
        })
        .collect();
    registered.sort_by(|a, b| match (a.arrived, b.arrived) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.nick.cmp(&b.nick)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.nick.cmp(&b.nick),
    });

    PresenceSummary { registered, others }
}

/// Render an elapsed-seconds value for humans.
///
/// The output is a byte-for-byte contract with the rendering layer:
/// `"45s"`, `"2m"`, `"1h 1m"`, `"2h"` — minutes under an hour, hours
/// beyond, trailing zero minutes omitted.
pub fn format_duration(secs: i64) -> String {
    let secs = secs.max(0);
    if secs < 60 {
        return format!("{secs}s");
    }
    let minutes = secs / 60;
    if minutes < 60 {
        return format!("{minutes}m");
    }
    let hours = minutes / 60;
    let rem = minutes % 60;
    if rem == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {rem}m")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn mac(s: &str) -> MacAddr {
        s.parse().unwrap()
    }

    #[test]
    fn duration_formatting_contract() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(60), "1m");
        assert_eq!(format_duration(125), "2m");
        assert_eq!(format_duration(3599), "59m");
        assert_eq!(format_duration(3600), "1h");
        assert_eq!(format_duration(3661), "1h 1m");
        assert_eq!(format_duration(7200), "2h");
        assert_eq!(format_duration(-5), "0s");
    }

    #[test]
    fn registered_and_others_are_split() {
        let sessions: HashMap<MacAddr, i64> = [
            (mac("aa:bb:cc:dd:ee:ff"), 1000),
            (mac("11:22:33:44:55:66"), 1050),
        ]
        .into_iter()
        .collect();
        let registrations: BTreeMap<String, String> =
            [("aa:bb:cc:dd:ee:ff".to_string(), "alice".to_string())]
                .into_iter()
                .collect();

        let summary = presence_summary(&sessions, &registrations, 1125);
        assert_eq!(
            summary.registered,
            vec![whoshere_types::PresenceEntry {
                nick: "alice".into(),
                arrived: Some(1000),
                duration: Some("2m".into()),
            }]
        );
        assert_eq!(summary.others, 1);
    }

    #[test]
    fn nickname_with_several_macs_keeps_earliest_arrival() {
        let sessions: HashMap<MacAddr, i64> = [
            (mac("aa:bb:cc:dd:ee:01"), 2000),
            (mac("aa:bb:cc:dd:ee:02"), 1000),
        ]
        .into_iter()
        .collect();
        let registrations: BTreeMap<String, String> = [
            ("aa:bb:cc:dd:ee:01".to_string(), "alice".to_string()),
            ("aa:bb:cc:dd:ee:02".to_string(), "alice".to_string()),
        ]
        .into_iter()
        .collect();

        let summary = presence_summary(&sessions, &registrations, 3000);
        assert_eq!(summary.registered.len(), 1);
        assert_eq!(summary.registered[0].arrived, Some(1000));
        assert_eq!(summary.others, 0);
    }

    #[test]
    fn sorted_by_arrival_ascending() {
        let sessions: HashMap<MacAddr, i64> = [
            (mac("aa:aa:aa:aa:aa:aa"), 3000),
            (mac("bb:bb:bb:bb:bb:bb"), 1000),
            (mac("cc:cc:cc:cc:cc:cc"), 2000),
        ]
        .into_iter()
        .collect();
        let registrations: BTreeMap<String, String> = [
            ("aa:aa:aa:aa:aa:aa".to_string(), "carol".to_string()),
            ("bb:bb:bb:bb:bb:bb".to_string(), "alice".to_string()),
            ("cc:cc:cc:cc:cc:cc".to_string(), "bob".to_string()),
        ]
        .into_iter()
        .collect();

        let summary = presence_summary(&sessions, &registrations, 4000);
        let nicks: Vec<&str> = summary.registered.iter().map(|e| e.nick.as_str()).collect();
        assert_eq!(nicks, ["alice", "bob", "carol"]);
    }

    #[test]
    fn empty_upstream_degrades_not_fails() {
        let summary = presence_summary(&HashMap::new(), &BTreeMap::new(), 0);
        assert!(summary.registered.is_empty());
        assert_eq!(summary.others, 0);
    }
}
