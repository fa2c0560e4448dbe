// crates/core/src/registry.rs
//! The voluntary MAC → nickname registry.
//!
//! A flat JSON file mapping canonical MAC strings to nicknames. The file is
//! small and edited rarely, so every operation re-reads it rather than
//! holding a cache that could go stale under the maintenance CLI. Writes
//! use the same atomic temp-then-rename pattern as the session ledger.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::info;
use whoshere_types::MacAddr;

use crate::error::StoreError;
use crate::persist;

#[derive(Debug, Clone)]
pub struct RegistrationStore {
    path: PathBuf,
}

impl RegistrationStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The full registration table, keyed by canonical MAC string.
    ///
    /// A missing or corrupt file reads as an empty table.
    pub fn all(&self) -> BTreeMap<String, String> {
        persist::read_json_or_default(&self.path)
    }

    /// The nickname registered for `mac`, if any.
    pub fn lookup_mac(&self, mac: &MacAddr) -> Option<String> {
        self.all().remove(&mac.to_string())
    }

    /// All MACs registered under `nick`, sorted canonically.
    pub fn lookup_nick(&self, nick: &str) -> Vec<MacAddr> {
        let mut macs: Vec<MacAddr> = self
            .all()
            .iter()
            .filter(|(_, n)| n.as_str() == nick)
            .filter_map(|(mac, _)| mac.parse().ok())
            .collect();
        macs.sort();
        macs
    }

    /// Claim `mac` for `nick`. First claim wins: returns `Ok(false)` without
    /// writing when the MAC is already registered (to anyone).
    pub fn register(&self, mac: &MacAddr, nick: &str) -> Result<bool, StoreError> {
        let mut table = self.all();
        let key = mac.to_string();
        if table.contains_key(&key) {
            return Ok(false);
        }
        table.insert(key, nick.to_string());
        persist::write_json_atomic(&self.path, &table)?;
        info!(mac = %mac, nick = %nick, "registered");
        Ok(true)
    }

    /// Release `mac`, but only if it is currently registered to exactly
    /// `nick`. Returns `Ok(false)` without writing otherwise.
    pub fn deregister(&self, mac: &MacAddr, nick: &str) -> Result<bool, StoreError> {
        let mut table = self.all();
        let key = mac.to_string();
        match table.get(&key) {
            Some(owner) if owner == nick => {
                table.remove(&key);
                persist::write_json_atomic(&self.path, &table)?;
                info!(mac = %mac, nick = %nick, "deregistered");
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn mac(s: &str) -> MacAddr {
        s.parse().unwrap()
    }

    fn store(dir: &TempDir) -> RegistrationStore {
        RegistrationStore::new(dir.path().join("registrations.json"))
    }

    #[test]
    fn register_then_lookup() {
        let dir = TempDir::new().unwrap();
        let reg = store(&dir);

        assert!(reg.register(&mac("aa:bb:cc:dd:ee:ff"), "alice").unwrap());
        assert_eq!(
            reg.lookup_mac(&mac("aa:bb:cc:dd:ee:ff")).as_deref(),
            Some("alice")
        );
        assert_eq!(reg.lookup_mac(&mac("11:22:33:44:55:66")), None);
    }

    #[test]
    fn first_claim_wins() {
        let dir = TempDir::new().unwrap();
        let reg = store(&dir);

        assert!(reg.register(&mac("aa:bb:cc:dd:ee:ff"), "alice").unwrap());
        assert!(!reg.register(&mac("aa:bb:cc:dd:ee:ff"), "mallory").unwrap());
        assert_eq!(
            reg.lookup_mac(&mac("aa:bb:cc:dd:ee:ff")).as_deref(),
            Some("alice")
        );
    }

    #[test]
    fn deregister_requires_exact_nickname_match() {
        let dir = TempDir::new().unwrap();
        let reg = store(&dir);
        reg.register(&mac("aa:bb:cc:dd:ee:ff"), "alice").unwrap();

        assert!(!reg.deregister(&mac("aa:bb:cc:dd:ee:ff"), "Alice").unwrap());
        assert!(!reg.deregister(&mac("11:22:33:44:55:66"), "alice").unwrap());
        assert!(reg.deregister(&mac("aa:bb:cc:dd:ee:ff"), "alice").unwrap());
        assert_eq!(reg.lookup_mac(&mac("aa:bb:cc:dd:ee:ff")), None);
    }

    #[test]
    fn lookup_nick_returns_all_owned_macs_sorted() {
        let dir = TempDir::new().unwrap();
        let reg = store(&dir);
        reg.register(&mac("22:22:22:22:22:22"), "alice").unwrap();
        reg.register(&mac("11:11:11:11:11:11"), "alice").unwrap();
        reg.register(&mac("33:33:33:33:33:33"), "bob").unwrap();

        assert_eq!(
            reg.lookup_nick("alice"),
            vec![mac("11:11:11:11:11:11"), mac("22:22:22:22:22:22")]
        );
        assert!(reg.lookup_nick("carol").is_empty());
    }

    #[test]
    fn survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registrations.json");

        RegistrationStore::new(path.clone())
            .register(&mac("aa:bb:cc:dd:ee:ff"), "alice")
            .unwrap();

        let reopened = RegistrationStore::new(path);
        assert_eq!(
            reopened.lookup_mac(&mac("aa:bb:cc:dd:ee:ff")).as_deref(),
            Some("alice")
        );
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registrations.json");
        std::fs::write(&path, "][").unwrap();

        let reg = RegistrationStore::new(path);
        assert!(reg.all().is_empty());
        // And a register over the corrupt file starts a fresh table.
        assert!(reg.register(&mac("aa:bb:cc:dd:ee:ff"), "alice").unwrap());
    }
}
