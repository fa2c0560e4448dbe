// crates/core/src/ignore.rs
//! The operator-maintained MAC ignore list.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};
use whoshere_types::MacAddr;

/// A set of MACs excluded from every parse, regardless of lease format.
///
/// Loaded from a line-oriented file: one MAC per line, blank lines and
/// `#`-prefixed comment lines skipped. The file is re-read each poll cycle
/// so edits take effect without a restart.
#[derive(Debug, Default, Clone)]
pub struct IgnoreList {
    macs: HashSet<MacAddr>,
}

impl IgnoreList {
    /// Load the ignore list from `path`. A missing file is an empty list,
    /// not an error; unparseable lines are warned about and skipped.
    pub fn load(path: &Path) -> Self {
        let data = match fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no ignore list loaded");
                return Self::default();
            }
        };

        let mut macs = HashSet::new();
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.parse::<MacAddr>() {
                Ok(mac) => {
                    macs.insert(mac);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "skipping ignore list line"),
            }
        }
        Self { macs }
    }

    pub fn contains(&self, mac: &MacAddr) -> bool {
        self.macs.contains(mac)
    }

    pub fn len(&self) -> usize {
        self.macs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macs.is_empty()
    }
}

impl FromIterator<MacAddr> for IgnoreList {
    fn from_iter<I: IntoIterator<Item = MacAddr>>(iter: I) -> Self {
        Self {
            macs: iter.into_iter().collect(),
        }
    }
}
