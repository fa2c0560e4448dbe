// crates/core/src/lib.rs
//! Lease-source normalization and presence tracking.
//!
//! This crate turns heterogeneous lease data (ISC `dhcpd.leases`, Kea CSV
//! memfiles, `ip neigh` output) into a canonical active-MAC map, reconciles
//! that map into a crash-tolerant session ledger, and projects the ledger
//! joined with the nickname registry into a presence summary.

pub mod error;
pub mod ignore;
pub mod lease;
pub mod persist;
pub mod presence;
pub mod registry;
pub mod sessions;

pub use error::StoreError;
pub use ignore::IgnoreList;
pub use lease::{parse_active, ActiveLeases, LeaseFormat};
pub use presence::{format_duration, presence_summary};
pub use registry::RegistrationStore;
pub use sessions::SessionTracker;
