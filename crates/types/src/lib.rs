// crates/types/src/lib.rs
//! Shared types for the whoshere workspace.
//!
//! Home of [`MacAddr`], the canonical MAC address used as the key everywhere
//! in the system, and the presence response types shared between the core
//! and the HTTP layer.

pub mod mac;
pub mod presence;

pub use mac::{MacAddr, MacParseError};
pub use presence::{PresenceEntry, PresenceSummary};
