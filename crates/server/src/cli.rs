// crates/server/src/cli.rs
//! Command-line interface.
//!
//! Running with no subcommand serves; the registry subcommands mirror the
//! old interactive maintenance tool and operate on the same files the
//! server uses.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use whoshere_core::LeaseFormat;

use crate::poller::ReadFailurePolicy;

#[derive(Debug, Parser)]
#[command(name = "whoshere", version, about = "Who is currently on the network")]
pub struct Cli {
    #[command(flatten)]
    pub serve: ServeArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, clap::Args)]
pub struct ServeArgs {
    /// Path to the lease source re-read on every poll cycle.
    #[arg(long, env = "WHOSHERE_LEASE_FILE", default_value = "dhcpd.leases")]
    pub lease_file: PathBuf,

    /// Lease source format: isc-dhcpd, kea-csv, or ip-neigh.
    #[arg(long, env = "WHOSHERE_LEASE_FORMAT", default_value = "isc-dhcpd")]
    pub lease_format: LeaseFormat,

    /// MAC ignore list, one per line, # comments allowed.
    #[arg(long, env = "WHOSHERE_IGNORE_FILE", default_value = "ignorelist.config")]
    pub ignore_file: PathBuf,

    /// Directory holding sessions.json and registrations.json.
    #[arg(long, env = "WHOSHERE_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// HTTP listen port.
    #[arg(long, env = "WHOSHERE_PORT", default_value_t = 5001)]
    pub port: u16,

    /// Seconds between lease source polls.
    #[arg(long, env = "WHOSHERE_POLL_INTERVAL", default_value_t = 5)]
    pub poll_interval: u64,

    /// What a failed lease-source read means: preserve-sessions or evict-all.
    #[arg(
        long,
        env = "WHOSHERE_ON_READ_FAILURE",
        default_value = "preserve-sessions"
    )]
    pub on_read_failure: ReadFailurePolicy,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server and lease poller (the default).
    Serve,
    /// Register a MAC under a nickname.
    Register { mac: String, nick: String },
    /// Deregister a MAC (must match the registered nickname).
    Deregister { mac: String, nick: String },
    /// List the MACs registered under a nickname.
    Lookup { nick: String },
    /// Dump the full registration table.
    Users,
}
