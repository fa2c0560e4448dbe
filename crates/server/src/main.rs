// crates/server/src/main.rs
//! Whoshere binary.
//!
//! `whoshere` serves the presence API and runs the lease poller; the
//! registry subcommands maintain the nickname registry directly on disk.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use whoshere_core::{RegistrationStore, SessionTracker};
use whoshere_server::cli::{Cli, Command, ServeArgs};
use whoshere_server::{create_app, run_poller, AppState, PollerConfig};
use whoshere_types::MacAddr;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .compact()
        .init();

    let cli = Cli::parse();
    let registry = RegistrationStore::new(cli.serve.data_dir.join("registrations.json"));

    match cli.command {
        None | Some(Command::Serve) => serve(cli.serve, registry).await,
        Some(Command::Register { mac, nick }) => {
            let mac = parse_mac(&mac)?;
            let nick = nick.trim();
            anyhow::ensure!(!nick.is_empty(), "nickname must not be empty");
            if registry.register(&mac, nick)? {
                println!("registered {mac} as {nick}");
                Ok(())
            } else {
                anyhow::bail!("{mac} is already registered")
            }
        }
        Some(Command::Deregister { mac, nick }) => {
            let mac = parse_mac(&mac)?;
            if registry.deregister(&mac, nick.trim())? {
                println!("deregistered {mac}");
                Ok(())
            } else {
                anyhow::bail!("{mac} is not registered to {nick}")
            }
        }
        Some(Command::Lookup { nick }) => {
            for mac in registry.lookup_nick(&nick) {
                println!("{mac}");
            }
            Ok(())
        }
        Some(Command::Users) => {
            for (mac, nick) in registry.all() {
                println!("{mac}  {nick}");
            }
            Ok(())
        }
    }
}

fn parse_mac(s: &str) -> Result<MacAddr> {
    s.trim().parse().map_err(anyhow::Error::msg)
}

async fn serve(args: ServeArgs, registry: RegistrationStore) -> Result<()> {
    let tracker = Arc::new(SessionTracker::new(args.data_dir.join("sessions.json")));

    let config = PollerConfig {
        lease_file: args.lease_file,
        format: args.lease_format,
        ignore_file: args.ignore_file,
        interval: Duration::from_secs(args.poll_interval.max(1)),
        on_read_failure: args.on_read_failure,
    };
    tokio::spawn(run_poller(config, tracker.clone()));

    let state = AppState::new(tracker, registry);
    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "whoshere v{} listening", env!("CARGO_PKG_VERSION"));

    axum::serve(listener, app).await?;
    Ok(())
}
