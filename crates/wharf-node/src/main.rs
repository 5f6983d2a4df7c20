//! Wharf node - registry hub backend.
//!
//! This is the main entry point for running a Wharf node.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wharf_auth::{AuthGate, TokenCodec};
use wharf_node::{seed, Config};
use wharf_registry::{OrgService, RegistryStore, RepoService, TeamService, UserService};

/// Wharf node - container image registry hub
#[derive(Parser, Debug)]
#[command(name = "wharf-node")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "wharf.yaml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("wharf={}", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Wharf node");

    let config = if args.config.exists() {
        match Config::load(&args.config) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                std::process::exit(1);
            }
        }
    } else {
        tracing::warn!(path = %args.config.display(), "Configuration file not found, using defaults");
        Config::default()
    };
    let config = config.overlay_env();

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    }

    tracing::info!(
        data_dir = %config.data_dir,
        image_dir = %config.image_dir,
        token_ttl_secs = config.token_ttl_secs,
        "Node configuration"
    );

    let store = Arc::new(RegistryStore::new());
    let users = UserService::new(Arc::clone(&store));
    let _orgs = OrgService::new(Arc::clone(&store));
    let _teams = TeamService::new(Arc::clone(&store));
    let _repos = RepoService::new(Arc::clone(&store));
    let _gate = AuthGate::new(TokenCodec::new(
        config.jwt_secret.as_bytes(),
        config.token_ttl_secs,
    ));

    if let Err(e) = seed::ensure_superadmin(&users, &config) {
        tracing::error!(error = %e, "Failed to provision superadmin");
        std::process::exit(1);
    }

    // TODO: mount the HTTP transport on the gate and services.

    tracing::info!("Wharf node initialized successfully");
    tracing::info!("Node is ready. Press Ctrl+C to stop.");

    std::thread::park();
}
