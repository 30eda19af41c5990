//! ATL Ledger CLI server
//!
//! Headless authority-to-load booking service, suitable for a systemd
//! unit, a container or a standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/atl-ledger/config.toml)
//! atl-service
//!
//! # Custom config path
//! atl-service --config /etc/atl-ledger/config.toml
//!
//! # Override the port and the booking validity window
//! atl-service --api-port 8081 --validity-days 5
//!
//! # Validate config without starting
//! atl-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use atl_ledger::config::AppConfig;
use atl_ledger::server::{init_tracing, ServerHandle, ServerOptions};

#[derive(Parser, Debug)]
#[command(
    name = "atl-service",
    version,
    about = "Authority-to-load booking and order-slip reservation service",
    long_about = "ATL Ledger: REST API for booking authorities to load against \
                  supplier appointments of customer order slips.\n\n\
                  Default config: ~/.config/atl-ledger/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "ATL_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the database URL.
    #[arg(long)]
    database_url: Option<String>,

    /// Override the number of days a booking stays valid.
    #[arg(long)]
    validity_days: Option<u32>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(atl_ledger::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    // Init tracing first so subsequent logs are formatted properly
    init_tracing(&config);

    match &load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }
    if let Some(url) = cli.database_url {
        info!("CLI override: database_url");
        config.database.url = url;
    }
    if let Some(days) = cli.validity_days {
        info!("CLI override: validity_days = {}", days);
        config.booking.validity_days = days;
    }

    if cli.check {
        if let Some(e) = load_error {
            return Err(e.into());
        }
        println!("✅ Configuration is valid");
        println!("   Config file   : {}", config_path.display());
        println!("   API address   : {}", config.server.address());
        println!("   Database      : {}", config.database.connection_url());
        println!("   Validity days : {}", config.booking.validity_days);
        println!("   Log level     : {}", config.logging.level);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
