//! hello-k3s entry point.
//!
//! Initializes tracing, loads configuration from an optional TOML file plus
//! environment overrides, builds the router and serves it until a
//! termination signal arrives. Any startup error, most importantly a port
//! that is already bound, exits the process with a non-zero status.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hello_k3s::config::{
    AppConfig, LogFormat, CONFIG_PATH_ENV, DEFAULT_LOG_FILTER, GREETING, SERVICE_NAME,
};
use hello_k3s::create_router;

/// hello-k3s: answers `GET /` with a fixed greeting
#[derive(Parser, Debug)]
#[command(name = "hello-k3s", version, about)]
struct Args {
    /// Path to configuration file (default: $CONFIG_PATH, then config/default.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port, overriding $PORT and the config file
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level filter (e.g., "hello_k3s=debug")
    #[arg(short, long)]
    log_level: Option<String>,
}

fn init_tracing(filter: &str, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(filter));
    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration before tracing so the log format can come from it
    let config_path = args
        .config
        .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));
    let mut config = AppConfig::load_or_default(config_path.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok())?;
    if let Some(port) = args.port {
        config.http.port = port;
    }
    config.validate()?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, config.logging.log_format()?);

    tracing::info!(
        service = SERVICE_NAME,
        version = env!("CARGO_PKG_VERSION"),
        config = ?config_path,
        "Loaded configuration"
    );
    tracing::debug!(greeting = GREETING.trim_end(), "Serving fixed greeting");

    let addr = config.http.socket_addr()?;
    let grace = Duration::from_secs(config.http.shutdown_grace_seconds);

    hello_k3s::http::start_server(create_router(), addr, grace).await?;

    Ok(())
}
