use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use workforce_api::config::{load_config, AppConfig};
use workforce_api::net::Listener;
use workforce_api::HttpServer;

/// Workforce API server.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workforce_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = match args.config {
        Some(path) => load_config(&path)?,
        None => AppConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        token_ttl_secs = config.auth.token_ttl_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => workforce_api::observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = Listener::bind(&config.listener).await?;
    let server = HttpServer::new(config)?;

    // Bootstrap administrator, if requested via environment.
    if let (Ok(email), Ok(password)) = (
        std::env::var("WORKFORCE_ADMIN_EMAIL"),
        std::env::var("WORKFORCE_ADMIN_PASSWORD"),
    ) {
        match server.state().users.seed_administrator(&email, &password) {
            Ok(admin) => tracing::info!(user_id = admin.id, "Administrator account seeded"),
            Err(e) => tracing::error!(error = %e, "Failed to seed administrator account"),
        }
    }

    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
