//! songcat-api - Song catalog service entry point
//!
//! Loads bootstrap configuration, opens the SQLite database, wires the
//! catalog service to the HTTP song info provider and serves the API until
//! Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use songcat_api::catalog::CatalogService;
use songcat_api::enrichment::HttpSongInfoClient;
use songcat_api::storage::SqliteSongStore;
use songcat_api::{build_router, AppState};
use songcat_common::config::{ConfigOverrides, ConfigResolver, ConfigSource};
use songcat_common::db::init_database;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for songcat-api
#[derive(Parser, Debug)]
#[command(name = "songcat-api")]
#[command(about = "Song catalog service with lyrics paging and metadata enrichment")]
#[command(version)]
struct Args {
    /// Bootstrap TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "SONGCAT_PORT")]
    port: Option<u16>,

    /// SQLite database file
    #[arg(short, long, env = "SONGCAT_DATABASE")]
    database: Option<PathBuf>,

    /// Song info provider base URL
    #[arg(long, env = "API_URL")]
    api_url: Option<String>,

    /// Log level when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, source) = ConfigResolver::new(args.config.clone())
        .load()
        .context("Failed to load configuration")?;
    let config = config.apply_overrides(ConfigOverrides {
        port: args.port,
        database_path: args.database,
        api_url: args.api_url,
        log_level: args.log_level,
    });

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before any database work
    info!(
        "Starting songcat-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &source {
        ConfigSource::File(path) => info!("Configuration loaded from {}", path.display()),
        ConfigSource::Defaults { searched: Some(path) } => warn!(
            "Config file not found at {}, using compiled defaults",
            path.display()
        ),
        ConfigSource::Defaults { searched: None } => {
            warn!("No config directory available, using compiled defaults")
        }
    }

    let base_url = config
        .enrichment_base_url()
        .context("Enrichment provider is not configured")?;

    let db_path = config.database_path();
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path, config.storage.max_connections).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    let store = SqliteSongStore::new(pool).with_timeout(config.storage.timeout());
    let provider = HttpSongInfoClient::new(
        base_url.clone(),
        config.enrichment.timeout(),
        &config.enrichment.user_agent,
    )
    .context("Failed to build song info client")?;
    info!("Song info provider: {}", provider.info_url());

    let catalog = CatalogService::new(Arc::new(store), Arc::new(provider))
        .with_enrichment_timeout(config.enrichment.timeout());

    let shutdown = CancellationToken::new();
    let app = build_router(AppState::new(catalog, shutdown.clone()));

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .context("Invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("songcat-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
///
/// Cancels `shutdown` so in-flight creates abandon their write.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }

    shutdown.cancel();
}
