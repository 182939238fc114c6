//! Campus - Course catalog backend with bearer-auth rating endpoints

use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use campus_api::{create_router, AppState};
use campus_auth::TokenCodec;
use campus_core::CourseService;
use campus_db::Database;
use config::{Config, CorsConfig, LoggingConfig};

/// Campus - Course catalog backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Bind address
    #[arg(long, env = "CAMPUS_BIND")]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "CAMPUS_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Initialize logging
    init_logging(&config.logging);

    info!("Starting Campus v{}", env!("CARGO_PKG_VERSION"));

    if config.uses_default_secret() {
        warn!("Running with the default JWT secret; set [auth].jwt_secret before deploying");
    }

    // Install the Prometheus recorder before any counters are touched
    let metrics_handle = PrometheusBuilder::new().install_recorder()?;

    // Create the data directory for the SQLite file
    if let Some(parent) = Path::new(&config.database.path).parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    // Initialize database
    let db_path = format!("sqlite:{}?mode=rwc", config.database.path);
    let db = Database::new(&db_path).await?;

    // Initialize token codec
    let codec = Arc::new(TokenCodec::new(
        &config.auth.jwt_secret,
        &config.auth.algorithm,
        config.auth.token_ttl_minutes,
    )?);

    // Create application state
    let service = Arc::new(CourseService::new(db));
    let state = AppState::new(service, codec);

    // Create router
    let app = create_router(state, Some(Arc::new(metrics_handle)))
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http());

    // Determine bind address
    let bind_addr = args.bind.unwrap_or(config.server.bind_address);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind_addr, port).parse()?;

    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Initialize logging
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Build the CORS layer from configuration
///
/// Origins, methods and headers are listed explicitly; wildcard origins
/// cannot be combined with credentialed requests.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let mut layer = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if config.allow_credentials {
        layer = layer.allow_credentials(true);
    }

    layer
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    info!("Shutdown signal received");
}
