//! Forecast time-series EDR API server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use clap::Parser;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use forecast_api::handlers;
use forecast_api::state::AppState;

/// Forecast time-series EDR API server
#[derive(Parser, Debug)]
#[command(name = "forecast-api")]
#[command(about = "OGC API - Environmental Data Retrieval server for forecast time-series")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "EDR_LISTEN_ADDR")]
    listen: String,

    /// Base URL for links in responses
    #[arg(long, default_value = "http://localhost:8080", env = "EDR_BASE_URL")]
    base_url: String,

    /// Directory of collection configuration files
    #[arg(long, default_value = "config/collections", env = "EDR_CONFIG_DIR")]
    config_dir: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "EDR_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .expect("Failed to create Tokio runtime");

    runtime.block_on(async move {
        run_server(args).await;
    });
}

async fn run_server(args: Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting forecast EDR API server");

    let state = match AppState::new(&args.config_dir, &args.base_url) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Failed to initialize application state: {}", e);
            std::process::exit(1);
        }
    };

    let app = Router::new()
        // Landing page
        .route("/", get(handlers::landing::landing_handler))
        // Conformance
        .route(
            "/conformance",
            get(handlers::conformance::conformance_handler),
        )
        // Collections
        .route(
            "/collections",
            get(handlers::collections::list_collections_handler),
        )
        .route(
            "/collections/:collection_id",
            get(handlers::collections::get_collection_handler),
        )
        // Instances
        .route(
            "/collections/:collection_id/instances",
            get(handlers::instances::list_instances_handler),
        )
        // Position query
        .route(
            "/collections/:collection_id/position",
            get(handlers::position::position_handler),
        )
        .route(
            "/collections/:collection_id/instances/:instance_id/position",
            get(handlers::position::instance_position_handler),
        )
        // Locations
        .route(
            "/collections/:collection_id/locations",
            get(handlers::locations::list_locations_handler),
        )
        .route(
            "/collections/:collection_id/locations/:location_id",
            get(handlers::locations::get_location_handler),
        )
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = args.listen.parse().expect("Invalid listen address");

    info!("forecast EDR API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server failed");
}
