//! Documentation of a household water and waste tracking platform.
//!
//! # General Infrastructure
//! - Browser frontend talks to this single Rust backend over REST
//! - Backend persists to flat JSON files on disk, one file per logical table
//! - Each request reads its table fully, mutates in memory, rewrites it fully
//! - No background jobs, no queues, no cross-service communication
//! - Static frontend assets are served straight from a configurable directory
//!
//!
//!
//! # Notes
//!
//! ## Why flat files
//! The dataset is tiny: at most a few hundred accounts, each with a handful of
//! weekly entries. Every endpoint needs most of a table anyway (the leaderboard
//! walks all users, insights walk a whole log), so whole-file reads are not
//! wasted work at this scale.
//!
//! We do run into an issue of concurrent writers. A per-table async mutex
//! serializes read-modify-write cycles inside the process; across processes the
//! model stays last-write-wins, which is acceptable for a single-instance
//! deployment.
//!
//!
//!
//! # Setup
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
//!
//! Run the server with logs.
//! ```sh
//! RUST_LOG=info cargo run -p ecotrack
//! ```
//!
//! Smoke-test a running server.
//! ```sh
//! cargo run -p tester
//! ```
//!
//! Environment:
//! - `RUST_PORT`: listen port, default 1111
//! - `ECOTRACK_DATA_DIR`: table directory, default `data`
//! - `ECOTRACK_STATIC_DIR`: frontend asset directory, default `public`
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod analysis;
pub mod config;
pub mod database;
pub mod error;
pub mod inputs;
pub mod insights;
pub mod quality;
pub mod routes;
pub mod state;
pub mod user;
pub mod utils;

use routes::{
    analyze_handler, dashboard_handler, inputs_handler, insights_handler, leaderboard_handler,
    login_handler, quality_city_handler, quality_handler, quality_state_handler, register_handler,
};
use state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let assets = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/api/user/register", post(register_handler))
        .route("/api/user/login", post(login_handler))
        .route("/api/user/dashboard", get(dashboard_handler))
        .route("/api/user/inputs", post(inputs_handler))
        .route("/api/water-quality", get(quality_handler))
        .route("/api/water-quality/{state}", get(quality_state_handler))
        .route("/api/water-quality/{state}/{city}", get(quality_city_handler))
        .route("/api/ai/analyze", post(analyze_handler))
        .route("/api/insights/{user_id}", get(insights_handler))
        .route("/api/leaderboard", get(leaderboard_handler))
        .fallback_service(assets)
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
