//! Ratedash REST API
//!
//! HTTP API layer for the rate dashboard, built with Axum. Every analysis
//! endpoint takes the table in the rates backend wire shape
//! ([`TablePayload`](crate::series::TablePayload)).
//!
//! # Endpoints
//!
//! ## Analysis
//! - `POST /api/v1/statistics` - Per-series statistics
//! - `POST /api/v1/axis` - Secondary axis decision and display order
//! - `POST /api/v1/analyze` - Statistics and axis decision, optionally for a period
//!
//! ## Transforms
//! - `POST /api/v1/normalize` - Rebase every series to 100
//! - `POST /api/v1/spread` - Difference or ratio of two series
//! - `POST /api/v1/correlations` - Pairwise correlations
//!
//! ## Periods
//! - `GET /api/v1/periods` - Quick-select period presets
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use ratedash::api::{serve, AppState};
//! use ratedash::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     serve(AppState::new(config.api, config.analysis)).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Analysis routes
        .route("/statistics", post(routes::statistics::compute_statistics))
        .route("/axis", post(routes::axis::advise_axis))
        .route("/analyze", post(routes::analyze::analyze))
        // Transform routes
        .route("/normalize", post(routes::transform::normalize_table))
        .route("/spread", post(routes::transform::spread))
        .route("/correlations", post(routes::correlations::get_correlations))
        // Period presets
        .route("/periods", get(routes::periods::list_periods))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let timeout = TimeoutLayer::new(Duration::from_secs(state.config.request_timeout_secs));
    let cors = cors_layer(&state.config);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(timeout)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive when no origins are configured, otherwise an allow-list
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Start the API server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Ratedash API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Ratedash API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
