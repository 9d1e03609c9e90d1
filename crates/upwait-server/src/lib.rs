//! HTTP endpoint for upwait.
//!
//! One JSON endpoint answers all queries and accepts votes:
//!
//! - `GET ?search=<name>` exact lookup (404 when unknown)
//! - `GET ?suggest=<term>` up to five ranked suggestions
//! - `GET ?trending` most recently voted items
//! - `GET ?popular_devices` most voted items
//! - `POST {name, voteType}` cast one vote
//! - `OPTIONS` preflight
//!
//! Every response carries the same permissive CORS headers and a JSON
//! content type. The endpoint is mounted at `/api/updates` and at `/`.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue},
    routing::{get, MethodRouter},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{info, warn};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use config::ServerConfig;
use routes::{method_not_allowed, not_found, preflight_handler, query_handler, vote_handler};
use state::AppState;

/// Path the endpoint is mounted at.
pub const API_PATH: &str = "/api/updates";

/// Build the application router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    let endpoint: MethodRouter<Arc<AppState>> = get(query_handler)
        .post(vote_handler)
        .options(preflight_handler)
        .head(method_not_allowed)
        .fallback(method_not_allowed);

    Router::new()
        .route(API_PATH, endpoint.clone())
        .route("/", endpoint)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .with_state(state)
}

/// Open the store, bind, and serve until Ctrl+C or SIGTERM.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    info!("Initializing state...");
    let state = AppState::new(&config.core_context()).context("Failed to open item store")?;

    let app = router(state);

    let address = config.address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
