//! REST API module using Axum
//!
//! HTTP boundary for the diagnostic orchestrator:
//! - `POST /api/run/:agent` — execute one agent run
//! - `GET /api/health` — liveness probe
//!
//! Every response is a JSON envelope: `{ok: true, report, viz?}` on
//! success, `{ok: false, error}` with 400 (unknown agent) or 500 (any
//! unhandled orchestration failure) otherwise.

mod handlers;

pub use handlers::ApiState;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router.
///
/// CORS is wide open: the API serves read-only diagnostics to a dashboard
/// that may live on another origin.
pub fn create_app(state: ApiState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/run/:agent", post(handlers::run_agent))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
