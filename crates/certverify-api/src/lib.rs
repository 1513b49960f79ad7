//! # certverify-api: Verification Service
//!
//! Axum service exposing read-only access to the certificate record store.
//!
//! ## API Surface
//!
//! | Path | Module | Purpose |
//! |------|--------|---------|
//! | `/api/verify/{certificateNumber}` | [`routes::verify`] | Case-insensitive certificate lookup |
//! | `/api/verifications` | [`routes::verify`] | List every record |
//! | `/openapi.json` | [`openapi`] | OpenAPI document |
//! | `/health/liveness`, `/health/readiness` | this module | Health checks |
//! | `/metrics` | this module | Counter snapshot |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! There is no authentication layer and no write route. Records are inserted
//! out-of-band through [`certverify_store::VerificationStore::insert`].

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::{Extension, Json, Router};

use crate::middleware::metrics::MetricsSnapshot;

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics = state.metrics.clone();

    let api = Router::new()
        .merge(routes::verify::router())
        .merge(openapi::router())
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(Extension(metrics));

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .route("/metrics", axum::routing::get(metrics_snapshot));

    Router::new()
        .merge(health)
        .merge(api)
        .layer(middleware::tracing_layer::layer())
        .with_state(state)
}

/// Liveness check: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness check: 200 "ready" once the record store answers a ping.
///
/// For the PostgreSQL store the first readiness check also establishes the pool.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ready").into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "record store health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "record store unreachable").into_response()
        }
    }
}

/// GET /metrics: JSON snapshot of the request counters.
async fn metrics_snapshot(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
