//! synthdb-api library - catalog and submission service
//!
//! Public read API over the normalized synthesizer catalog, a public
//! suggestion intake, the administrative acceptance workflow, and API key
//! issuance.

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

pub mod api;
pub mod db;
pub mod error;
pub mod pagination;
pub mod services;
pub mod validate;

pub use error::{ApiError, ApiResult};
use services::mailer::Mailer;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog database connection pool
    pub db: SqlitePool,
    /// Outbound mail dispatch for issued API keys
    pub mailer: Arc<Mailer>,
    /// Startup timestamp for health reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, mailer: Arc<Mailer>) -> Self {
        Self {
            db,
            mailer,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, patch, post};
    use tower_http::cors::CorsLayer;
    use tower_http::trace::TraceLayer;

    Router::new()
        .route("/apikey", post(api::issue_api_key))
        .route("/suggestions", post(api::submit_suggestion))
        .route("/admin/:id/accept", patch(api::accept_suggestion))
        .route("/manufacturers", get(api::list_manufacturers))
        .route("/manufacturers/:ident", get(api::get_manufacturer))
        .route("/synths", get(api::list_synths))
        .route("/synths/:ident", get(api::get_synth))
        .merge(api::health_routes())
        .fallback(api::unavailable_route)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
