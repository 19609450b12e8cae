//! HTTP API handlers for the synthdb service

pub mod admin;
pub mod apikey;
pub mod health;
pub mod manufacturers;
pub mod suggestions;
pub mod synths;

pub use admin::accept_suggestion;
pub use apikey::issue_api_key;
pub use health::health_routes;
pub use manufacturers::{get_manufacturer, list_manufacturers};
pub use suggestions::submit_suggestion;
pub use synths::{get_synth, list_synths};

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Fallback for unmatched routes
pub async fn unavailable_route() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "errors": ["Not found"],
            "message": "You used an unavailable route",
        })),
    )
}
