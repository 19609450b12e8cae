//! API key issuance endpoint

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::db::api_keys;
use crate::validate::{check_fields, get_str, FieldKind, FieldRule};
use crate::{ApiError, ApiResult, AppState};

const APIKEY_RULES: &[FieldRule] = &[FieldRule::required("email", FieldKind::Email)];

/// Response body for POST /apikey
#[derive(Debug, Serialize)]
pub struct ApiKeyResponse {
    pub message: String,
}

/// POST /apikey
///
/// One key per email. The key is delivered by mail only, never in the
/// response body.
pub async fn issue_api_key(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<ApiKeyResponse>)> {
    let errors = check_fields(APIKEY_RULES, &body);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let email = get_str(&body, "email").unwrap_or_default();
    let key = Uuid::new_v4().to_string();

    let created = api_keys::insert_key(&state.db, &email, &key).await?;
    if !created {
        return Err(ApiError::Conflict("You already have a key!".to_string()));
    }

    tracing::info!(recipient = %email, "API key issued");

    // Fire-and-forget: the key row exists, so this stays a 201 even if
    // delivery later fails (failures are logged by the mailer).
    state.mailer.dispatch_api_key(email.clone(), key);

    Ok((
        StatusCode::CREATED,
        Json(ApiKeyResponse {
            message: format!("Your API key has been sent to {}", email),
        }),
    ))
}
