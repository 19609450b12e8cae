//! Suggestion intake endpoint

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

use crate::db::suggestions::{self, NewSuggestion, Suggestion};
use crate::validate::{check_fields, get_i64, get_str, FieldKind, FieldRule};
use crate::{ApiError, ApiResult, AppState};

/// Rule table for the intake payload. The image is an opaque reference
/// (URL) produced by the external upload pipeline; only the reference is
/// recorded here.
const SUGGESTION_RULES: &[FieldRule] = &[
    FieldRule::required("name", FieldKind::Text),
    FieldRule::required("manufacturer", FieldKind::Text),
    FieldRule::required("yearProduced", FieldKind::Integer),
    FieldRule::required("image", FieldKind::Text),
    FieldRule::optional("polyphony", FieldKind::Text),
    FieldRule::optional("keyboard", FieldKind::Text),
    FieldRule::optional("control", FieldKind::Text),
    FieldRule::optional("memory", FieldKind::Text),
    FieldRule::optional("oscillators", FieldKind::Text),
    FieldRule::optional("filter", FieldKind::Text),
    FieldRule::optional("lfo", FieldKind::Text),
    FieldRule::optional("effects", FieldKind::Text),
];

/// Response body for POST /suggestions
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: String,
    pub data: Suggestion,
}

/// POST /suggestions
pub async fn submit_suggestion(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<SubmitResponse>)> {
    let errors = check_fields(SUGGESTION_RULES, &body);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let new = NewSuggestion {
        name: get_str(&body, "name").unwrap_or_default(),
        manufacturer: get_str(&body, "manufacturer").unwrap_or_default(),
        year_produced: get_i64(&body, "yearProduced").unwrap_or_default(),
        image: get_str(&body, "image").unwrap_or_default(),
        polyphony: get_str(&body, "polyphony"),
        keyboard: get_str(&body, "keyboard"),
        control: get_str(&body, "control"),
        memory: get_str(&body, "memory"),
        oscillators: get_str(&body, "oscillators"),
        filter: get_str(&body, "filter"),
        lfo: get_str(&body, "lfo"),
        effects: get_str(&body, "effects"),
    };

    let suggestion = suggestions::insert(&state.db, &new).await?;

    tracing::info!(
        suggestion_id = suggestion.id,
        name = %suggestion.name,
        "Suggestion submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message: "Thank you for supporting".to_string(),
            data: suggestion,
        }),
    ))
}
