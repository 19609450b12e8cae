//! Administrative moderation endpoint

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::db::synths::SynthDetail;
use crate::services::accept::{self, AcceptError};
use crate::{ApiError, ApiResult, AppState};

/// Response body for PATCH /admin/:id/accept
#[derive(Debug, Serialize)]
pub struct AcceptResponse {
    pub message: String,
    pub data: SynthDetail,
}

/// PATCH /admin/:id/accept
///
/// Runs the acceptance workflow for the given suggestion id. A non-integer
/// id token cannot match any suggestion, so it reports the same not-found
/// as a missing id.
pub async fn accept_suggestion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<(StatusCode, Json<AcceptResponse>)> {
    let suggestion_id: i64 = id
        .parse()
        .map_err(|_| ApiError::NotFound("No suggestion found".to_string()))?;

    match accept::accept_suggestion(&state.db, suggestion_id).await {
        Ok(synth) => Ok((
            StatusCode::CREATED,
            Json(AcceptResponse {
                message: "Suggestion accepted".to_string(),
                data: synth,
            }),
        )),
        Err(e @ (AcceptError::SuggestionNotFound | AcceptError::DuplicateSynthName)) => {
            Err(ApiError::NotFound(e.to_string()))
        }
        Err(AcceptError::Database(e)) => Err(e.into()),
    }
}
