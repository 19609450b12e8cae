//! Synth read endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::db::synths::{self, SynthDetail, SynthFilters};
use crate::pagination::Page;
use crate::{ApiError, ApiResult, AppState};

/// Response body for GET /synths
#[derive(Debug, Serialize)]
pub struct SynthListResponse {
    /// Total matching rows, not the page size
    pub count: i64,
    pub rows: Vec<SynthDetail>,
}

/// GET /synths?filters&limit&offset
///
/// Any subset of the descriptive attributes plus `manufacturer` may be
/// given as exact-match filters; they combine with AND.
pub async fn list_synths(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<SynthListResponse>> {
    let mut errors = Vec::new();

    let page = match Page::from_query(&params) {
        Ok(page) => page,
        Err(mut page_errors) => {
            errors.append(&mut page_errors);
            Page::default()
        }
    };

    let mut filters = SynthFilters {
        manufacturer: params.get("manufacturer").cloned(),
        polyphony: params.get("polyphony").cloned(),
        keyboard: params.get("keyboard").cloned(),
        control: params.get("control").cloned(),
        memory: params.get("memory").cloned(),
        oscillators: params.get("oscillators").cloned(),
        filter: params.get("filter").cloned(),
        lfo: params.get("lfo").cloned(),
        effects: params.get("effects").cloned(),
        ..Default::default()
    };
    if let Some(raw) = params.get("yearProduced") {
        match raw.parse::<i64>() {
            Ok(year) => filters.year_produced = Some(year),
            Err(_) => errors.push("yearProduced must be a number".to_string()),
        }
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let (count, rows) = synths::list(&state.db, &filters, page.limit, page.offset).await?;

    if rows.is_empty() {
        return Err(ApiError::NotFound("No synths found".to_string()));
    }

    Ok(Json(SynthListResponse { count, rows }))
}

/// GET /synths/:nameOrId
pub async fn get_synth(
    State(state): State<AppState>,
    Path(ident): Path<String>,
) -> ApiResult<Json<SynthDetail>> {
    synths::find_by_ident(&state.db, &ident)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No synth found".to_string()))
}
