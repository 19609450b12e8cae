//! Manufacturer read endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::db::manufacturers::{self, Manufacturer};
use crate::pagination::Page;
use crate::{ApiError, ApiResult, AppState};

/// Response body for GET /manufacturers
#[derive(Debug, Serialize)]
pub struct ManufacturerListResponse {
    /// Total matching rows, not the page size
    pub count: i64,
    pub manufacturers: Vec<Manufacturer>,
}

/// GET /manufacturers?limit&offset
pub async fn list_manufacturers(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ManufacturerListResponse>> {
    let page = Page::from_query(&params).map_err(ApiError::Validation)?;

    let (count, manufacturers) = manufacturers::list(&state.db, page.limit, page.offset).await?;

    if manufacturers.is_empty() {
        return Err(ApiError::NotFound("No manufacturers found".to_string()));
    }

    Ok(Json(ManufacturerListResponse {
        count,
        manufacturers,
    }))
}

/// GET /manufacturers/:nameOrId
pub async fn get_manufacturer(
    State(state): State<AppState>,
    Path(ident): Path<String>,
) -> ApiResult<Json<Manufacturer>> {
    manufacturers::find_by_ident(&state.db, &ident)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No manufacturer found".to_string()))
}
