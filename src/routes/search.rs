use crate::error::Result;
use crate::services::geocoding::PlaceMatch;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<PlaceMatch>,
}

/// GET /search?q=...
/// Resolve a typed place name to coordinate candidates. The client submits
/// the chosen (name, coordinate) pair back through POST /routes/loop.
pub async fn search_places(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let results = state.geocoding.search(&params.q).await?;

    tracing::debug!(
        query = %params.q,
        results = results.len(),
        "Place search '{}' returned {} candidates",
        params.q,
        results.len()
    );

    Ok(Json(SearchResponse { results }))
}
