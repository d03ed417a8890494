use crate::error::{AppError, Result};
use crate::models::route::LoopRouteRequest;
use crate::models::LoopSummary;
use crate::services::map_sink::MapSnapshot;
use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct LoopRouteResponse {
    pub summary: LoopSummary,
    pub map: MapSnapshot,
}

/// POST /routes/loop
/// Submit a start point and target distance; plans the loop, routes all four
/// legs, and returns the per-leg outcomes plus the resulting map state.
pub async fn create_loop_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoopRouteRequest>,
) -> Result<Json<LoopRouteResponse>> {
    // Validate request
    request.validate().map_err(AppError::InvalidRequest)?;

    let start = request.start_point();

    tracing::info!(
        lat = start.coordinates.lat,
        lng = start.coordinates.lng,
        distance_miles = start.distance_miles,
        mode = %request.mode,
        "Loop route request: '{}' ({:.4}, {:.4}), {:.1}mi, mode={}",
        start.title, start.coordinates.lat, start.coordinates.lng,
        start.distance_miles, request.mode
    );

    let summary = state.orchestrator.route_loop(&start, &request.mode).await;

    Ok(Json(LoopRouteResponse {
        summary,
        map: state.map.snapshot(),
    }))
}

/// GET /map
/// Current map contents: published paths, start marker, viewport.
pub async fn get_map(State(state): State<Arc<AppState>>) -> Json<MapSnapshot> {
    Json(state.map.snapshot())
}
