pub mod debug;
pub mod loop_route;
pub mod search;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/routes/loop", post(loop_route::create_loop_route))
        .route("/map", get(loop_route::get_map))
        .route("/search", get(search::search_places))
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
