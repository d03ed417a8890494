use axum::Json;
use serde_json::{json, Value};

/// GET /debug/health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "looproute",
    }))
}
