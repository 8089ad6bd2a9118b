use axum::Json;
use serde_json::{Value, json};

pub async fn health() -> Json<Value> {
    Json(json!({
        "message": "beacon signaling coordinator is running",
        "status": "healthy",
    }))
}
