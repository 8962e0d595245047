use axum::Json;
use serde_json::{json, Value};

/// `GET /` — liveness payload. Never touches the store.
pub async fn index() -> Json<Value> {
    Json(json!({ "Hello": "Allotment App" }))
}
