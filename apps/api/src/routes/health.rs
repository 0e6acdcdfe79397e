use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness only; does not touch Postgres or Redis.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "perspecta-api"
    }))
}
