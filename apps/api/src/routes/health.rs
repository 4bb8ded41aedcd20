use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version, and which optional providers are active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "compass-api",
        "catalog_size": state.engine.catalog().len(),
        "ai_provider": state.engine.ai_provider(),
        "job_market": state.engine.market_enabled(),
    }))
}
