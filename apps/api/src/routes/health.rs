use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a status object with service version and the active answer backend.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "portfolio-api",
        "backend": state.backend(),
        "projects": state.knowledge.projects().len(),
        "data_source": state.config.data_path.display().to_string()
    }))
}
