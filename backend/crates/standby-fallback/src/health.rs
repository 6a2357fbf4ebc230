use crate::FallbackState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

pub const HEALTH_STATUS: &str = "healthy";
pub const FALLBACK_MODE: &str = "fallback";

/// GET /health - platform health probe
pub async fn health(State(state): State<FallbackState>) -> Response {
    let health = json!({
        "status": HEALTH_STATUS,
        "port": state.port,
        "environment": state.environment,
        "mode": FALLBACK_MODE,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}
