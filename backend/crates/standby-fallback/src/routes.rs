use crate::{FallbackState, health, landing};

use axum::{Router, routing::get};

/// Build the fallback router. Unmatched paths get axum's default 404.
pub fn build_router(state: FallbackState) -> Router {
    Router::new()
        .route("/", get(landing::landing))
        .route("/health", get(health::health))
        .with_state(state)
}
