mod health;
mod metrics;
mod generate;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use generate::{events_handler, features_handler, snapshot_handler, submit_handler};

use axum::{
    Router,
    routing::get,
};
use std::sync::Arc;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/generators", get(features_handler))
        .route(
            "/api/generators/{feature}",
            get(snapshot_handler).post(submit_handler),
        )
        .route("/api/generators/{feature}/events", get(events_handler))
        .with_state(state)
}
