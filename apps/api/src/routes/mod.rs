pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::checkout::handlers::handle_checkout;
use crate::reading::handlers::handle_analyze;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/analyze", post(handle_analyze))
        .route("/checkout", post(handle_checkout))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
