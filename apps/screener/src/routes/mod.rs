pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/screenings",
            post(handlers::handle_screen_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/candidates", get(handlers::handle_list_candidates))
        .route("/api/v1/rubric", get(handlers::handle_get_rubric))
        .with_state(state)
}
