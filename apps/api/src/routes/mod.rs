pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API
        .route(
            "/api/generate-hooks",
            post(handlers::handle_generate_hooks),
        )
        .route(
            "/api/generate-angles",
            post(handlers::handle_generate_angles),
        )
        .route(
            "/api/generate-script",
            post(handlers::handle_generate_script),
        )
        .route(
            "/api/generate-captions",
            post(handlers::handle_generate_captions),
        )
        .with_state(state)
}
