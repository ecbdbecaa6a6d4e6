pub mod health;
pub mod page;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.max_upload_bytes;

    Router::new()
        .route("/", get(page::index_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/search/resume",
            post(handlers::handle_resume_search),
        )
        .route(
            "/api/v1/search/skills",
            post(handlers::handle_skills_search),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
