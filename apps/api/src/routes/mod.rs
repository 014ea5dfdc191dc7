pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::matching::handlers as matching_handlers;
use crate::skills::handlers as skill_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching
        .route(
            "/api/v1/roles/:role_id/matching/run",
            post(matching_handlers::handle_run_matching),
        )
        .route(
            "/api/v1/roles/:role_id/matches",
            get(matching_handlers::handle_list_matches),
        )
        .route(
            "/api/v1/matches/:result_id/shortlist",
            patch(matching_handlers::handle_set_shortlist),
        )
        // Availability
        .route(
            "/api/v1/employees/:employee_id/availability",
            get(matching_handlers::handle_availability),
        )
        // Skill resolution / ingest
        .route(
            "/api/v1/skills/ingest",
            post(skill_handlers::handle_skill_ingest),
        )
        .route(
            "/api/v1/skills/resolve",
            post(skill_handlers::handle_skill_resolve),
        )
        .with_state(state)
}
