pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::discovery::handlers as discovery;
use crate::interview::handlers as interview;
use crate::optimizer::handlers as optimizer;
use crate::outreach::handlers as outreach;
use crate::search_config::handlers as search_config;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job discovery
        .route("/api/v1/jobs/search", post(discovery::handle_search))
        .route(
            "/api/v1/jobs/preferences",
            post(discovery::handle_preferences),
        )
        .route("/api/v1/companies/:name", get(discovery::handle_company))
        // Search configurations
        .route(
            "/api/v1/search-configs",
            get(search_config::handle_list).post(search_config::handle_create),
        )
        .route(
            "/api/v1/search-configs/:name",
            delete(search_config::handle_delete),
        )
        .route(
            "/api/v1/search-configs/:name/activate",
            post(search_config::handle_activate),
        )
        // Resume optimizer
        .route("/api/v1/resume/optimize", post(optimizer::handle_optimize))
        .route("/api/v1/resume/refine", post(optimizer::handle_refine))
        // Outreach
        .route("/api/v1/outreach", post(outreach::handle_generate))
        .route("/api/v1/outreach/refine", post(outreach::handle_refine))
        // Interview prep
        .route("/api/v1/interview-prep", post(interview::handle_research))
        .with_state(state)
}
