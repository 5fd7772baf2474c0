//! Route definitions for the jobs domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use super::JobsState;

/// Create all jobs domain API routes
pub fn routes() -> Router<JobsState> {
    Router::new()
        .route("/v1/jobs", post(handlers::create_job).get(handlers::list_jobs))
        .route(
            "/v1/jobs/{id}",
            get(handlers::get_job)
                .patch(handlers::update_job)
                .delete(handlers::delete_job),
        )
}
