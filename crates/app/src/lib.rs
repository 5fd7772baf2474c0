//! Jobly application composition root
//!
//! Wires the executor, repository, and domain routes into a single
//! application. Connection lifecycle belongs here, not in the
//! repositories.

use std::sync::Arc;

use axum::Router;
use jobly_db::PgExecutor;
use jobly_jobs::{JobRepository, JobsState};
use sqlx::PgPool;

/// Create the main application router with all routes
pub fn create_app(pool: PgPool) -> Router {
    let executor = Arc::new(PgExecutor::new(pool));
    let jobs_state = JobsState {
        repo: JobRepository::new(executor),
    };

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/", axum::routing::get(|| async { "Jobly API v0.1.0" }))
        .merge(jobly_jobs::routes().with_state(jobs_state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
