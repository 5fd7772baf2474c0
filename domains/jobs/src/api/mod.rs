//! HTTP API for the jobs domain

pub mod handlers;
pub mod routes;

pub use routes::routes;

use crate::repository::JobRepository;

/// Shared state for jobs handlers.
#[derive(Clone)]
pub struct JobsState {
    pub repo: JobRepository,
}
