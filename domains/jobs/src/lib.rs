//! Jobs domain: dynamic SQL construction, repository, and API

pub mod api;
pub mod domain;
pub mod repository;
pub mod sql;

// Re-export domain types at the crate root for convenience
pub use api::{routes, JobsState};
pub use domain::entities::{Company, Job, JobDetail, JobListing, NewJob};
pub use repository::JobRepository;
pub use sql::{SearchFilters, UpdatePayload};
