//! Job API handlers
//!
//! Request DTOs carry the schema validation (via `validator` through
//! `ValidatedJson`); the repository below still defends against the
//! structural empty-payload case itself.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use jobly_common::{Result, ValidatedJson};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use validator::{Validate, ValidationError};

use super::JobsState;
use crate::domain::entities::{Job, JobDetail, JobListing, NewJob};
use crate::sql::{SearchFilters, UpdatePayload};

/// Request for creating a job
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateJobRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 0))]
    pub salary: Option<i64>,
    #[validate(custom(function = "validate_equity"))]
    pub equity: Option<Decimal>,
    #[validate(length(min = 1))]
    pub company_handle: String,
}

/// Request for partially updating a job. All fields optional; the
/// company handle is immutable and deliberately absent.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateJobRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(range(min = 0))]
    pub salary: Option<i64>,
    #[validate(custom(function = "validate_equity"))]
    pub equity: Option<Decimal>,
}

impl UpdateJobRequest {
    /// Lower the request into an insertion-ordered update payload.
    fn into_payload(self) -> UpdatePayload {
        let mut payload = UpdatePayload::new();
        if let Some(title) = self.title {
            payload.set("title", title);
        }
        if let Some(salary) = self.salary {
            payload.set("salary", salary);
        }
        if let Some(equity) = self.equity {
            payload.set("equity", equity);
        }
        payload
    }
}

fn validate_equity(equity: &Decimal) -> std::result::Result<(), ValidationError> {
    if *equity < Decimal::ZERO || *equity > Decimal::ONE {
        return Err(ValidationError::new("equity_out_of_range"));
    }
    Ok(())
}

/// Create a job: 201 + the new row
pub async fn create_job(
    State(state): State<JobsState>,
    ValidatedJson(req): ValidatedJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>)> {
    let job = state
        .repo
        .create(&NewJob {
            title: req.title,
            salary: req.salary,
            equity: req.equity,
            company_handle: req.company_handle,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// List jobs, optionally filtered by title / minSalary / hasEquity
pub async fn list_jobs(
    State(state): State<JobsState>,
    Query(filters): Query<SearchFilters>,
) -> Result<Json<Vec<JobListing>>> {
    let jobs = state.repo.find_all(&filters).await?;
    Ok(Json(jobs))
}

/// Fetch one job with its nested company projection
pub async fn get_job(
    State(state): State<JobsState>,
    Path(id): Path<i64>,
) -> Result<Json<JobDetail>> {
    let job = state.repo.get(id).await?;
    Ok(Json(job))
}

/// Partially update a job
pub async fn update_job(
    State(state): State<JobsState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateJobRequest>,
) -> Result<Json<Job>> {
    let job = state.repo.update(id, &req.into_payload()).await?;
    Ok(Json(job))
}

/// Delete a job: `{"deleted": id}` on success
pub async fn delete_job(
    State(state): State<JobsState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    state.repo.remove(id).await?;
    Ok(Json(json!({ "deleted": id })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::JobRepository;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request};
    use axum::Router;
    use jobly_common::Error;
    use jobly_db::{QueryExecutor, Row, SqlValue};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    struct ScriptedExecutor {
        calls: Mutex<usize>,
        responses: Mutex<VecDeque<Result<Vec<Row>>>>,
    }

    #[async_trait]
    impl QueryExecutor for ScriptedExecutor {
        async fn execute(&self, _sql: &str, _params: &[SqlValue]) -> Result<Vec<Row>> {
            *self.calls.lock().unwrap() += 1;
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn app(responses: Vec<Result<Vec<Row>>>) -> (Router, Arc<ScriptedExecutor>) {
        let executor = Arc::new(ScriptedExecutor {
            calls: Mutex::new(0),
            responses: Mutex::new(responses.into_iter().collect()),
        });
        let state = JobsState {
            repo: JobRepository::new(executor.clone()),
        };
        (crate::api::routes().with_state(state), executor)
    }

    fn job_row() -> Row {
        Row::new()
            .with("id", 7i64)
            .with("title", "Engineer")
            .with("salary", Some(120_000i64))
            .with("equity", Option::<rust_decimal::Decimal>::None)
            .with("company_handle", "acme")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_patch_empty_body_is_empty_payload_error() {
        let (app, executor) = app(vec![]);
        let response = app
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/v1/jobs/7")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "EMPTY_PAYLOAD");
        // No SQL was issued
        assert_eq!(*executor.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_missing_job_is_404() {
        let (app, _) = app(vec![Ok(Vec::new())]);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/jobs/404")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_list_jobs_negative_min_salary_is_400() {
        let (app, executor) = app(vec![]);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/jobs?minSalary=-10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_FILTER");
        assert_eq!(*executor.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_job_returns_201_with_row() {
        let (app, _) = app(vec![Ok(vec![job_row()])]);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/jobs")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"title":"Engineer","salary":120000,"companyHandle":"acme"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["id"], 7);
        assert_eq!(body["companyHandle"], "acme");
    }

    #[tokio::test]
    async fn test_create_job_rejects_out_of_range_equity() {
        let (app, executor) = app(vec![]);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/jobs")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"title":"Engineer","equity":1.5,"companyHandle":"acme"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(*executor.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_job_on_unknown_company_is_400() {
        let (app, _) = app(vec![Err(Error::ConstraintViolation(
            "violates foreign key constraint \"jobs_company_handle_fkey\"".to_string(),
        ))]);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/jobs")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"title":"Engineer","companyHandle":"nope"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "CONSTRAINT_VIOLATION");
    }

    #[tokio::test]
    async fn test_delete_job_returns_deleted_id() {
        let (app, _) = app(vec![Ok(vec![Row::new().with("id", 7i64)])]);
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/v1/jobs/7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["deleted"], 7);
    }

    #[tokio::test]
    async fn test_update_job_rejects_unknown_field() {
        // The schema layer rejects unrecognized keys before they reach
        // the update builder's pass-through fallback.
        let (app, executor) = app(vec![]);
        let response = app
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/v1/jobs/7")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"companyHandle":"other"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(*executor.calls.lock().unwrap(), 0);
    }
}
