//! Job repository
//!
//! Orchestrates the SQL builders against the query-execution interface.
//! Holds no per-call state, so one instance is safe to share across
//! concurrent callers. Storage errors pass through untouched; only
//! row-count / row-presence is inspected to decide NotFound.

use std::sync::Arc;

use jobly_common::{Error, Result};
use jobly_db::{QueryExecutor, SqlValue};

use crate::domain::entities::{Company, Job, JobDetail, JobListing, NewJob};
use crate::sql::{
    build_assignments, build_search_query, SearchFilters, UpdatePayload, JOB_FIELD_MAP,
};

#[derive(Clone)]
pub struct JobRepository {
    executor: Arc<dyn QueryExecutor>,
}

impl JobRepository {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Insert a new job and return it with its generated id.
    ///
    /// A company handle that references no existing company surfaces as
    /// `ConstraintViolation` from the executor.
    pub async fn create(&self, job: &NewJob) -> Result<Job> {
        let rows = self
            .executor
            .execute(
                "INSERT INTO jobs (title, salary, equity, company_handle) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING id, title, salary, equity, company_handle",
                &[
                    job.title.as_str().into(),
                    job.salary.into(),
                    job.equity.into(),
                    job.company_handle.as_str().into(),
                ],
            )
            .await?;
        let row = rows
            .first()
            .ok_or_else(|| Error::Internal("INSERT returned no row".to_string()))?;
        Job::from_row(row)
    }

    /// Find all jobs matching the given filters, each with its company
    /// name. No matches is an empty list, not an error.
    pub async fn find_all(&self, filters: &SearchFilters) -> Result<Vec<JobListing>> {
        let (sql, values) = build_search_query(filters)?;
        let rows = self.executor.execute(&sql, &values).await?;
        rows.iter().map(JobListing::from_row).collect()
    }

    /// Fetch one job with its full company projection.
    ///
    /// The company fetch happens only after the job row confirms
    /// existence; a missing id never costs a second round-trip.
    pub async fn get(&self, id: i64) -> Result<JobDetail> {
        let rows = self
            .executor
            .execute(
                "SELECT id, title, salary, equity, company_handle \
                 FROM jobs WHERE id = $1",
                &[SqlValue::Int(id)],
            )
            .await?;
        let row = rows.first().ok_or_else(|| not_found(id))?;
        let job = Job::from_row(row)?;

        let company_rows = self
            .executor
            .execute(
                "SELECT handle, name, description, num_employees, logo_url \
                 FROM companies WHERE handle = $1",
                &[job.company_handle.as_str().into()],
            )
            .await?;
        // The foreign key guarantees the company row exists.
        let company_row = company_rows.first().ok_or_else(|| {
            Error::Internal(format!(
                "company `{}` missing for job {id}",
                job.company_handle
            ))
        })?;
        let company = Company::from_row(company_row)?;

        Ok(JobDetail::from_parts(job, company))
    }

    /// Partially update a job and return the full updated row.
    ///
    /// An empty payload fails with `EmptyPayload` before any SQL is
    /// issued; callers must treat that as a client error, distinct from
    /// NotFound.
    pub async fn update(&self, id: i64, payload: &UpdatePayload) -> Result<Job> {
        let (set_cols, mut values) = build_assignments(payload, &JOB_FIELD_MAP)?;
        let id_placeholder = values.len() + 1;
        values.push(SqlValue::Int(id));

        let sql = format!(
            "UPDATE jobs SET {set_cols} WHERE id = ${id_placeholder} \
             RETURNING id, title, salary, equity, company_handle"
        );
        let rows = self.executor.execute(&sql, &values).await?;
        let row = rows.first().ok_or_else(|| not_found(id))?;
        Job::from_row(row)
    }

    /// Delete a job.
    pub async fn remove(&self, id: i64) -> Result<()> {
        let rows = self
            .executor
            .execute(
                "DELETE FROM jobs WHERE id = $1 RETURNING id",
                &[SqlValue::Int(id)],
            )
            .await?;
        if rows.is_empty() {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn not_found(id: i64) -> Error {
    Error::NotFound(format!("No job with id {id}"))
}
