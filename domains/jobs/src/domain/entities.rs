//! Job domain entities and row projections
//!
//! Jobs have no lifecycle beyond existing or not; "not found" is an
//! operation outcome, not a state. Each projection knows how to build
//! itself from a result [`Row`].

use jobly_common::Result;
use jobly_db::Row;
use rust_decimal::Decimal;
use serde::Serialize;

/// A job row as stored, the shape returned by create and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl Job {
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.get_i64("id")?,
            title: row.get_text("title")?,
            salary: row.get_opt_i64("salary")?,
            equity: row.get_opt_decimal("equity")?,
            company_handle: row.get_text("company_handle")?,
        })
    }
}

/// The findAll projection: a job plus its owning company's name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i64,
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
    pub company_name: String,
}

impl JobListing {
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.get_i64("id")?,
            title: row.get_text("title")?,
            salary: row.get_opt_i64("salary")?,
            equity: row.get_opt_decimal("equity")?,
            company_handle: row.get_text("company_handle")?,
            company_name: row.get_text("company_name")?,
        })
    }
}

/// Read-only company projection attached to a job fetched by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: Option<String>,
    pub num_employees: Option<i64>,
    pub logo_url: Option<String>,
}

impl Company {
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            handle: row.get_text("handle")?,
            name: row.get_text("name")?,
            description: row.get_opt_text("description")?,
            num_employees: row.get_opt_i64("num_employees")?,
            logo_url: row.get_opt_text("logo_url")?,
        })
    }
}

/// The get-by-id shape: the company handle is absorbed into the nested
/// company object and not exposed at the top level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    pub id: i64,
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<Decimal>,
    pub company: Company,
}

impl JobDetail {
    pub fn from_parts(job: Job, company: Company) -> Self {
        Self {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company,
        }
    }
}

/// Input for the create operation. The id is generated by storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}
