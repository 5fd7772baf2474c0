//! Query-execution interface for Jobly
//!
//! Domain repositories never talk to a driver directly. They issue
//! parameterized SQL through the [`QueryExecutor`] trait and read results
//! back as [`Row`] values, which keeps them testable against an in-memory
//! double and independent of the concrete pool. [`PgExecutor`] is the
//! production implementation on top of `sqlx`/PostgreSQL.

pub mod executor;
pub mod value;

pub use executor::{PgExecutor, QueryExecutor};
pub use value::{Row, SqlValue};
