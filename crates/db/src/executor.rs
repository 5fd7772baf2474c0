//! The narrow query-execution boundary and its PostgreSQL implementation

use async_trait::async_trait;
use jobly_common::{Error, Result};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{Column, PgPool, Row as _, TypeInfo};

use crate::value::{Row, SqlValue};

/// Executes a parameterized statement and returns all result rows.
///
/// Positional `$n` placeholder semantics; write statements are expected to
/// carry a RETURNING clause when the caller needs rows back.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>>;
}

/// Production executor backed by a sqlx PostgreSQL pool.
///
/// Pool lifecycle (connection limits, timeouts, release) belongs to the
/// composition root; this type only borrows the pool per statement.
#[derive(Clone)]
pub struct PgExecutor {
    pool: PgPool,
}

impl PgExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryExecutor for PgExecutor {
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
        tracing::debug!(sql, params = params.len(), "executing statement");

        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                // NULL parameters only ever target the nullable numeric
                // columns of this schema, and NUMERIC assignment-casts to
                // both INTEGER and NUMERIC.
                SqlValue::Null => query.bind(Option::<Decimal>::None),
                SqlValue::Bool(v) => query.bind(*v),
                SqlValue::Int(v) => query.bind(*v),
                SqlValue::Decimal(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.clone()),
            };
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(translate_db_error)?;
        rows.iter().map(decode_row).collect()
    }
}

/// Constraint-class database errors (foreign key, unique, not-null, check)
/// surface as `ConstraintViolation`; everything else passes through.
fn translate_db_error(err: sqlx::Error) -> Error {
    use sqlx::error::ErrorKind;

    if let sqlx::Error::Database(db) = &err {
        match db.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => {
                return Error::ConstraintViolation(db.message().to_string());
            }
            _ => {}
        }
    }
    Error::Database(err)
}

fn decode_row(row: &PgRow) -> Result<Row> {
    let mut decoded = Row::new();
    for col in row.columns() {
        let idx = col.ordinal();
        let value = match col.type_info().name() {
            "INT2" => row
                .try_get::<Option<i16>, _>(idx)?
                .map(|v| SqlValue::Int(v as i64)),
            "INT4" => row
                .try_get::<Option<i32>, _>(idx)?
                .map(|v| SqlValue::Int(v as i64)),
            "INT8" => row.try_get::<Option<i64>, _>(idx)?.map(SqlValue::Int),
            "NUMERIC" => row
                .try_get::<Option<Decimal>, _>(idx)?
                .map(SqlValue::Decimal),
            "BOOL" => row.try_get::<Option<bool>, _>(idx)?.map(SqlValue::Bool),
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => row
                .try_get::<Option<String>, _>(idx)?
                .map(SqlValue::Text),
            other => {
                return Err(Error::Internal(format!(
                    "unsupported column type `{other}` for column `{}`",
                    col.name()
                )))
            }
        };
        decoded = decoded.with(col.name(), value.unwrap_or(SqlValue::Null));
    }
    Ok(decoded)
}
