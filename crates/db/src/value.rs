//! SQL parameter and result-cell values
//!
//! The jobs schema only ever moves booleans, integers, NUMERIC values and
//! text across the wire, so the value type is a closed enum rather than a
//! generic `Any`-style wrapper.

use std::collections::HashMap;

use jobly_common::{Error, Result};
use rust_decimal::Decimal;

/// A single SQL parameter or result cell.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Decimal(Decimal),
    Text(String),
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v as i64)
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        SqlValue::Decimal(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

/// One result row: a mapping from column name to value.
///
/// Accessors return `Error::Internal` on a missing column or a type
/// mismatch — both indicate a broken query projection, not bad client
/// input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: HashMap<String, SqlValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion, used by row decoding and test doubles.
    pub fn with(mut self, name: &str, value: impl Into<SqlValue>) -> Self {
        self.columns.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Result<&SqlValue> {
        self.columns
            .get(name)
            .ok_or_else(|| Error::Internal(format!("missing column `{name}` in result row")))
    }

    pub fn get_i64(&self, name: &str) -> Result<i64> {
        match self.get(name)? {
            SqlValue::Int(v) => Ok(*v),
            other => Err(type_mismatch(name, "integer", other)),
        }
    }

    pub fn get_text(&self, name: &str) -> Result<String> {
        match self.get(name)? {
            SqlValue::Text(v) => Ok(v.clone()),
            other => Err(type_mismatch(name, "text", other)),
        }
    }

    pub fn get_opt_i64(&self, name: &str) -> Result<Option<i64>> {
        match self.get(name)? {
            SqlValue::Null => Ok(None),
            SqlValue::Int(v) => Ok(Some(*v)),
            other => Err(type_mismatch(name, "integer", other)),
        }
    }

    pub fn get_opt_decimal(&self, name: &str) -> Result<Option<Decimal>> {
        match self.get(name)? {
            SqlValue::Null => Ok(None),
            SqlValue::Decimal(v) => Ok(Some(*v)),
            other => Err(type_mismatch(name, "numeric", other)),
        }
    }

    pub fn get_opt_text(&self, name: &str) -> Result<Option<String>> {
        match self.get(name)? {
            SqlValue::Null => Ok(None),
            SqlValue::Text(v) => Ok(Some(v.clone())),
            other => Err(type_mismatch(name, "text", other)),
        }
    }
}

fn type_mismatch(name: &str, expected: &str, got: &SqlValue) -> Error {
    Error::Internal(format!(
        "column `{name}`: expected {expected}, got {got:?}"
    ))
}
