//! Dynamic SQL construction for the jobs table
//!
//! Two builders live here: a partial-update builder that turns a sparse
//! payload into `"column"=$n` assignments with aligned parameter values,
//! and a search-query builder that composes optional filters into one
//! parameterized SELECT. Filter values are always bound, never spliced
//! into the SQL text, and placeholder indices follow append order so the
//! values sequence lines up with the statement exactly.

use jobly_common::{Error, Result};
use jobly_db::SqlValue;
use serde::Deserialize;

/// Static mapping from logical (client-facing) field names to physical
/// column names.
///
/// The lookup is total: a logical name without an explicit mapping passes
/// through unchanged. Callers that care about typos becoming column names
/// rely on the identifier check in [`build_assignments`].
pub struct FieldMap {
    entries: &'static [(&'static str, &'static str)],
}

impl FieldMap {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    pub fn column<'a>(&'a self, logical: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(l, _)| *l == logical)
            .map(|(_, c)| *c)
            .unwrap_or(logical)
    }
}

/// Field map for the mutable columns of `jobs`. `companyHandle` is
/// immutable after creation and deliberately absent.
pub static JOB_FIELD_MAP: FieldMap = FieldMap::new(&[
    ("title", "title"),
    ("salary", "salary"),
    ("equity", "equity"),
]);

/// A sparse update payload: logical field name → new value, in insertion
/// order. Order matters because placeholder indices are positional.
#[derive(Debug, Clone, Default)]
pub struct UpdatePayload {
    fields: Vec<(String, SqlValue)>,
}

impl UpdatePayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any earlier value for the same name without
    /// disturbing its position.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<SqlValue>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.fields.iter().map(|(f, v)| (f.as_str(), v))
    }
}

/// Build the SET fragment of a partial UPDATE.
///
/// Returns the joined `"column"=$n` assignments and the values aligned
/// 1:1 with the placeholders. The only validation performed here is the
/// structural one: an empty payload is rejected with `EmptyPayload`.
/// Value shapes and ranges belong to the schema validator upstream.
pub fn build_assignments(
    payload: &UpdatePayload,
    map: &FieldMap,
) -> Result<(String, Vec<SqlValue>)> {
    if payload.is_empty() {
        return Err(Error::EmptyPayload);
    }

    let mut fragments = Vec::with_capacity(payload.len());
    let mut values = Vec::with_capacity(payload.len());
    for (idx, (field, value)) in payload.iter().enumerate() {
        let column = map.column(field);
        ensure_identifier(column)?;
        fragments.push(format!("\"{}\"=${}", column, idx + 1));
        values.push(value.clone());
    }

    Ok((fragments.join(", "), values))
}

/// Column names come from a static lookup table (or its pass-through
/// fallback), never from raw user input, so anything outside
/// `[A-Za-z0-9_]` is a misconfiguration rather than a client error.
fn ensure_identifier(column: &str) -> Result<()> {
    let valid = !column.is_empty()
        && column
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::Internal(format!(
            "invalid column identifier `{column}`"
        )))
    }
}

/// Optional search criteria for jobs. Any subset is valid, including the
/// empty one; present filters combine conjunctively.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchFilters {
    pub title: Option<String>,
    pub min_salary: Option<i64>,
    pub has_equity: Option<bool>,
}

/// Build the filtered jobs SELECT.
///
/// Starts from the base projection joined to the owning company and
/// appends one parameterized predicate per present filter, AND-joined:
/// - `title` → case-insensitive substring match, value bound
/// - `minSalary` → `salary >= $n`
/// - `hasEquity == true` → `equity > 0` (literal, no parameter);
///   false or absent adds nothing
///
/// Validation happens before any SQL text is assembled.
pub fn build_search_query(filters: &SearchFilters) -> Result<(String, Vec<SqlValue>)> {
    if let Some(min_salary) = filters.min_salary {
        if min_salary < 0 {
            return Err(Error::InvalidFilter(
                "minSalary must be non-negative".to_string(),
            ));
        }
    }

    let mut sql = String::from(
        "SELECT j.id, j.title, j.salary, j.equity, j.company_handle, \
         c.name AS company_name \
         FROM jobs j \
         JOIN companies c ON c.handle = j.company_handle",
    );
    let mut predicates: Vec<String> = Vec::new();
    let mut values: Vec<SqlValue> = Vec::new();

    if let Some(title) = &filters.title {
        values.push(SqlValue::Text(title.clone()));
        predicates.push(format!("j.title ILIKE '%' || ${} || '%'", values.len()));
    }
    if let Some(min_salary) = filters.min_salary {
        values.push(SqlValue::Int(min_salary));
        predicates.push(format!("j.salary >= ${}", values.len()));
    }
    if filters.has_equity == Some(true) {
        predicates.push("j.equity > 0".to_string());
    }

    if !predicates.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&predicates.join(" AND "));
    }
    sql.push_str(" ORDER BY j.title");

    Ok((sql, values))
}
