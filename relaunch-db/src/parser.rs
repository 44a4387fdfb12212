//! Result parser dispatch.
//!
//! Turns one engine row into a typed record by walking the row's columns,
//! looking each name up in the record's column table, coercing the raw
//! value to the column's kind, and calling the column's setter.

use std::str::FromStr;

use relaunch_core::{Column, FieldKind, FieldValue, Record, ResultRow, Value};

use crate::error::DbError;

/// Supported backing stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    #[default]
    Sqlite,
}

impl Engine {
    pub fn name(&self) -> &'static str {
        match self {
            Engine::Sqlite => "sqlite",
        }
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Engine {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Engine::Sqlite),
            _ => Err(DbError::unsupported_engine(s)),
        }
    }
}

/// What to do when a statement placeholder has no parameter, or a record
/// column is absent from the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Log and carry on. Placeholders stay unbound, fields keep zero values.
    #[default]
    Warn,
    /// Fail the statement.
    Error,
}

/// Row parser for SQLite results.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteParser {
    missing_column: MissingPolicy,
}

impl SqliteParser {
    pub fn new(missing_column: MissingPolicy) -> Self {
        Self { missing_column }
    }

    /// Parser for the given engine.
    pub fn for_engine(engine: Engine, missing_column: MissingPolicy) -> Self {
        match engine {
            Engine::Sqlite => Self::new(missing_column),
        }
    }

    /// Assign every recognized column of `row` to `record`.
    ///
    /// Unrecognized columns are ignored. Record columns absent from the row
    /// are handled according to the missing-column policy.
    pub fn populate<R: Record>(&self, record: &mut R, row: &dyn ResultRow) -> Result<(), DbError> {
        let mut assigned: Vec<&'static str> = Vec::with_capacity(R::COLUMNS.len());

        for index in 0..row.column_count() {
            let Some(name) = row.column_name(index) else {
                continue;
            };
            let Some(column) = R::column(name) else {
                continue;
            };
            let raw = row.value(index).unwrap_or(Value::Null);
            (column.set)(record, coerce::<R>(column, raw)?);
            assigned.push(column.name);
        }

        for column in R::COLUMNS.iter().filter(|c| !assigned.contains(&c.name)) {
            match self.missing_column {
                MissingPolicy::Warn => {
                    log::warn!(
                        "Result has no '{}' column for {} record; leaving it empty",
                        column.name,
                        R::KIND
                    );
                }
                MissingPolicy::Error => {
                    return Err(DbError::MissingColumn {
                        record: R::KIND,
                        column: column.name,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Coerce a raw SQLite value to the kind a column expects.
///
/// NULL becomes the kind's zero value; booleans are read from integers.
fn coerce<R: Record>(column: &Column<R>, raw: Value) -> Result<FieldValue, DbError> {
    let mismatch = |found: &'static str| DbError::TypeMismatch {
        record: R::KIND,
        column: column.name,
        expected: column.kind,
        found,
    };

    let value = match (column.kind, raw) {
        (kind, Value::Null) => FieldValue::zero(kind),

        (FieldKind::Number, Value::Integer(n)) => FieldValue::Number(n),
        (FieldKind::Number, Value::Real(f)) => FieldValue::Number(f as i64),
        (FieldKind::Number, Value::Text(s)) => FieldValue::Number(
            s.trim().parse().map_err(|_| mismatch("non-numeric text"))?,
        ),

        (FieldKind::String, Value::Text(s)) => FieldValue::Text(s),
        (FieldKind::String, Value::Integer(n)) => FieldValue::Text(n.to_string()),
        (FieldKind::String, Value::Real(f)) => FieldValue::Text(f.to_string()),
        (FieldKind::String, Value::Blob(b)) => {
            FieldValue::Text(String::from_utf8_lossy(&b).into_owned())
        }

        (FieldKind::Boolean, Value::Integer(n)) => FieldValue::Boolean(n != 0),
        (FieldKind::Boolean, Value::Real(f)) => FieldValue::Boolean(f != 0.0),
        (FieldKind::Boolean, Value::Text(s)) => match s.trim() {
            "1" => FieldValue::Boolean(true),
            "0" => FieldValue::Boolean(false),
            t if t.eq_ignore_ascii_case("true") => FieldValue::Boolean(true),
            t if t.eq_ignore_ascii_case("false") => FieldValue::Boolean(false),
            _ => return Err(mismatch("text")),
        },

        (_, other) => return Err(mismatch(other.type_name())),
    };
    Ok(value)
}
