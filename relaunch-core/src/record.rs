//! The typed record contract.
//!
//! A record is any type the query layer can materialize from a result row.
//! Every record type carries a static column table with one entry per field:
//! the column name, the field kind, and a getter/setter pair. Parsers assign
//! fields through the setters; export enumerates them through the getters,
//! so a field can never be exported without also being settable.

use std::fmt;

use crate::row::Value;

/// Kind of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Number,
    String,
    Boolean,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::String => "string",
            FieldKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field value already coerced to its column's kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Number(i64),
    Text(String),
    Boolean(bool),
}

impl FieldValue {
    /// The value a field holds before anything is assigned to it.
    pub fn zero(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Number => FieldValue::Number(0),
            FieldKind::String => FieldValue::Text(String::new()),
            FieldKind::Boolean => FieldValue::Boolean(false),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Number(_) => FieldKind::Number,
            FieldValue::Text(_) => FieldKind::String,
            FieldValue::Boolean(_) => FieldKind::Boolean,
        }
    }

    pub fn into_i64(self) -> i64 {
        match self {
            FieldValue::Number(n) => n,
            FieldValue::Boolean(b) => i64::from(b),
            FieldValue::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }

    pub fn into_string(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            other => other.to_string(),
        }
    }

    pub fn into_bool(self) -> bool {
        match self {
            FieldValue::Boolean(b) => b,
            FieldValue::Number(n) => n != 0,
            FieldValue::Text(s) => s.eq_ignore_ascii_case("true") || s.trim() == "1",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// One entry of a record's column table.
pub struct Column<R> {
    /// Exact, case-sensitive result column name.
    pub name: &'static str,
    pub kind: FieldKind,
    pub get: fn(&R) -> FieldValue,
    pub set: fn(&mut R, FieldValue),
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// An enumerated field: `(name, value-as-text, kind)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub value: String,
    pub kind: FieldKind,
}

impl Field {
    /// Convert the textual value back into the raw value a query engine
    /// would have produced for this field.
    pub fn to_value(&self) -> Value {
        match self.kind {
            FieldKind::Number => self
                .value
                .parse::<i64>()
                .map(Value::Integer)
                .unwrap_or(Value::Null),
            FieldKind::String => Value::Text(self.value.clone()),
            FieldKind::Boolean => Value::Integer(i64::from(self.value == "true")),
        }
    }
}

/// The closed set of record types the query layer knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Product,
    User,
    LaunchTask,
    LaunchParameters,
    TaskType,
    LastInsertId,
    SchemaEntry,
}

impl RecordKind {
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Product => "product",
            RecordKind::User => "user",
            RecordKind::LaunchTask => "launch task",
            RecordKind::LaunchParameters => "launch parameters",
            RecordKind::TaskType => "task type",
            RecordKind::LastInsertId => "last insert id",
            RecordKind::SchemaEntry => "schema entry",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A type the query layer can materialize from a result row.
///
/// `Default` provides the zero-valued record every row starts from;
/// `COLUMNS` is the static dispatch table the parser walks.
pub trait Record: Default + Sized + 'static {
    const KIND: RecordKind;
    const COLUMNS: &'static [Column<Self>];

    /// Look up the column entry for an exact result column name.
    fn column(name: &str) -> Option<&'static Column<Self>> {
        Self::COLUMNS.iter().find(|c| c.name == name)
    }

    /// Enumerate fields in column-table order.
    fn fields(&self) -> Vec<Field> {
        Self::COLUMNS
            .iter()
            .map(|c| Field {
                name: c.name,
                value: (c.get)(self).to_string(),
                kind: c.kind,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/record_tests.rs"]
mod tests;
