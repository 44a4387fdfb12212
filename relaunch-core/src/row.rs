//! Result rows as seen by a record parser.
//!
//! A query engine exposes each row through [`ResultRow`]: column count,
//! column name at an index, and the raw value at an index. Nothing else
//! about the engine leaks across this boundary.

use crate::record::{Field, Record};

/// A raw column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
        }
    }
}

/// Narrow, engine-agnostic view of one result row.
pub trait ResultRow {
    fn column_count(&self) -> usize;
    fn column_name(&self, index: usize) -> Option<&str>;
    fn value(&self, index: usize) -> Option<Value>;
}

/// An owned row of named values.
///
/// Used to feed exported fields back through a parser, and as a stand-in
/// for engine rows in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRow {
    columns: Vec<(String, Value)>,
}

impl MemoryRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.columns.push((name.into(), value));
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.columns.push((name.into(), value));
    }

    /// Build a row from enumerated fields.
    pub fn from_fields(fields: &[Field]) -> Self {
        let mut row = Self::new();
        for field in fields {
            row.push(field.name, field.to_value());
        }
        row
    }

    /// Build a row from a record's own field enumeration.
    pub fn from_record<R: Record>(record: &R) -> Self {
        Self::from_fields(&record.fields())
    }
}

impl ResultRow for MemoryRow {
    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|(name, _)| name.as_str())
    }

    fn value(&self, index: usize) -> Option<Value> {
        self.columns.get(index).map(|(_, value)| value.clone())
    }
}
