//! Query execution engine.
//!
//! Owns one SQLite connection. Statements are prepared per call, their
//! named placeholders bound from a [`Params`] map, and result rows turned
//! into typed records through the parser.

use std::path::{Path, PathBuf};

use relaunch_core::{Record, ResultRow, Value};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Statement};

use crate::error::DbError;
use crate::params::Params;
use crate::parser::{Engine, MissingPolicy, SqliteParser};

/// Behaviour switches for the query engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub engine: Engine,
    pub missing_parameter: MissingPolicy,
    pub missing_column: MissingPolicy,
}

/// A single-connection statement executor.
///
/// Not safe to share between threads; one logical operation at a time.
pub struct QueryEngine {
    conn: Option<Connection>,
    path: Option<PathBuf>,
    options: QueryOptions,
    parser: SqliteParser,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(QueryOptions::default())
    }
}

impl QueryEngine {
    pub fn new(options: QueryOptions) -> Self {
        Self {
            conn: None,
            path: None,
            options,
            parser: SqliteParser::for_engine(options.engine, options.missing_column),
        }
    }

    /// Open the database at `path` for reading and writing.
    ///
    /// The file must already exist. Any previous connection is closed first.
    pub fn open(&mut self, path: &Path) -> Result<(), DbError> {
        if self.conn.is_some() {
            self.close();
        }
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|source| {
            log::error!("Error opening database {}: {}", path.display(), source);
            DbError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;
        log::debug!("Opened database {}", path.display());
        self.conn = Some(conn);
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Release the connection. Closing twice only logs.
    pub fn close(&mut self) {
        match self.conn.take() {
            Some(conn) => {
                if let Err((_, e)) = conn.close() {
                    log::warn!("Error closing database: {}", e);
                }
            }
            None => log::warn!("Connection is already closed"),
        }
    }

    /// Close and reopen the last successfully opened path.
    pub fn reconnect(&mut self) -> Result<(), DbError> {
        match self.path.clone() {
            Some(path) => {
                if self.conn.is_some() {
                    self.close();
                }
                self.open(&path)
            }
            None => {
                log::warn!("No database path known during a reconnect attempt");
                Ok(())
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Path of the last successfully opened database.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run a row-returning statement and materialize every row as `R`.
    ///
    /// Any failure while stepping discards the rows read so far.
    pub fn query<R: Record>(&self, sql: &str, params: &Params) -> Result<Vec<R>, DbError> {
        let conn = self.connection()?;
        let mut stmt = self.prepare(conn, sql, params)?;
        let mut rows = stmt.raw_query();
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = R::default();
            self.parser.populate(&mut record, &SqliteRow(row))?;
            records.push(record);
        }
        Ok(records)
    }

    /// Run a statement that returns no rows. Returns the number of rows changed.
    pub fn execute(&self, sql: &str, params: &Params) -> Result<usize, DbError> {
        let conn = self.connection()?;
        let mut stmt = self.prepare(conn, sql, params)?;
        Ok(stmt.raw_execute()?)
    }

    /// Run `work` inside a transaction.
    ///
    /// Commits when `work` succeeds; rolls back when it fails.
    pub fn in_transaction<T, E>(&self, work: impl FnOnce(&Self) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let conn = self.connection()?;
        let tx = conn.unchecked_transaction().map_err(DbError::from)?;
        let value = work(self)?;
        tx.commit().map_err(DbError::from)?;
        Ok(value)
    }

    fn connection(&self) -> Result<&Connection, DbError> {
        self.conn.as_ref().ok_or(DbError::NotOpen)
    }

    fn prepare<'c>(
        &self,
        conn: &'c Connection,
        sql: &str,
        params: &Params,
    ) -> Result<Statement<'c>, DbError> {
        log::debug!("Preparing statement: {}", sql.trim());
        let mut stmt = conn.prepare(sql)?;

        let mut placeholders = Vec::new();
        for index in 1..=stmt.parameter_count() {
            // Positional `?` placeholders have no name and are left alone.
            let Some(name) = stmt.parameter_name(index).map(str::to_owned) else {
                continue;
            };
            let key = name.trim_start_matches([':', '@', '$']).to_string();
            match params.get(&key) {
                Some(value) => stmt.raw_bind_parameter(index, value)?,
                None => match self.options.missing_parameter {
                    MissingPolicy::Warn => log::warn!("Missing value for SQL parameter: {}", key),
                    MissingPolicy::Error => return Err(DbError::missing_parameter(key)),
                },
            }
            placeholders.push(key);
        }

        for name in params.names().filter(|n| !placeholders.iter().any(|p| p == n)) {
            log::debug!("Parameter '{}' has no placeholder in the statement", name);
        }

        Ok(stmt)
    }
}

/// Adapter exposing a rusqlite row through [`ResultRow`].
struct SqliteRow<'r, 'stmt>(&'r rusqlite::Row<'stmt>);

impl ResultRow for SqliteRow<'_, '_> {
    fn column_count(&self) -> usize {
        self.0.as_ref().column_count()
    }

    fn column_name(&self, index: usize) -> Option<&str> {
        self.0.as_ref().column_name(index).ok()
    }

    fn value(&self, index: usize) -> Option<Value> {
        let value = match self.0.get_ref(index).ok()? {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(n) => Value::Integer(n),
            ValueRef::Real(f) => Value::Real(f),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        };
        Some(value)
    }
}
