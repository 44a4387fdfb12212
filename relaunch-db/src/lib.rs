//! SQLite access layer for the launcher database.
//!
//! Provides typed query execution (parameter binding by name, row
//! materialization into [`relaunch_core::Record`] types), the domain
//! operations on products and launch tasks, and a fixture schema for tests.

pub mod error;
pub mod galaxy;
pub mod params;
pub mod parser;
pub mod query;
pub mod schema;

pub use error::DbError;
pub use galaxy::{DOS_MARKER, GalaxyDatabase, REQUIRED_SCHEMA_OBJECTS};
pub use params::{ParamValue, Params};
pub use parser::{Engine, MissingPolicy, SqliteParser};
pub use query::{QueryEngine, QueryOptions};
pub use schema::{create_database, create_galaxy_schema, open_memory};
