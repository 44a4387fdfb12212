//! Fixture schema mirroring the parts of the launcher database this crate
//! touches.
//!
//! The real database is created by the launcher; this schema exists so
//! tests and dry runs never need a copy of it.

use std::path::Path;

use rusqlite::Connection;

use crate::error::DbError;

/// Create the fixture tables and views if they don't exist.
///
/// Idempotent; safe to call on an existing database.
pub fn create_galaxy_schema(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Create (or open) a database file at `path` carrying the fixture schema.
pub fn create_database(path: &Path) -> Result<Connection, DbError> {
    let conn = Connection::open(path)?;
    create_galaxy_schema(&conn)?;
    Ok(conn)
}

/// Open an in-memory database with the fixture schema. Useful for testing.
pub fn open_memory() -> Result<Connection, DbError> {
    let conn = Connection::open_in_memory()?;
    create_galaxy_schema(&conn)?;
    Ok(conn)
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS Users (
    id INTEGER PRIMARY KEY
);

-- Product metadata, exposed through the view the launcher itself uses
CREATE TABLE IF NOT EXISTS LimitedDetails (
    productId INTEGER NOT NULL,
    title TEXT,
    slug TEXT
);

CREATE VIEW IF NOT EXISTS [Product Details View] AS
    SELECT productId, title, slug FROM LimitedDetails;

CREATE TABLE IF NOT EXISTS ProductsToReleaseKeys (
    gogId INTEGER NOT NULL,
    releaseKey TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS InstalledBaseProducts (
    productId INTEGER NOT NULL,
    installationPath TEXT,
    installationDate TEXT
);

CREATE TABLE IF NOT EXISTS ProductSettings (
    gameReleaseKey TEXT PRIMARY KEY,
    customLaunchParameters INTEGER NOT NULL DEFAULT 0
);

-- Launch tasks
CREATE TABLE IF NOT EXISTS PlayTaskTypes (
    id INTEGER PRIMARY KEY,
    type TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS PlayTasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    gameReleaseKey TEXT NOT NULL,
    userId INTEGER NOT NULL,
    "order" INTEGER NOT NULL,
    typeId INTEGER NOT NULL REFERENCES PlayTaskTypes(id),
    isPrimary INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS PlayTaskLaunchParameters (
    playTaskId INTEGER PRIMARY KEY REFERENCES PlayTasks(id),
    executablePath TEXT NOT NULL,
    commandLineArgs TEXT,
    label TEXT
);

INSERT OR IGNORE INTO PlayTaskTypes (id, type) VALUES
    (1, 'FileTask'),
    (2, 'URLTask'),
    (3, 'CustomTask');
"#;
