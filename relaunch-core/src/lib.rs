//! Core types shared by every relaunch crate.
//!
//! Defines the typed record contract used by the query layer, the narrow
//! row interface a query engine hands to a parser, the concrete record
//! types read from and written to the launcher database, and the
//! directory-listing contract used for install-directory lookups.

pub mod fs;
pub mod record;
pub mod records;
pub mod row;

pub use fs::{DirectoryLister, FileEntry};
pub use record::{Column, Field, FieldKind, FieldValue, Record, RecordKind};
pub use records::{
    CUSTOM_TASK_TYPE, LastInsertId, LaunchParametersRecord, LaunchTaskRecord, ProductRecord,
    SchemaEntry, TaskTypeRecord, UserRecord,
};
pub use row::{MemoryRow, ResultRow, Value};
