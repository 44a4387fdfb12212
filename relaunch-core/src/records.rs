//! Concrete record types read from and written to the launcher database.
//!
//! Column names match the launcher's schema exactly (case-sensitive).

use crate::record::{Column, FieldKind, FieldValue, Record, RecordKind};

/// Name of the task-type row that marks a user-defined launch task.
pub const CUSTOM_TASK_TYPE: &str = "CustomTask";

// ── Product ─────────────────────────────────────────────────────────────────

/// An installed title, projected from the product, release-key and
/// installed-product tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductRecord {
    pub product_id: i64,
    pub title: String,
    pub slug: String,
    /// Numeric id on the launcher's platform (`gogId`).
    pub platform_id: i64,
    pub release_key: String,
    pub install_path: String,
    pub install_date: String,
}

impl Record for ProductRecord {
    const KIND: RecordKind = RecordKind::Product;
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            name: "productId",
            kind: FieldKind::Number,
            get: |r| FieldValue::Number(r.product_id),
            set: |r, v| r.product_id = v.into_i64(),
        },
        Column {
            name: "title",
            kind: FieldKind::String,
            get: |r| FieldValue::Text(r.title.clone()),
            set: |r, v| r.title = v.into_string(),
        },
        Column {
            name: "slug",
            kind: FieldKind::String,
            get: |r| FieldValue::Text(r.slug.clone()),
            set: |r, v| r.slug = v.into_string(),
        },
        Column {
            name: "gogId",
            kind: FieldKind::Number,
            get: |r| FieldValue::Number(r.platform_id),
            set: |r, v| r.platform_id = v.into_i64(),
        },
        Column {
            name: "releaseKey",
            kind: FieldKind::String,
            get: |r| FieldValue::Text(r.release_key.clone()),
            set: |r, v| r.release_key = v.into_string(),
        },
        Column {
            name: "installationPath",
            kind: FieldKind::String,
            get: |r| FieldValue::Text(r.install_path.clone()),
            set: |r, v| r.install_path = v.into_string(),
        },
        Column {
            name: "installationDate",
            kind: FieldKind::String,
            get: |r| FieldValue::Text(r.install_date.clone()),
            set: |r, v| r.install_date = v.into_string(),
        },
    ];
}

// ── User ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecord {
    /// Launcher user ids exceed 32 bits.
    pub id: i64,
}

impl Record for UserRecord {
    const KIND: RecordKind = RecordKind::User;
    const COLUMNS: &'static [Column<Self>] = &[Column {
        name: "id",
        kind: FieldKind::Number,
        get: |r| FieldValue::Number(r.id),
        set: |r, v| r.id = v.into_i64(),
    }];
}

// ── Launch tasks ────────────────────────────────────────────────────────────

/// One way to start a title. At most one task per release key is primary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchTaskRecord {
    pub id: i64,
    pub release_key: String,
    pub user_id: i64,
    /// Display order, unique per release key.
    pub order: i64,
    pub type_id: i64,
    /// Denormalized from the task-type table.
    pub type_name: String,
    pub is_primary: bool,
}

impl Record for LaunchTaskRecord {
    const KIND: RecordKind = RecordKind::LaunchTask;
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            name: "id",
            kind: FieldKind::Number,
            get: |r| FieldValue::Number(r.id),
            set: |r, v| r.id = v.into_i64(),
        },
        Column {
            name: "gameReleaseKey",
            kind: FieldKind::String,
            get: |r| FieldValue::Text(r.release_key.clone()),
            set: |r, v| r.release_key = v.into_string(),
        },
        Column {
            name: "userId",
            kind: FieldKind::Number,
            get: |r| FieldValue::Number(r.user_id),
            set: |r, v| r.user_id = v.into_i64(),
        },
        Column {
            name: "order",
            kind: FieldKind::Number,
            get: |r| FieldValue::Number(r.order),
            set: |r, v| r.order = v.into_i64(),
        },
        Column {
            name: "typeId",
            kind: FieldKind::Number,
            get: |r| FieldValue::Number(r.type_id),
            set: |r, v| r.type_id = v.into_i64(),
        },
        Column {
            name: "type",
            kind: FieldKind::String,
            get: |r| FieldValue::Text(r.type_name.clone()),
            set: |r, v| r.type_name = v.into_string(),
        },
        Column {
            name: "isPrimary",
            kind: FieldKind::Boolean,
            get: |r| FieldValue::Boolean(r.is_primary),
            set: |r, v| r.is_primary = v.into_bool(),
        },
    ];
}

/// Executable and arguments for one launch task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchParametersRecord {
    pub task_id: i64,
    pub executable_path: String,
    pub command_line_args: String,
    pub label: String,
}

impl Record for LaunchParametersRecord {
    const KIND: RecordKind = RecordKind::LaunchParameters;
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            name: "playTaskId",
            kind: FieldKind::Number,
            get: |r| FieldValue::Number(r.task_id),
            set: |r, v| r.task_id = v.into_i64(),
        },
        Column {
            name: "executablePath",
            kind: FieldKind::String,
            get: |r| FieldValue::Text(r.executable_path.clone()),
            set: |r, v| r.executable_path = v.into_string(),
        },
        Column {
            name: "commandLineArgs",
            kind: FieldKind::String,
            get: |r| FieldValue::Text(r.command_line_args.clone()),
            set: |r, v| r.command_line_args = v.into_string(),
        },
        Column {
            name: "label",
            kind: FieldKind::String,
            get: |r| FieldValue::Text(r.label.clone()),
            set: |r, v| r.label = v.into_string(),
        },
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskTypeRecord {
    pub id: i64,
    pub type_name: String,
}

impl Record for TaskTypeRecord {
    const KIND: RecordKind = RecordKind::TaskType;
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            name: "id",
            kind: FieldKind::Number,
            get: |r| FieldValue::Number(r.id),
            set: |r, v| r.id = v.into_i64(),
        },
        Column {
            name: "type",
            kind: FieldKind::String,
            get: |r| FieldValue::Text(r.type_name.clone()),
            set: |r, v| r.type_name = v.into_string(),
        },
    ];
}

// ── Bookkeeping ─────────────────────────────────────────────────────────────

/// Row id assigned by the most recent insert on a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastInsertId {
    pub id: i64,
}

impl Record for LastInsertId {
    const KIND: RecordKind = RecordKind::LastInsertId;
    const COLUMNS: &'static [Column<Self>] = &[Column {
        name: "id",
        kind: FieldKind::Number,
        get: |r| FieldValue::Number(r.id),
        set: |r, v| r.id = v.into_i64(),
    }];
}

/// One row of the store's schema table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaEntry {
    /// `table`, `view`, `index` or `trigger`.
    pub entry_type: String,
    pub name: String,
    pub table_name: String,
    pub root_page: i64,
}

impl Record for SchemaEntry {
    const KIND: RecordKind = RecordKind::SchemaEntry;
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            name: "type",
            kind: FieldKind::String,
            get: |r| FieldValue::Text(r.entry_type.clone()),
            set: |r, v| r.entry_type = v.into_string(),
        },
        Column {
            name: "name",
            kind: FieldKind::String,
            get: |r| FieldValue::Text(r.name.clone()),
            set: |r, v| r.name = v.into_string(),
        },
        Column {
            name: "tbl_name",
            kind: FieldKind::String,
            get: |r| FieldValue::Text(r.table_name.clone()),
            set: |r, v| r.table_name = v.into_string(),
        },
        Column {
            name: "rootpage",
            kind: FieldKind::Number,
            get: |r| FieldValue::Number(r.root_page),
            set: |r, v| r.root_page = v.into_i64(),
        },
    ];
}
