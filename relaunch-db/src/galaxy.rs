//! Domain operations on the launcher database.
//!
//! Every operation except [`GalaxyDatabase::verify`] requires an open
//! connection to a database that passed verification; otherwise it fails
//! with [`DbError::NotOpen`].

use std::path::Path;

use relaunch_core::{
    DirectoryLister, LastInsertId, LaunchParametersRecord, LaunchTaskRecord, ProductRecord,
    RecordKind, SchemaEntry, TaskTypeRecord, UserRecord,
};

use crate::error::DbError;
use crate::params::Params;
use crate::query::{QueryEngine, QueryOptions};

/// Schema objects whose presence identifies a launcher database.
pub const REQUIRED_SCHEMA_OBJECTS: [&str; 3] = [
    "Product Details View",
    "ProductsToReleaseKeys",
    "InstalledBaseProducts",
];

/// Substring of an install-directory entry that marks a DOS title.
pub const DOS_MARKER: &str = "DOSBOX";

const TASK_COLUMNS: &str = r#"pt.id, pt.gameReleaseKey, pt.userId, pt."order", pt.typeId, ptt.type, pt.isPrimary"#;

/// The launcher database: products, users and launch tasks.
pub struct GalaxyDatabase {
    engine: QueryEngine,
    valid: bool,
    dos_marker: String,
}

impl Default for GalaxyDatabase {
    fn default() -> Self {
        Self::new(QueryOptions::default())
    }
}

impl GalaxyDatabase {
    pub fn new(options: QueryOptions) -> Self {
        Self {
            engine: QueryEngine::new(options),
            valid: false,
            dos_marker: DOS_MARKER.to_string(),
        }
    }

    /// Use a different marker for the DOS-only product filter.
    pub fn with_dos_marker(mut self, marker: impl Into<String>) -> Self {
        self.dos_marker = marker.into();
        self
    }

    /// Open the database at `path` and verify it.
    ///
    /// Returns whether the file is a valid launcher database.
    pub fn open(&mut self, path: &Path) -> Result<bool, DbError> {
        if self.engine.is_open() {
            self.engine.close();
        }
        self.valid = false;
        self.engine.open(path)?;
        let valid = self.verify()?;
        if !valid {
            log::warn!(
                "Database verification failed: {} is not a valid GOG Galaxy database",
                path.display()
            );
        }
        Ok(valid)
    }

    pub fn close(&mut self) {
        if self.engine.is_open() {
            self.engine.close();
        } else {
            log::warn!("Attempted to close a connection that is not open");
        }
        self.valid = false;
    }

    /// Check the connected file for the required schema objects.
    pub fn verify(&mut self) -> Result<bool, DbError> {
        if !self.engine.is_open() {
            return Err(DbError::NotOpen);
        }
        let [view, release_keys, installed] = REQUIRED_SCHEMA_OBJECTS;
        let entries: Vec<SchemaEntry> = self.engine.query(
            "SELECT type, name, tbl_name, rootpage
             FROM sqlite_master
             WHERE name IN (:view, :releaseKeys, :installed)",
            &Params::new()
                .with("view", view)
                .with("releaseKeys", release_keys)
                .with("installed", installed),
        )?;
        self.valid = entries.len() == REQUIRED_SCHEMA_OBJECTS.len();
        Ok(self.valid)
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_open(&self) -> bool {
        self.engine.is_open()
    }

    fn checked(&self) -> Result<&QueryEngine, DbError> {
        if self.valid && self.engine.is_open() {
            Ok(&self.engine)
        } else {
            Err(DbError::NotOpen)
        }
    }

    // ── Reads ───────────────────────────────────────────────────────────────

    /// Installed products, optionally narrowed to one release key.
    ///
    /// With `dos_only` set, keeps only products whose install directory has
    /// an entry whose path contains the DOS marker. A directory that cannot
    /// be listed is logged and its product left out.
    pub fn products(
        &self,
        release_key: Option<&str>,
        dos_only: Option<&dyn DirectoryLister>,
    ) -> Result<Vec<ProductRecord>, DbError> {
        let engine = self.checked()?;
        let mut sql = String::from(
            "SELECT
                pdv.productId,
                pdv.title,
                pdv.slug,
                ptr.gogId,
                ptr.releaseKey,
                ibp.installationPath,
                ibp.installationDate
             FROM [Product Details View] pdv
                 INNER JOIN ProductsToReleaseKeys ptr ON ptr.gogId = pdv.productId
                 INNER JOIN InstalledBaseProducts ibp ON ibp.productId = pdv.productId",
        );
        let mut params = Params::new();
        if let Some(key) = release_key {
            sql.push_str(" WHERE ptr.releaseKey = :releaseKey");
            params.insert("releaseKey", key);
        }

        let products: Vec<ProductRecord> = engine.query(&sql, &params)?;
        let Some(lister) = dos_only else {
            return Ok(products);
        };

        Ok(products
            .into_iter()
            .filter(|product| {
                match lister.list(Path::new(&product.install_path)) {
                    Ok(entries) => entries
                        .iter()
                        .any(|e| e.path.to_string_lossy().contains(&self.dos_marker)),
                    Err(e) => {
                        log::warn!("Error scanning directory {}: {}", product.install_path, e);
                        false
                    }
                }
            })
            .collect())
    }

    pub fn users(&self) -> Result<Vec<UserRecord>, DbError> {
        self.checked()?.query("SELECT id FROM Users", &Params::new())
    }

    pub fn task_types(&self) -> Result<Vec<TaskTypeRecord>, DbError> {
        self.checked()?
            .query("SELECT id, type FROM PlayTaskTypes", &Params::new())
    }

    /// Every launch task, with its type name.
    pub fn tasks(&self) -> Result<Vec<LaunchTaskRecord>, DbError> {
        self.checked()?.query(
            &format!(
                "SELECT {TASK_COLUMNS}
                 FROM PlayTasks pt
                 INNER JOIN PlayTaskTypes ptt ON pt.typeId = ptt.id
                 ORDER BY pt.id"
            ),
            &Params::new(),
        )
    }

    pub fn tasks_for(&self, release_key: &str) -> Result<Vec<LaunchTaskRecord>, DbError> {
        self.checked()?.query(
            &format!(
                "SELECT {TASK_COLUMNS}
                 FROM PlayTasks pt
                 INNER JOIN PlayTaskTypes ptt ON pt.typeId = ptt.id
                 WHERE pt.gameReleaseKey = :gameReleaseKey
                 ORDER BY pt.id"
            ),
            &Params::new().with("gameReleaseKey", release_key),
        )
    }

    pub fn launch_parameters(&self) -> Result<Vec<LaunchParametersRecord>, DbError> {
        self.checked()?.query(
            "SELECT ptlp.playTaskId, ptlp.executablePath, ptlp.commandLineArgs, ptlp.label
             FROM PlayTaskLaunchParameters ptlp",
            &Params::new(),
        )
    }

    pub fn launch_parameters_for(
        &self,
        task_id: i64,
    ) -> Result<Vec<LaunchParametersRecord>, DbError> {
        self.checked()?.query(
            "SELECT ptlp.playTaskId, ptlp.executablePath, ptlp.commandLineArgs, ptlp.label
             FROM PlayTaskLaunchParameters ptlp
             WHERE ptlp.playTaskId = :playTaskId",
            &Params::new().with("playTaskId", task_id),
        )
    }

    // ── Writes ──────────────────────────────────────────────────────────────

    /// Clear the primary flag on every task of a release key.
    pub fn disable_primary_tasks_for(&self, release_key: &str) -> Result<usize, DbError> {
        self.checked()?.execute(
            "UPDATE PlayTasks SET isPrimary = 0 WHERE gameReleaseKey = :gameReleaseKey",
            &Params::new().with("gameReleaseKey", release_key),
        )
    }

    /// Insert a launch task and return it with its generated id, owner and order.
    pub fn insert_task(
        &self,
        user_id: i64,
        order: i64,
        task: &LaunchTaskRecord,
    ) -> Result<LaunchTaskRecord, DbError> {
        let engine = self.checked()?;
        engine.execute(
            r#"INSERT INTO PlayTasks (gameReleaseKey, userId, "order", typeId, isPrimary)
               VALUES (:gameReleaseKey, :userId, :order, :typeId, :isPrimary)"#,
            &Params::new()
                .with("gameReleaseKey", &task.release_key)
                .with("userId", user_id)
                .with("order", order)
                .with("typeId", task.type_id)
                .with("isPrimary", task.is_primary),
        )?;

        let ids: Vec<LastInsertId> =
            engine.query("SELECT last_insert_rowid() AS id", &Params::new())?;
        let id = match ids.first() {
            Some(row) if row.id != 0 => row.id,
            _ => return Err(DbError::MissingInsertId(RecordKind::LaunchTask)),
        };

        Ok(LaunchTaskRecord {
            id,
            user_id,
            order,
            ..task.clone()
        })
    }

    /// Insert the parameters row belonging to `task`.
    pub fn insert_launch_parameters(
        &self,
        task: &LaunchTaskRecord,
        params: &LaunchParametersRecord,
    ) -> Result<(), DbError> {
        self.checked()?.execute(
            "INSERT INTO PlayTaskLaunchParameters (playTaskId, executablePath, commandLineArgs, label)
             VALUES (:playTaskId, :executablePath, :commandLineArgs, :label)",
            &Params::new()
                .with("playTaskId", task.id)
                .with("executablePath", &params.executable_path)
                .with("commandLineArgs", &params.command_line_args)
                .with("label", &params.label),
        )?;
        Ok(())
    }

    /// Toggle the per-product custom launch parameters setting.
    pub fn set_custom_parameters_flag(
        &self,
        release_key: &str,
        enabled: bool,
    ) -> Result<usize, DbError> {
        self.checked()?.execute(
            "UPDATE ProductSettings
             SET customLaunchParameters = :enabled
             WHERE gameReleaseKey = :releaseKey",
            &Params::new()
                .with("enabled", enabled)
                .with("releaseKey", release_key),
        )
    }

    /// Make a copy of `template_task` the new primary task of `release_key`.
    ///
    /// The new task gets order `max(existing) + 1` (or 1), every other task
    /// of the release key loses its primary flag, and `template_params` is
    /// stored for the new task. All three writes share one transaction.
    pub fn redirect_launch_target(
        &self,
        user_id: i64,
        release_key: &str,
        template_task: &LaunchTaskRecord,
        template_params: &LaunchParametersRecord,
    ) -> Result<LaunchTaskRecord, DbError> {
        let engine = self.checked()?;
        engine.in_transaction(|_| -> Result<LaunchTaskRecord, DbError> {
            let existing = self.tasks_for(release_key)?;
            let order = existing
                .iter()
                .map(|t| t.order)
                .max()
                .map_or(1, |max| max + 1);

            let template = LaunchTaskRecord {
                release_key: release_key.to_string(),
                is_primary: true,
                ..template_task.clone()
            };

            self.disable_primary_tasks_for(release_key)?;
            let task = self.insert_task(user_id, order, &template)?;
            self.insert_launch_parameters(&task, template_params)?;
            log::debug!(
                "Inserted task {} (order {}) as primary for {}",
                task.id,
                task.order,
                release_key
            );
            Ok(task)
        })
    }
}
