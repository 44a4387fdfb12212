//! Point a title's launch configuration at a different DOSBox runtime.
//!
//! The database side inserts a new primary launch task whose parameters run
//! the new executable. The filesystem side makes the title's `.conf` files
//! usable from that executable: relative mount paths become absolute, and
//! optionally fullscreen is switched off.

use std::path::{Path, PathBuf};

use relaunch_core::{CUSTOM_TASK_TYPE, DirectoryLister, LaunchParametersRecord, LaunchTaskRecord};
use relaunch_db::GalaxyDatabase;

use crate::backup::create_backup;
use crate::conf_rewrite::{
    disable_fullscreen, is_launch_script_file, is_runtime_settings_file, resolve_relative_paths,
    rewrite_launch_script,
};
use crate::error::LibError;

/// Directory levels searched for configuration files, counting the install
/// directory itself.
const MAX_SCAN_DEPTH: usize = 2;

const CONFIG_EXTENSION: &str = "conf";

/// What to replace, and how.
#[derive(Debug, Clone, Default)]
pub struct ReplaceRequest {
    pub release_key: String,
    /// Path to the new runtime executable. Must be an existing file.
    pub runtime: PathBuf,
    /// Label of the new launch task; defaults to the current task's label.
    pub label: Option<String>,
    /// Switch fullscreen off in runtime settings files.
    pub windowed: bool,
    /// Back up each configuration file before it is rewritten.
    pub backup_configs: bool,
    /// Turn on the product's custom launch parameters setting.
    pub custom_parameters: bool,
}

/// What a replacement changed.
#[derive(Debug, Clone, Default)]
pub struct ReplaceSummary {
    pub task: LaunchTaskRecord,
    pub parameters: LaunchParametersRecord,
    pub scripts_rewritten: Vec<PathBuf>,
    pub settings_rewritten: Vec<PathBuf>,
    pub backups: Vec<PathBuf>,
}

/// Redirect `request.release_key` to `request.runtime`.
///
/// The database change is atomic. File rewrites run after it commits; a file
/// that cannot be rewritten fails the call, leaving earlier files rewritten.
pub fn replace_runtime(
    db: &GalaxyDatabase,
    lister: &dyn DirectoryLister,
    request: &ReplaceRequest,
) -> Result<ReplaceSummary, LibError> {
    if !request.runtime.is_file() {
        return Err(LibError::RuntimeNotFound(request.runtime.clone()));
    }
    let key = request.release_key.as_str();

    let product = db
        .products(Some(key), None)?
        .into_iter()
        .next()
        .ok_or_else(|| LibError::ProductNotFound(key.to_string()))?;

    let primary = db
        .tasks_for(key)?
        .into_iter()
        .find(|t| t.is_primary)
        .ok_or_else(|| LibError::NoPrimaryTask(key.to_string()))?;

    let current = db
        .launch_parameters_for(primary.id)?
        .into_iter()
        .next()
        .ok_or(LibError::NoLaunchParameters(primary.id))?;

    let template_task = match db
        .task_types()?
        .into_iter()
        .find(|t| t.type_name == CUSTOM_TASK_TYPE)
    {
        Some(custom) => LaunchTaskRecord {
            type_id: custom.id,
            type_name: custom.type_name,
            ..primary.clone()
        },
        None => {
            log::warn!(
                "No {} task type; keeping type {} of the current task",
                CUSTOM_TASK_TYPE,
                primary.type_name
            );
            primary.clone()
        }
    };

    let install_dir = Path::new(&product.install_path);
    let parameters = LaunchParametersRecord {
        task_id: 0,
        executable_path: request.runtime.to_string_lossy().into_owned(),
        command_line_args: resolve_relative_paths(&current.command_line_args, install_dir),
        label: request
            .label
            .clone()
            .unwrap_or_else(|| current.label.clone()),
    };

    let task = db.redirect_launch_target(primary.user_id, key, &template_task, &parameters)?;
    log::info!(
        "{} now launches {} (task {})",
        product.title,
        parameters.executable_path,
        task.id
    );

    if request.custom_parameters && db.set_custom_parameters_flag(key, true)? == 0 {
        log::warn!("No product settings row for {}; custom parameters flag not set", key);
    }

    let mut summary = ReplaceSummary {
        parameters: LaunchParametersRecord {
            task_id: task.id,
            ..parameters
        },
        task,
        ..ReplaceSummary::default()
    };

    for path in config_files(lister, install_dir, MAX_SCAN_DEPTH) {
        let script = is_launch_script_file(&path);
        let settings = request.windowed && is_runtime_settings_file(&path);
        if !script && !settings {
            continue;
        }

        if request.backup_configs {
            summary.backups.push(create_backup(&path)?);
        }
        if script {
            rewrite_launch_script(&path, install_dir)?;
            summary.scripts_rewritten.push(path.clone());
        }
        if settings {
            disable_fullscreen(&path)?;
            summary.settings_rewritten.push(path);
        }
    }

    Ok(summary)
}

/// `.conf` files under `dir`, descending at most `depth` levels.
///
/// Directories that cannot be listed are logged and skipped.
fn config_files(lister: &dyn DirectoryLister, dir: &Path, depth: usize) -> Vec<PathBuf> {
    if depth == 0 {
        return Vec::new();
    }
    let entries = match lister.list(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Error scanning directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        if entry.is_directory {
            files.extend(config_files(lister, &entry.path, depth - 1));
        } else if entry
            .path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(CONFIG_EXTENSION))
        {
            files.push(entry.path);
        }
    }
    files
}
