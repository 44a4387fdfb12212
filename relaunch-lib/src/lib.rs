//! Workflows on top of the launcher database: configuration-file rewriting,
//! backups, record export, settings, and the runtime replacement that ties
//! them together.

pub mod backup;
pub mod conf_rewrite;
pub mod error;
pub mod export;
pub mod replace;
pub mod scanner;
pub mod settings;

pub use backup::{create_backup, latest_backup, restore_latest};
pub use conf_rewrite::{
    disable_fullscreen, is_launch_script_file, is_runtime_settings_file, resolve_relative_paths,
    rewrite_launch_script, temp_path_for,
};
pub use error::LibError;
pub use export::{ExportFormat, export_records};
pub use replace::{ReplaceRequest, ReplaceSummary, replace_runtime};
pub use scanner::DirectoryScanner;
pub use settings::Settings;
