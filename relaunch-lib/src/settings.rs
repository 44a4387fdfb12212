//! User settings stored in `~/.config/relaunch/settings.toml`.
//!
//! Every section and key is optional; missing values take their defaults.
//! A missing or unreadable file yields the defaults with a warning.

use std::io;
use std::path::{Path, PathBuf};

use relaunch_db::{DOS_MARKER, DbError, Engine, MissingPolicy, QueryOptions};
use serde::{Deserialize, Serialize};

use crate::error::LibError;
use crate::export::ExportFormat;

/// Canonical path to the settings file: `~/.config/relaunch/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("relaunch").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub query: QuerySettings,
    pub export: ExportSettings,
    pub rewrite: RewriteSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Launcher storage directory holding the database file.
    pub storage_dir: PathBuf,
    pub file: String,
    pub engine: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let storage_dir = if cfg!(windows) {
            PathBuf::from(r"C:\ProgramData\GOG.com\Galaxy\storage")
        } else {
            PathBuf::from(".")
        };
        Self {
            storage_dir,
            file: "galaxy-2.0.db".to_string(),
            engine: Engine::Sqlite.name().to_string(),
        }
    }
}

/// How to react to a placeholder with no value, or a record column the
/// result set does not carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    #[default]
    Warn,
    Error,
}

impl From<Strictness> for MissingPolicy {
    fn from(s: Strictness) -> Self {
        match s {
            Strictness::Warn => MissingPolicy::Warn,
            Strictness::Error => MissingPolicy::Error,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    pub missing_parameter: Strictness,
    pub missing_column: Strictness,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub format: ExportFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteSettings {
    /// Back up each configuration file before rewriting it.
    pub backup_configs: bool,
    pub disable_fullscreen: bool,
    pub dos_marker: String,
}

impl Default for RewriteSettings {
    fn default() -> Self {
        Self {
            backup_configs: true,
            disable_fullscreen: false,
            dos_marker: DOS_MARKER.to_string(),
        }
    }
}

impl Settings {
    /// Load from the canonical path, falling back to defaults.
    pub fn load() -> Self {
        let path = settings_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, LibError> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| LibError::settings(e.to_string()))
    }

    /// Write atomically: serialize to `<name>.toml.tmp`, then rename.
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(io::Error::other)?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &serialized)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Full path of the launcher database.
    pub fn database_path(&self) -> PathBuf {
        self.database.storage_dir.join(&self.database.file)
    }

    /// Query engine options. Fails if the configured engine is unknown.
    pub fn query_options(&self) -> Result<QueryOptions, DbError> {
        Ok(QueryOptions {
            engine: self.database.engine.parse()?,
            missing_parameter: self.query.missing_parameter.into(),
            missing_column: self.query.missing_column.into(),
        })
    }
}

/// The effective settings as pretty-printed TOML, for display.
pub fn load_settings_string() -> Option<String> {
    toml::to_string_pretty(&Settings::load()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.database.file, "galaxy-2.0.db");
        assert_eq!(settings.database.engine, "sqlite");
        assert_eq!(settings.export.format, ExportFormat::Json);
        assert!(settings.rewrite.backup_configs);
        assert!(!settings.rewrite.disable_fullscreen);
        assert_eq!(settings.rewrite.dos_marker, "DOSBOX");
        assert_eq!(settings.query_options().unwrap(), QueryOptions::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(
            &path,
            "[query]\nmissing_column = \"error\"\n\n[export]\nformat = \"csv\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.query.missing_column, Strictness::Error);
        assert_eq!(settings.query.missing_parameter, Strictness::Warn);
        assert_eq!(settings.export.format, ExportFormat::Csv);
        assert_eq!(settings.database.file, "galaxy-2.0.db");

        let options = settings.query_options().unwrap();
        assert_eq!(options.missing_column, MissingPolicy::Error);
        assert_eq!(options.missing_parameter, MissingPolicy::Warn);
    }

    #[test]
    fn test_unknown_engine_is_rejected() {
        let mut settings = Settings::default();
        settings.database.engine = "mysql".to_string();
        assert!(matches!(
            settings.query_options(),
            Err(DbError::UnsupportedEngine(ref e)) if e == "mysql"
        ));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "[query]\nmissing_column = \"sometimes\"\n").unwrap();
        assert!(matches!(
            Settings::load_from(&path),
            Err(LibError::Settings(_))
        ));
    }

    #[test]
    fn test_save_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("settings.toml");
        let mut settings = Settings::default();
        settings.database.storage_dir = PathBuf::from("/srv/galaxy");
        settings.rewrite.disable_fullscreen = true;

        settings.save_to(&path).unwrap();
        assert!(!path.with_extension("toml.tmp").exists());
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
        assert_eq!(
            settings.database_path(),
            PathBuf::from("/srv/galaxy").join("galaxy-2.0.db")
        );
    }
}
