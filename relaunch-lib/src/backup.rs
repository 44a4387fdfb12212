//! Numbered file backups: `<file>.bak`, `<file>.bak2`, `<file>.bak3`, ...

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use relaunch_core::DirectoryLister;

use crate::error::LibError;
use crate::scanner::DirectoryScanner;

const BACKUP_EXTENSION: &str = ".bak";

/// Copy `path` to its first free backup name and return that name.
pub fn create_backup(path: &Path) -> io::Result<PathBuf> {
    let target = (1u32..)
        .map(|n| backup_path(path, n))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| backup_path(path, 1));
    fs::copy(path, &target)?;
    log::info!("Backup created: {}", target.display());
    Ok(target)
}

/// The highest-numbered backup of `path`, if any.
pub fn latest_backup(path: &Path) -> io::Result<Option<PathBuf>> {
    let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return Ok(None);
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let prefix = format!("{file_name}{BACKUP_EXTENSION}");

    let latest = DirectoryScanner
        .list(dir)?
        .into_iter()
        .filter(|entry| !entry.is_directory)
        .filter_map(|entry| {
            let suffix = entry.name.strip_prefix(&prefix)?;
            let number = if suffix.is_empty() {
                1
            } else {
                suffix.parse::<u32>().ok()?
            };
            Some((number, entry.path))
        })
        .max_by_key(|(number, _)| *number)
        .map(|(_, path)| path);
    Ok(latest)
}

/// Copy the most recent backup of `path` back over it.
pub fn restore_latest(path: &Path) -> Result<PathBuf, LibError> {
    let backup = latest_backup(path)?.ok_or_else(|| LibError::NoBackup(path.to_path_buf()))?;
    fs::copy(&backup, path)?;
    log::info!("Restored {} from {}", path.display(), backup.display());
    Ok(backup)
}

fn backup_path(path: &Path, number: u32) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_EXTENSION);
    if number > 1 {
        name.push(number.to_string());
    }
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backups_are_numbered() {
        let tmp = tempfile::tempdir().unwrap();
        let db = tmp.path().join("galaxy-2.0.db");
        fs::write(&db, b"v1").unwrap();

        assert_eq!(create_backup(&db).unwrap(), tmp.path().join("galaxy-2.0.db.bak"));
        assert_eq!(create_backup(&db).unwrap(), tmp.path().join("galaxy-2.0.db.bak2"));
        assert_eq!(create_backup(&db).unwrap(), tmp.path().join("galaxy-2.0.db.bak3"));
    }

    #[test]
    fn test_latest_backup_picks_highest_number() {
        let tmp = tempfile::tempdir().unwrap();
        let db = tmp.path().join("galaxy-2.0.db");
        fs::write(&db, b"current").unwrap();
        assert_eq!(latest_backup(&db).unwrap(), None);

        fs::write(tmp.path().join("galaxy-2.0.db.bak"), b"1").unwrap();
        assert_eq!(
            latest_backup(&db).unwrap(),
            Some(tmp.path().join("galaxy-2.0.db.bak"))
        );

        fs::write(tmp.path().join("galaxy-2.0.db.bak10"), b"10").unwrap();
        fs::write(tmp.path().join("galaxy-2.0.db.bak9"), b"9").unwrap();
        fs::write(tmp.path().join("galaxy-2.0.db.bakup"), b"?").unwrap();
        assert_eq!(
            latest_backup(&db).unwrap(),
            Some(tmp.path().join("galaxy-2.0.db.bak10"))
        );
    }

    #[test]
    fn test_restore_copies_latest_backup() {
        let tmp = tempfile::tempdir().unwrap();
        let db = tmp.path().join("galaxy-2.0.db");
        fs::write(&db, b"v1").unwrap();
        create_backup(&db).unwrap();
        fs::write(&db, b"v2").unwrap();
        create_backup(&db).unwrap();
        fs::write(&db, b"broken").unwrap();

        let used = restore_latest(&db).unwrap();
        assert_eq!(used, tmp.path().join("galaxy-2.0.db.bak2"));
        assert_eq!(fs::read(&db).unwrap(), b"v2");
    }

    #[test]
    fn test_restore_without_backup_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let db = tmp.path().join("galaxy-2.0.db");
        fs::write(&db, b"v1").unwrap();
        assert!(matches!(restore_latest(&db), Err(LibError::NoBackup(_))));
    }
}
