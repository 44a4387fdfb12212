//! Flat directory listing over the real filesystem.

use std::fs;
use std::io;
use std::path::Path;

use relaunch_core::{DirectoryLister, FileEntry};

/// Lists the immediate children of a directory with `std::fs`.
///
/// Entries are sorted by name. Directories report a size of 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryScanner;

impl DirectoryScanner {
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryLister for DirectoryScanner {
    fn list(&self, dir: &Path) -> io::Result<Vec<FileEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            let is_directory = metadata.is_dir();
            entries.push(FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                is_directory,
                size: if is_directory { 0 } else { metadata.len() },
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
