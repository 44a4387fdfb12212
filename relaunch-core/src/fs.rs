//! Directory-listing contract.
//!
//! The database layer needs to peek into install directories (for the
//! DOS-only product filter) without owning any filesystem code, so it takes
//! a [`DirectoryLister`] from its caller.

use std::io;
use std::path::{Path, PathBuf};

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// File name without the parent directory.
    pub name: String,
    pub path: PathBuf,
    pub is_directory: bool,
    /// Size in bytes; 0 for directories.
    pub size: u64,
}

/// Lists the immediate children of a directory.
pub trait DirectoryLister {
    fn list(&self, dir: &Path) -> io::Result<Vec<FileEntry>>;
}
