//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
}

/// Abstraction over file system operations for testability
pub trait FileSystem {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as string. Invalid UTF-8 is an error.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Every regular file below `root`, recursively, in a stable order.
    ///
    /// Hidden entries are included and no ignore rules are applied.
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>>;

    /// Write `contents` to `path` completely or not at all.
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<()>;

    /// Canonicalize a path
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;
}

/// Lowercased extension of `path` without the leading dot.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
