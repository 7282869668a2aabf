use crate::fs::FileSystem;
use std::path::Path;

/// Directories that usually hold runtime data, in emission order.
pub const VOLUME_DIRS: &[&str] = &["data", "logs", "config", "uploads", "media", "static", "db"];

/// Container paths under `workdir` for each well-known directory present at
/// the project root.
pub fn detect_volumes<F: FileSystem>(fs: &F, root: &Path, workdir: &str) -> Vec<String> {
    let workdir = workdir.trim_end_matches('/');
    VOLUME_DIRS
        .iter()
        .filter(|dir| fs.is_dir(&root.join(dir)))
        .map(|dir| format!("{}/{}", workdir, dir))
        .collect()
}
