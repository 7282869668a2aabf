use super::FileSystem;
use anyhow::{anyhow, Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context(format!("Failed to read file {:?}", path))
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for result in WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
        {
            let entry = result.context(format!("Failed to walk directory {:?}", root))?;
            let is_file = match entry.file_type() {
                Some(t) if t.is_symlink() => entry.path().is_file(),
                Some(t) => t.is_file(),
                None => false,
            };
            if is_file {
                files.push(entry.into_path());
            }
        }

        debug!(root = %root.display(), files = files.len(), "Walked project tree");
        Ok(files)
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("Invalid output path {:?}", path))?;
        let tmp_path = path.with_file_name(format!(".{}.dockgen-tmp", file_name));

        if let Err(e) = fs::write(&tmp_path, contents) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e).context(format!("Failed to write file {:?}", tmp_path));
        }

        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e).context(format!("Failed to replace file {:?}", path));
        }

        Ok(())
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        path.canonicalize()
            .context(format!("Failed to canonicalize path {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir(base.join("subdir")).unwrap();
        fs::create_dir(base.join(".hidden")).unwrap();
        fs::File::create(base.join("test.txt"))
            .unwrap()
            .write_all(b"hello world")
            .unwrap();
        fs::File::create(base.join("subdir/nested.py"))
            .unwrap()
            .write_all(b"import os")
            .unwrap();
        fs::File::create(base.join(".hidden/tool.sh"))
            .unwrap()
            .write_all(b"echo hi")
            .unwrap();

        dir
    }

    #[test]
    fn test_exists() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.exists(temp.path()));
        assert!(fs.exists(&temp.path().join("test.txt")));
        assert!(!fs.exists(&temp.path().join("nonexistent")));
    }

    #[test]
    fn test_is_dir_and_is_file() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.is_dir(&temp.path().join("subdir")));
        assert!(!fs.is_dir(&temp.path().join("test.txt")));
        assert!(fs.is_file(&temp.path().join("test.txt")));
        assert!(!fs.is_file(temp.path()));
    }

    #[test]
    fn test_read_to_string() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let content = fs.read_to_string(&temp.path().join("test.txt")).unwrap();
        assert_eq!(content, "hello world");
    }

    #[test]
    fn test_read_to_string_rejects_invalid_utf8() {
        let temp = create_test_dir();
        fs::write(temp.path().join("bad.py"), [0xff, 0xfe, 0x00]).unwrap();
        let fs = RealFileSystem::new();

        assert!(fs.read_to_string(&temp.path().join("bad.py")).is_err());
    }

    #[test]
    fn test_walk_files_includes_hidden_and_nested() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let files = fs.walk_files(temp.path()).unwrap();
        let rel: Vec<String> = files
            .iter()
            .map(|p| {
                p.strip_prefix(temp.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();

        assert_eq!(rel.len(), 3);
        assert!(rel.contains(&"test.txt".to_string()));
        assert!(rel.contains(&"subdir/nested.py".to_string()));
        assert!(rel.contains(&".hidden/tool.sh".to_string()));
    }

    #[test]
    fn test_walk_files_ignores_gitignore_rules() {
        let temp = create_test_dir();
        fs::write(temp.path().join(".gitignore"), "subdir/\n").unwrap();
        let fs = RealFileSystem::new();

        let files = fs.walk_files(temp.path()).unwrap();
        assert!(files.iter().any(|p| p.ends_with("subdir/nested.py")));
    }

    #[test]
    fn test_walk_files_missing_root_fails() {
        let fs = RealFileSystem::new();
        assert!(fs.walk_files(Path::new("/nonexistent/dockgen/root")).is_err());
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();
        let target = temp.path().join("Dockerfile");

        fs.write_atomic(&target, "FROM a\n").unwrap();
        fs.write_atomic(&target, "FROM b\n").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "FROM b\n");
        assert!(!temp.path().join(".Dockerfile.dockgen-tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_files_includes_symlinked_files_only() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();
        let base = temp.path();
        std::os::unix::fs::symlink(base.join("test.txt"), base.join("app.py")).unwrap();
        std::os::unix::fs::symlink(base.join("subdir"), base.join("linked")).unwrap();

        let files = fs.walk_files(base).unwrap();

        assert!(files.iter().any(|p| p.ends_with("app.py")));
        assert!(files.iter().any(|p| p.ends_with("subdir/nested.py")));
        assert!(!files.iter().any(|p| p.starts_with(base.join("linked"))));
    }

    #[test]
    fn test_write_atomic_failed_rename_leaves_no_tmp() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();
        let target = temp.path().join("subdir");

        assert!(fs.write_atomic(&target, "FROM a\n").is_err());
        assert!(!temp.path().join(".subdir.dockgen-tmp").exists());
        assert!(target.join("nested.py").exists());
    }

    #[test]
    fn test_write_atomic_failed_write_leaves_no_tmp() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();
        fs::create_dir(temp.path().join(".Dockerfile.dockgen-tmp")).unwrap();

        assert!(fs
            .write_atomic(&temp.path().join("Dockerfile"), "FROM a\n")
            .is_err());
        assert!(!temp.path().join("Dockerfile").exists());
    }

    #[test]
    fn test_canonicalize() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let canonical = fs.canonicalize(temp.path()).unwrap();
        assert!(canonical.is_absolute());
    }
}
