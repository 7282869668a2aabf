use super::{FileSystem, FileType};
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct MockEntry {
    pub content: Option<String>,
    pub file_type: FileType,
}

/// In-memory file system rooted at `/mock` unless told otherwise.
pub struct MockFileSystem {
    files: RwLock<BTreeMap<PathBuf, MockEntry>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        let fs = Self {
            files: RwLock::new(BTreeMap::new()),
            root: root.clone(),
        };
        fs.add_dir(root);
        fs
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                content: Some(content.to_string()),
                file_type: FileType::File,
            },
        );
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();
        Self::ensure_parents(&mut files, &path);
    }

    /// Content of a file, if present. Used by tests to inspect writes.
    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        let path = self.normalize_path(path.as_ref());
        self.files
            .read()
            .unwrap()
            .get(&path)
            .and_then(|e| e.content.clone())
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(files: &mut BTreeMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files.entry(current.clone()).or_insert(MockEntry {
                content: None,
                file_type: FileType::Directory,
            });
        }
    }

    fn file_type(&self, path: &Path) -> Option<FileType> {
        let path = self.normalize_path(path);
        self.files.read().unwrap().get(&path).map(|e| e.file_type)
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.file_type(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.file_type(path) == Some(FileType::Directory)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.file_type(path) == Some(FileType::File)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.normalize_path(path);
        let files = self.files.read().unwrap();
        let entry = files
            .get(&path)
            .ok_or_else(|| anyhow!("File not found: {:?}", path))?;

        entry
            .content
            .clone()
            .ok_or_else(|| anyhow!("Not a file: {:?}", path))
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let root = self.normalize_path(root);
        let files = self.files.read().unwrap();

        if !files.contains_key(&root) {
            return Err(anyhow!("Directory not found: {:?}", root));
        }

        Ok(files
            .iter()
            .filter(|(path, entry)| entry.file_type == FileType::File && path.starts_with(&root))
            .map(|(path, _)| path.clone())
            .collect())
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        let path = self.normalize_path(path);
        let parent_is_dir = path
            .parent()
            .map(|p| self.is_dir(p))
            .unwrap_or(false);
        if !parent_is_dir {
            return Err(anyhow!("Parent directory not found: {:?}", path));
        }
        if self.is_dir(&path) {
            return Err(anyhow!("Is a directory: {:?}", path));
        }

        self.add_file(path, contents);
        Ok(())
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        let normalized = self.normalize_path(path);
        if self.exists(&normalized) {
            Ok(normalized)
        } else {
            Err(anyhow!("Path not found: {:?}", path))
        }
    }
}
