//! Import scanning for Python sources.
//!
//! Lines end at `\n`, `\r\n` or a bare `\r`. Only the first module of each
//! `import`/`from` line is recorded, so `import requests, yaml` yields
//! `requests` alone.

use crate::fs::{extension_of, FileSystem};
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Modules treated as part of the Python standard library.
pub const PYTHON_STDLIB: &[&str] = &[
    "abc",
    "argparse",
    "ast",
    "asyncio",
    "base64",
    "collections",
    "concurrent",
    "contextlib",
    "copy",
    "csv",
    "datetime",
    "enum",
    "functools",
    "glob",
    "gzip",
    "hashlib",
    "http",
    "importlib",
    "io",
    "itertools",
    "json",
    "logging",
    "math",
    "multiprocessing",
    "operator",
    "os",
    "pathlib",
    "pickle",
    "random",
    "re",
    "shutil",
    "signal",
    "socket",
    "sqlite3",
    "statistics",
    "string",
    "subprocess",
    "sys",
    "tempfile",
    "threading",
    "time",
    "typing",
    "unittest",
    "urllib",
    "uuid",
    "warnings",
    "weakref",
    "xml",
    "zipfile",
];

fn import_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(?:from|import)\s+(\w+)").expect("valid regex"))
}

/// First imported module named on `line`, if it is an import statement.
pub fn imported_module(line: &str) -> Option<&str> {
    import_pattern()
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Collects third-party module names imported by the `.py` files of a tree.
pub struct DependencyScanner<'a, F: FileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem> DependencyScanner<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Sorted, de-duplicated external module names. Any unreadable source
    /// file fails the scan.
    pub fn scan(&self, root: &Path) -> Result<Vec<String>> {
        let mut imports = BTreeSet::new();
        let mut sources = 0usize;

        for path in self.fs.walk_files(root)? {
            if extension_of(&path).as_deref() != Some("py") {
                continue;
            }
            sources += 1;

            let content = self
                .fs
                .read_to_string(&path)
                .with_context(|| format!("Failed to scan imports in {:?}", path))?;

            for line in content.split(|c: char| c == '\n' || c == '\r') {
                if let Some(module) = imported_module(line) {
                    imports.insert(module.to_string());
                }
            }
        }

        let external: Vec<String> = imports
            .into_iter()
            .filter(|m| !PYTHON_STDLIB.contains(&m.as_str()))
            .collect();

        debug!(sources, dependencies = ?external, "Python import scan finished");
        Ok(external)
    }
}
