use crate::config::DockgenConfig;
use crate::detection::{Classification, EcosystemClassifier};
use crate::fs::FileSystem;
use crate::manifest::{Recipe, RecipeAssembler};
use crate::stack::ProfileRegistry;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Result of one generation run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationOutcome {
    Generated(GenerationReport),
    /// No ecosystem recognized; nothing was written
    Undetermined { root: PathBuf },
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub root: PathBuf,
    pub classification: Classification,
    pub recipe: Recipe,
    pub manifest_file: String,
    pub ignore_file: String,
    /// Files written, relative to the root, in write order
    pub written: Vec<String>,
    pub dry_run: bool,
}

/// Runs classification, assembly and the file writes for a project root.
pub struct GenerationOrchestrator<'a, F: FileSystem> {
    fs: &'a F,
    registry: &'a ProfileRegistry,
    config: &'a DockgenConfig,
}

impl<'a, F: FileSystem> GenerationOrchestrator<'a, F> {
    pub fn new(fs: &'a F, registry: &'a ProfileRegistry, config: &'a DockgenConfig) -> Self {
        Self {
            fs,
            registry,
            config,
        }
    }

    pub fn classify(&self, root: &Path) -> Result<Classification> {
        let root = self.resolve_root(root)?;
        EcosystemClassifier::new(self.fs).classify(&root)
    }

    /// With `dry_run` the recipe is assembled but no file is touched.
    pub fn execute(&self, root: &Path, dry_run: bool) -> Result<GenerationOutcome> {
        let start = Instant::now();
        let root = self.resolve_root(root)?;
        info!(root = %root.display(), dry_run, "Starting generation");

        let classification = EcosystemClassifier::new(self.fs).classify(&root)?;
        let Some(tag) = classification.tag() else {
            return Ok(GenerationOutcome::Undetermined { root });
        };

        let recipe = RecipeAssembler::new(self.fs, self.registry, self.config.workdir.as_str())
            .assemble(&root, tag)?;

        let written = if dry_run {
            Vec::new()
        } else {
            self.write_outputs(&root, &recipe)?
        };

        info!(
            tag = %recipe.tag,
            files = written.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Generation complete"
        );

        Ok(GenerationOutcome::Generated(GenerationReport {
            root,
            classification,
            recipe,
            manifest_file: self.config.manifest_file.clone(),
            ignore_file: self.config.ignore_file.clone(),
            written,
            dry_run,
        }))
    }

    fn resolve_root(&self, root: &Path) -> Result<PathBuf> {
        if !self.fs.is_dir(root) {
            anyhow::bail!("Project path is not a directory: {:?}", root);
        }
        self.fs.canonicalize(root)
    }

    fn write_outputs(&self, root: &Path, recipe: &Recipe) -> Result<Vec<String>> {
        let mut written = Vec::new();

        if let Some(pending) = &recipe.dependency_manifest {
            self.write(root, &pending.name, &pending.contents)?;
            written.push(pending.name.clone());
        }

        self.write(root, &self.config.manifest_file, &recipe.manifest.render())?;
        written.push(self.config.manifest_file.clone());

        self.write(root, &self.config.ignore_file, &recipe.ignore.render())?;
        written.push(self.config.ignore_file.clone());

        Ok(written)
    }

    fn write(&self, root: &Path, name: &str, contents: &str) -> Result<()> {
        let path = root.join(name);
        self.fs
            .write_atomic(&path, contents)
            .with_context(|| format!("Failed to write {}", name))?;
        debug!(path = %path.display(), bytes = contents.len(), "Wrote file");
        Ok(())
    }
}
