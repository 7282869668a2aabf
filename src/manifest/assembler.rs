use super::{BuildManifest, IgnoreList, ManifestSection};
use crate::detection::{detect_volumes, DependencyScanner};
use crate::fs::FileSystem;
use crate::stack::{EcosystemProfile, EcosystemTag, ProfileRegistry};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Unsupported project type: {0}")]
    UnsupportedTag(EcosystemTag),

    #[error(transparent)]
    Filesystem(#[from] anyhow::Error),
}

/// Dependency manifest that does not exist yet and should be written
/// alongside the Dockerfile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingFile {
    /// File name relative to the project root
    pub name: String,
    pub contents: String,
}

/// Everything needed to write the build files for one project.
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    /// Tag handed to the assembler
    pub detected: EcosystemTag,
    /// Tag after framework refinement
    pub tag: EcosystemTag,
    pub dependencies: Vec<String>,
    pub volumes: Vec<String>,
    pub manifest: BuildManifest,
    pub ignore: IgnoreList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_manifest: Option<PendingFile>,
}

impl Recipe {
    pub fn was_refined(&self) -> bool {
        self.detected != self.tag
    }
}

/// Turns an ecosystem tag into a [`Recipe`], reading but never writing the
/// project tree.
pub struct RecipeAssembler<'a, F: FileSystem> {
    fs: &'a F,
    registry: &'a ProfileRegistry,
    workdir: String,
}

impl<'a, F: FileSystem> RecipeAssembler<'a, F> {
    pub fn new(fs: &'a F, registry: &'a ProfileRegistry, workdir: impl Into<String>) -> Self {
        Self {
            fs,
            registry,
            workdir: workdir.into(),
        }
    }

    pub fn assemble(&self, root: &Path, detected: EcosystemTag) -> Result<Recipe, RecipeError> {
        self.profile(detected)?;

        let volumes = detect_volumes(self.fs, root, &self.workdir);
        debug!(?volumes, "Volume directories");

        let dependencies = if detected.is_python_family() {
            DependencyScanner::new(self.fs).scan(root)?
        } else {
            Vec::new()
        };

        let tag = detected.refine(dependencies.as_slice());
        if tag != detected {
            info!(from = %detected, to = %tag, "Refined ecosystem from dependencies");
        }
        let profile = self.profile(tag)?;

        let dependency_manifest = self.pending_dependency_manifest(root, tag, profile, &dependencies);
        let install = profile.install.as_ref().filter(|install| {
            dependency_manifest.is_some() || self.fs.is_file(&root.join(&install.manifest))
        });

        let mut manifest = BuildManifest::new();
        manifest.push(ManifestSection::BaseImage(profile.base_image.clone()));
        manifest.push(ManifestSection::Workdir(self.workdir.clone()));
        manifest.push(ManifestSection::CopyAll);
        if !volumes.is_empty() {
            manifest.push(ManifestSection::Mkdir(volumes.clone()));
        }
        if let Some(setup) = profile.setup_command() {
            manifest.push(ManifestSection::Run(setup));
        }
        if let Some(install) = install {
            manifest.push(ManifestSection::Install(install.command.clone()));
        }
        if !volumes.is_empty() {
            manifest.push(ManifestSection::Volume(volumes.clone()));
        }
        if let Some(port) = profile.port {
            manifest.push(ManifestSection::Expose(port));
        }
        if let Some(cmd) = &profile.cmd {
            manifest.push(ManifestSection::Cmd(cmd.clone()));
        }

        Ok(Recipe {
            detected,
            tag,
            dependencies,
            volumes,
            manifest,
            ignore: IgnoreList::new(self.registry.ignore_patterns(tag)),
            dependency_manifest,
        })
    }

    fn profile(&self, tag: EcosystemTag) -> Result<&'a EcosystemProfile, RecipeError> {
        self.registry
            .get(tag)
            .ok_or(RecipeError::UnsupportedTag(tag))
    }

    /// A python-family project with third-party imports and no dependency
    /// manifest gets one generated from the import scan.
    fn pending_dependency_manifest(
        &self,
        root: &Path,
        tag: EcosystemTag,
        profile: &EcosystemProfile,
        dependencies: &[String],
    ) -> Option<PendingFile> {
        let install = profile.install.as_ref()?;
        if !tag.is_python_family()
            || dependencies.is_empty()
            || self.fs.is_file(&root.join(&install.manifest))
        {
            return None;
        }

        let mut contents = dependencies.join("\n");
        contents.push('\n');
        Some(PendingFile {
            name: install.manifest.clone(),
            contents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    const PIP_INSTALL: &str = "RUN pip install --no-cache-dir -r requirements.txt";

    fn assemble(fs: &MockFileSystem, tag: EcosystemTag) -> Recipe {
        let registry = ProfileRegistry::builtin().unwrap();
        RecipeAssembler::new(fs, &registry, "/app")
            .assemble(Path::new("/mock"), tag)
            .unwrap()
    }

    #[test]
    fn test_flask_project() {
        let fs = MockFileSystem::new();
        fs.add_file("app.py", "import flask\n");
        fs.add_file(".gitignore", "__pycache__\n");

        let recipe = assemble(&fs, EcosystemTag::Python);

        assert_eq!(recipe.tag, EcosystemTag::PythonFlask);
        assert!(recipe.was_refined());
        assert_eq!(recipe.dependencies, vec!["flask"]);
        assert_eq!(
            recipe.dependency_manifest,
            Some(PendingFile {
                name: "requirements.txt".to_string(),
                contents: "flask\n".to_string(),
            })
        );
        assert_eq!(
            recipe.manifest.render(),
            "FROM python:3.11-slim\n\n\
             WORKDIR /app\n\n\
             COPY . .\n\n\
             RUN pip install --no-cache-dir -r requirements.txt\n\n\
             EXPOSE 8080\n\n\
             CMD [\"flask\", \"--app\", \"main\", \"run\", \"--host=0.0.0.0\", \"--port=8080\"]\n"
        );
    }

    #[test]
    fn test_cpp_project() {
        let fs = MockFileSystem::new();
        fs.add_file("main.cpp", "int main() {}\n");
        fs.add_file("util.h", "");

        let recipe = assemble(&fs, EcosystemTag::Cpp);

        assert_eq!(recipe.tag, EcosystemTag::Cpp);
        assert!(recipe.dependency_manifest.is_none());
        assert!(recipe.dependencies.is_empty());
        assert_eq!(
            recipe.manifest.render(),
            "FROM gcc:latest\n\nWORKDIR /app\n\nCOPY . .\n\nRUN g++ -o myapp *.cpp\n\nCMD [\"./myapp\"]\n"
        );
        assert!(recipe.ignore.entries().contains(&"*.o".to_string()));
    }

    #[test]
    fn test_stdlib_only_python_has_no_install_step() {
        let fs = MockFileSystem::new();
        fs.add_file("app.py", "import os\nimport json\n");

        let recipe = assemble(&fs, EcosystemTag::Python);

        assert_eq!(recipe.tag, EcosystemTag::Python);
        assert!(recipe.dependency_manifest.is_none());
        assert!(!recipe.manifest.render().contains("pip install"));
        assert!(recipe.manifest.render().ends_with("CMD [\"python\", \"app.py\"]\n"));
    }

    #[test]
    fn test_existing_requirements_is_kept_and_installed() {
        let fs = MockFileSystem::new();
        fs.add_file("app.py", "import os\n");
        fs.add_file("requirements.txt", "gunicorn==21.2\n");

        let recipe = assemble(&fs, EcosystemTag::Python);

        assert!(recipe.dependency_manifest.is_none());
        assert!(recipe.manifest.render().contains(PIP_INSTALL));
    }

    #[test]
    fn test_requirements_directory_is_not_a_manifest() {
        let fs = MockFileSystem::new();
        fs.add_file("app.py", "import os\n");
        fs.add_dir("requirements.txt");

        let recipe = assemble(&fs, EcosystemTag::Python);

        assert!(recipe.dependency_manifest.is_none());
        assert!(!recipe.manifest.render().contains("pip install"));
    }

    #[test]
    fn test_existing_requirements_not_regenerated_with_imports() {
        let fs = MockFileSystem::new();
        fs.add_file("app.py", "import streamlit\n");
        fs.add_file("requirements.txt", "streamlit==1.30\n");

        let recipe = assemble(&fs, EcosystemTag::Python);

        assert_eq!(recipe.tag, EcosystemTag::PythonStreamlit);
        assert!(recipe.dependency_manifest.is_none());
        let rendered = recipe.manifest.render();
        assert!(rendered.contains(PIP_INSTALL));
        assert!(rendered.contains("EXPOSE 8501"));
    }

    #[test]
    fn test_gpu_framework_beats_web_framework() {
        let fs = MockFileSystem::new();
        fs.add_file("app.py", "import flask\nimport torch\n");

        let recipe = assemble(&fs, EcosystemTag::Python);

        assert_eq!(recipe.tag, EcosystemTag::PythonCuda);
        let sections = recipe.manifest.sections();
        assert_eq!(
            sections[0],
            ManifestSection::BaseImage("nvidia/cuda:12.5.1-cudnn-runtime-ubuntu20.04".into())
        );
        assert_eq!(
            sections[3],
            ManifestSection::Run(
                "apt-get update && apt-get install -y python3.11 python-is-python3 pip && rm -rf /var/lib/apt/lists/*"
                    .into()
            )
        );
        assert_eq!(
            sections[4],
            ManifestSection::Install("pip install --no-cache-dir -r requirements.txt".into())
        );
        assert!(!recipe.manifest.render().contains("EXPOSE"));
    }

    #[test]
    fn test_gradio_profile() {
        let fs = MockFileSystem::new();
        fs.add_file("ui.py", "import gradio as gr\n");

        let recipe = assemble(&fs, EcosystemTag::Python);

        assert_eq!(recipe.tag, EcosystemTag::PythonGradio);
        assert!(recipe.manifest.sections().contains(&ManifestSection::Expose(7860)));
    }

    #[test]
    fn test_logs_directory_becomes_mkdir_then_volume() {
        let fs = MockFileSystem::new();
        fs.add_file("index.js", "");
        fs.add_dir("logs");

        let recipe = assemble(&fs, EcosystemTag::Node);
        let sections = recipe.manifest.sections();

        let mkdir = sections
            .iter()
            .position(|s| *s == ManifestSection::Mkdir(vec!["/app/logs".to_string()]))
            .expect("mkdir section");
        let volume = sections
            .iter()
            .position(|s| *s == ManifestSection::Volume(vec!["/app/logs".to_string()]))
            .expect("volume section");
        assert!(mkdir < volume);

        assert_eq!(
            recipe.manifest.render(),
            "FROM node:16-alpine\n\n\
             WORKDIR /app\n\n\
             COPY . .\n\n\
             RUN mkdir -p /app/logs\n\n\
             RUN npm install\n\n\
             VOLUME [\"/app/logs\"]\n\n\
             EXPOSE 3000\n\n\
             CMD [\"node\", \"app.js\"]\n"
        );
    }

    #[test]
    fn test_section_order_is_fixed() {
        let fs = MockFileSystem::new();
        fs.add_file("app.py", "import torch\n");
        fs.add_dir("data");
        fs.add_dir("db");

        let recipe = assemble(&fs, EcosystemTag::Python);
        let keywords: Vec<&str> = recipe.manifest.sections().iter().map(|s| s.keyword()).collect();

        assert_eq!(
            keywords,
            vec!["FROM", "WORKDIR", "COPY", "RUN", "RUN", "RUN", "VOLUME", "CMD"]
        );
        assert_eq!(recipe.volumes, vec!["/app/data", "/app/db"]);
    }

    #[test]
    fn test_non_python_tags_skip_import_scan() {
        let fs = MockFileSystem::new();
        fs.add_file("Main.java", "");
        fs.add_file("helper.py", "import flask\n");

        let recipe = assemble(&fs, EcosystemTag::Java);

        assert_eq!(recipe.tag, EcosystemTag::Java);
        assert!(recipe.dependencies.is_empty());
        assert!(recipe.dependency_manifest.is_none());
    }

    #[test]
    fn test_ignore_list_extends_global() {
        let fs = MockFileSystem::new();
        fs.add_file("app.py", "import os\n");

        let recipe = assemble(&fs, EcosystemTag::Python);
        let entries = recipe.ignore.entries();

        assert_eq!(entries[0], ".DS_Store");
        assert!(entries.ends_with(&["__pycache__".to_string(), ".venv".to_string()]));
    }

    #[test]
    fn test_missing_profile_is_unsupported() {
        let fs = MockFileSystem::new();
        fs.add_file("main.cpp", "");
        let registry = ProfileRegistry::parse(
            "version = 1\n[profiles.python]\nbase_image = \"python:3.11-alpine\"\n",
        )
        .unwrap();

        let result = RecipeAssembler::new(&fs, &registry, "/app")
            .assemble(Path::new("/mock"), EcosystemTag::Cpp);

        assert!(matches!(
            result,
            Err(RecipeError::UnsupportedTag(EcosystemTag::Cpp))
        ));
    }

    #[test]
    fn test_missing_refined_profile_is_unsupported() {
        let fs = MockFileSystem::new();
        fs.add_file("app.py", "import flask\n");
        let registry = ProfileRegistry::parse(
            "version = 1\n[profiles.python]\nbase_image = \"python:3.11-alpine\"\n",
        )
        .unwrap();

        let result = RecipeAssembler::new(&fs, &registry, "/app")
            .assemble(Path::new("/mock"), EcosystemTag::Python);

        assert!(matches!(
            result,
            Err(RecipeError::UnsupportedTag(EcosystemTag::PythonFlask))
        ));
    }

    #[test]
    fn test_custom_workdir() {
        let fs = MockFileSystem::new();
        fs.add_file("run.sh", "");
        fs.add_dir("data");
        let registry = ProfileRegistry::builtin().unwrap();

        let recipe = RecipeAssembler::new(&fs, &registry, "/srv/app")
            .assemble(Path::new("/mock"), EcosystemTag::Bash)
            .unwrap();

        let rendered = recipe.manifest.render();
        assert!(rendered.contains("WORKDIR /srv/app"));
        assert!(rendered.contains("RUN mkdir -p /srv/app/data"));
    }
}
