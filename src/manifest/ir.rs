//! Typed Dockerfile sections and their text rendering.

use serde::Serialize;
use std::fmt;

/// One instruction of a generated Dockerfile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ManifestSection {
    BaseImage(String),
    Workdir(String),
    /// `COPY . .`
    CopyAll,
    Mkdir(Vec<String>),
    Run(String),
    /// Dependency install command
    Install(String),
    Volume(Vec<String>),
    Expose(u16),
    Cmd(Vec<String>),
}

impl ManifestSection {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::BaseImage(_) => "FROM",
            Self::Workdir(_) => "WORKDIR",
            Self::CopyAll => "COPY",
            Self::Mkdir(_) | Self::Run(_) | Self::Install(_) => "RUN",
            Self::Volume(_) => "VOLUME",
            Self::Expose(_) => "EXPOSE",
            Self::Cmd(_) => "CMD",
        }
    }
}

impl fmt::Display for ManifestSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = self.keyword();
        match self {
            Self::BaseImage(image) => write!(f, "{} {}", keyword, image),
            Self::Workdir(dir) => write!(f, "{} {}", keyword, dir),
            Self::CopyAll => write!(f, "{} . .", keyword),
            Self::Mkdir(dirs) => write!(f, "{} mkdir -p {}", keyword, dirs.join(" ")),
            Self::Run(command) | Self::Install(command) => write!(f, "{} {}", keyword, command),
            Self::Volume(paths) => write!(f, "{} {}", keyword, exec_form(paths)),
            Self::Expose(port) => write!(f, "{} {}", keyword, port),
            Self::Cmd(args) => write!(f, "{} {}", keyword, exec_form(args)),
        }
    }
}

/// JSON array with `", "` separators, e.g. `["python", "app.py"]`.
fn exec_form(items: &[String]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| serde_json::Value::String(item.clone()).to_string())
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// Ordered Dockerfile sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildManifest {
    sections: Vec<ManifestSection>,
}

impl BuildManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, section: ManifestSection) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[ManifestSection] {
        &self.sections
    }

    pub fn base_image(&self) -> Option<&str> {
        self.sections.iter().find_map(|s| match s {
            ManifestSection::BaseImage(image) => Some(image.as_str()),
            _ => None,
        })
    }

    /// Sections separated by a blank line, terminated by a newline.
    pub fn render(&self) -> String {
        let mut out = self
            .sections
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

/// `.dockerignore` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IgnoreList {
    entries: Vec<String>,
}

impl IgnoreList {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn render(&self) -> String {
        self.entries.join("\n")
    }
}
