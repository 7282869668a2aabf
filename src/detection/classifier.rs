use crate::fs::{extension_of, FileSystem};
use crate::stack::EcosystemTag;
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// `.gitignore` substrings checked in priority order.
const GITIGNORE_MARKERS: &[(&str, EcosystemTag)] = &[
    ("__pycache__", EcosystemTag::Python),
    ("node_modules", EcosystemTag::Node),
    ("*.sh~", EcosystemTag::Bash),
    ("*.class", EcosystemTag::Java),
    ("*.exe", EcosystemTag::Cpp),
];

const EXTENSIONS: &[(&str, EcosystemTag)] = &[
    ("py", EcosystemTag::Python),
    ("js", EcosystemTag::Node),
    ("mjs", EcosystemTag::Node),
    ("cjs", EcosystemTag::Node),
    ("sh", EcosystemTag::Bash),
    ("java", EcosystemTag::Java),
    ("cpp", EcosystemTag::Cpp),
    ("cc", EcosystemTag::Cpp),
    ("cxx", EcosystemTag::Cpp),
    ("c", EcosystemTag::Cpp),
    ("h", EcosystemTag::Cpp),
    ("hpp", EcosystemTag::Cpp),
    ("hh", EcosystemTag::Cpp),
    ("hxx", EcosystemTag::Cpp),
];

pub const GITIGNORE_FILE: &str = ".gitignore";

/// Outcome of classifying a project tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Classification {
    /// Decided by a marker substring in `.gitignore`
    Marker {
        tag: EcosystemTag,
        marker: &'static str,
    },
    /// Decided by counting source file extensions
    Extensions {
        tag: EcosystemTag,
        counts: BTreeMap<EcosystemTag, usize>,
    },
    Undetermined,
}

impl Classification {
    pub fn tag(&self) -> Option<EcosystemTag> {
        match self {
            Self::Marker { tag, .. } | Self::Extensions { tag, .. } => Some(*tag),
            Self::Undetermined => None,
        }
    }
}

pub fn tag_for_extension(extension: &str) -> Option<EcosystemTag> {
    EXTENSIONS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, tag)| *tag)
}

/// Picks the ecosystem of a project: `.gitignore` markers first, then the
/// most frequent source extension.
pub struct EcosystemClassifier<'a, F: FileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem> EcosystemClassifier<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    pub fn classify(&self, root: &Path) -> Result<Classification> {
        if let Some((tag, marker)) = self.check_gitignore(root)? {
            info!(%tag, marker, "Ecosystem detected from .gitignore");
            return Ok(Classification::Marker { tag, marker });
        }

        let counts = self.count_extensions(root)?;
        match Self::most_common(&counts) {
            Some(tag) => {
                info!(%tag, ?counts, "Ecosystem detected from file extensions");
                Ok(Classification::Extensions { tag, counts })
            }
            None => {
                info!(root = %root.display(), "No recognizable ecosystem");
                Ok(Classification::Undetermined)
            }
        }
    }

    fn check_gitignore(&self, root: &Path) -> Result<Option<(EcosystemTag, &'static str)>> {
        let path = root.join(GITIGNORE_FILE);
        if !self.fs.is_file(&path) {
            return Ok(None);
        }

        let content = self.fs.read_to_string(&path)?;
        Ok(GITIGNORE_MARKERS
            .iter()
            .find(|(marker, _)| content.contains(marker))
            .map(|(marker, tag)| (*tag, *marker)))
    }

    fn count_extensions(&self, root: &Path) -> Result<BTreeMap<EcosystemTag, usize>> {
        let mut counts = BTreeMap::new();
        for path in self.fs.walk_files(root)? {
            if let Some(tag) = extension_of(&path).as_deref().and_then(tag_for_extension) {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
        debug!(?counts, "Extension tally");
        Ok(counts)
    }

    /// Highest count wins; ties go to the earliest tag in
    /// [`EcosystemTag::FAMILIES`].
    fn most_common(counts: &BTreeMap<EcosystemTag, usize>) -> Option<EcosystemTag> {
        let mut best: Option<(EcosystemTag, usize)> = None;
        for tag in EcosystemTag::FAMILIES {
            let count = counts.get(&tag).copied().unwrap_or(0);
            if count > best.map(|(_, c)| c).unwrap_or(0) {
                best = Some((tag, count));
            }
        }
        best.map(|(tag, _)| tag)
    }
}
