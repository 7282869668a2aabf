use super::{EcosystemProfile, EcosystemTag};
use crate::fs::FileSystem;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

const BUILTIN_PROFILES: &str = include_str!("profiles.toml");

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to parse profile table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("No profile defined for ecosystem '{0}'")]
    MissingProfile(EcosystemTag),

    #[error("Profile '{tag}' is invalid: {reason}")]
    Invalid { tag: EcosystemTag, reason: String },
}

/// Immutable lookup table from ecosystem tag to profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileRegistry {
    version: u32,
    #[serde(default)]
    ignore: Vec<String>,
    profiles: BTreeMap<EcosystemTag, EcosystemProfile>,
}

impl ProfileRegistry {
    /// The compiled-in table.
    pub fn builtin() -> Result<Self, ProfileError> {
        Self::from_toml_str(BUILTIN_PROFILES)
    }

    /// Parses and validates a table: every tag must have a usable profile.
    pub fn from_toml_str(content: &str) -> Result<Self, ProfileError> {
        let registry = Self::parse(content)?;
        registry.validate()?;
        Ok(registry)
    }

    /// Parses a table without checking that it covers every tag.
    pub fn parse(content: &str) -> Result<Self, ProfileError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file<F: FileSystem>(fs: &F, path: &Path) -> Result<Self> {
        let content = fs.read_to_string(path)?;
        let registry = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid profile table {:?}", path))?;
        debug!(path = %path.display(), version = registry.version, "Loaded profile table");
        Ok(registry)
    }

    /// Loads `path` when given, the built-in table otherwise.
    pub fn load<F: FileSystem>(fs: &F, path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(fs, path),
            None => Ok(Self::builtin()?),
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        for tag in EcosystemTag::all_variants() {
            let profile = self
                .profiles
                .get(tag)
                .ok_or(ProfileError::MissingProfile(*tag))?;

            if profile.base_image.trim().is_empty() {
                return Err(ProfileError::Invalid {
                    tag: *tag,
                    reason: "base_image is empty".to_string(),
                });
            }
            if profile.port == Some(0) {
                return Err(ProfileError::Invalid {
                    tag: *tag,
                    reason: "port must be between 1 and 65535".to_string(),
                });
            }
            if matches!(&profile.cmd, Some(cmd) if cmd.is_empty()) {
                return Err(ProfileError::Invalid {
                    tag: *tag,
                    reason: "cmd must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn get(&self, tag: EcosystemTag) -> Option<&EcosystemProfile> {
        self.profiles.get(&tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EcosystemTag, &EcosystemProfile)> {
        self.profiles.iter()
    }

    /// Patterns applied to every ecosystem.
    pub fn global_ignore(&self) -> &[String] {
        &self.ignore
    }

    /// Global patterns followed by the tag's own, first occurrence kept.
    pub fn ignore_patterns(&self, tag: EcosystemTag) -> Vec<String> {
        let own = self.get(tag).map(|p| p.ignore.as_slice()).unwrap_or(&[]);
        let mut patterns: Vec<String> = Vec::with_capacity(self.ignore.len() + own.len());
        for pattern in self.ignore.iter().chain(own) {
            if !patterns.contains(pattern) {
                patterns.push(pattern.clone());
            }
        }
        patterns
    }
}
