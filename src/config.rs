//! Configuration management for dockgen
//!
//! Settings are loaded from environment variables with defaults, then
//! optionally overridden by command-line flags.
//!
//! # Environment Variables
//!
//! - `DOCKGEN_WORKDIR`: Container working directory - default: "/app"
//! - `DOCKGEN_MANIFEST_FILE`: Generated build recipe name - default: "Dockerfile"
//! - `DOCKGEN_IGNORE_FILE`: Generated ignore list name - default: ".dockerignore"
//! - `DOCKGEN_PROFILES`: Path to a TOML profile table replacing the built-in one
//! - `DOCKGEN_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```
//! use dockgen::DockgenConfig;
//!
//! let config = DockgenConfig::default();
//! config.validate().expect("Invalid configuration");
//! ```

use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_WORKDIR: &str = "/app";
const DEFAULT_MANIFEST_FILE: &str = "Dockerfile";
const DEFAULT_IGNORE_FILE: &str = ".dockerignore";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Main configuration structure for dockgen
#[derive(Debug, Clone)]
pub struct DockgenConfig {
    /// Working directory inside the image; volume paths are rooted here
    pub workdir: String,

    /// File name of the generated build recipe
    pub manifest_file: String,

    /// File name of the generated ignore list
    pub ignore_file: String,

    /// Profile table replacing the built-in one
    pub profiles_path: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for DockgenConfig {
    /// Loads from `DOCKGEN_*` environment variables, falling back to defaults
    fn default() -> Self {
        let workdir = env::var("DOCKGEN_WORKDIR").unwrap_or_else(|_| DEFAULT_WORKDIR.to_string());

        let manifest_file = env::var("DOCKGEN_MANIFEST_FILE")
            .unwrap_or_else(|_| DEFAULT_MANIFEST_FILE.to_string());

        let ignore_file =
            env::var("DOCKGEN_IGNORE_FILE").unwrap_or_else(|_| DEFAULT_IGNORE_FILE.to_string());

        let profiles_path = env::var("DOCKGEN_PROFILES")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let log_level = env::var("DOCKGEN_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            workdir,
            manifest_file,
            ignore_file,
            profiles_path,
            log_level,
        }
    }
}

impl DockgenConfig {
    /// Validates the configuration
    ///
    /// Checks that the workdir is absolute, output names are bare file names
    /// and the log level is known.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.workdir.starts_with('/') {
            return Err(ConfigError::ValidationFailed(format!(
                "Workdir must be an absolute container path, got '{}'",
                self.workdir
            )));
        }

        for (field, name) in [
            ("manifest file", &self.manifest_file),
            ("ignore file", &self.ignore_file),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(format!(
                    "The {} name must not be empty",
                    field
                )));
            }
            if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
                return Err(ConfigError::ValidationFailed(format!(
                    "The {} name must be a plain file name, got '{}'",
                    field, name
                )));
            }
        }

        if self.manifest_file == self.ignore_file {
            return Err(ConfigError::ValidationFailed(
                "Manifest and ignore file names must differ".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Converts configuration to a display map for output formatting
    pub fn to_display_map(&self) -> std::collections::BTreeMap<String, String> {
        let mut map = std::collections::BTreeMap::new();

        map.insert("workdir".to_string(), self.workdir.clone());
        map.insert("manifest_file".to_string(), self.manifest_file.clone());
        map.insert("ignore_file".to_string(), self.ignore_file.clone());
        map.insert(
            "profiles".to_string(),
            self.profiles_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string()),
        );
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

impl fmt::Display for DockgenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dockgen Configuration:")?;
        writeln!(f, "  Workdir: {}", self.workdir)?;
        writeln!(f, "  Manifest File: {}", self.manifest_file)?;
        writeln!(f, "  Ignore File: {}", self.ignore_file)?;
        match &self.profiles_path {
            Some(path) => writeln!(f, "  Profiles: {}", path.display())?,
            None => writeln!(f, "  Profiles: built-in")?,
        }
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
