//! dockgen - zero-configuration Dockerfile generation
//!
//! Inspects a project directory, infers its primary ecosystem and writes a
//! `Dockerfile` and `.dockerignore` tailored to it.
//!
//! # Core Concepts
//!
//! - **Classification**: `.gitignore` markers first, then source file
//!   extension counts, decide an [`EcosystemTag`]
//! - **Refinement**: Python projects are narrowed to CUDA, Flask, Streamlit
//!   or Gradio variants from their third-party imports
//! - **Profiles**: an immutable [`ProfileRegistry`] maps each tag to a base
//!   image, setup commands, port, launch command and ignore patterns
//! - **Recipe**: the typed Dockerfile sections, ignore list and any
//!   generated `requirements.txt` for one project
//!
//! # Example Usage
//!
//! ```no_run
//! use dockgen::{DockgenConfig, GenerationOrchestrator, ProfileRegistry, RealFileSystem};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let fs = RealFileSystem;
//! let registry = ProfileRegistry::builtin()?;
//! let config = DockgenConfig::default();
//!
//! let outcome = GenerationOrchestrator::new(&fs, &registry, &config)
//!     .execute(Path::new("/path/to/project"), false)?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`stack`]: ecosystem tags and the profile table
//! - [`detection`]: classification, Python import scanning, volume discovery
//! - [`manifest`]: Dockerfile IR and recipe assembly
//! - [`pipeline`]: end-to-end generation including file writes
//! - [`fs`]: filesystem abstraction with real and in-memory implementations

pub mod cli;
pub mod config;
pub mod detection;
pub mod fs;
pub mod manifest;
pub mod pipeline;
pub mod stack;
pub mod util;

pub use config::{ConfigError, DockgenConfig};
pub use detection::{Classification, DependencyScanner, EcosystemClassifier};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use manifest::{BuildManifest, IgnoreList, Recipe, RecipeAssembler, RecipeError};
pub use pipeline::{GenerationOrchestrator, GenerationOutcome, GenerationReport};
pub use stack::{EcosystemProfile, EcosystemTag, ProfileError, ProfileRegistry};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
