//! Ecosystem identifiers and the profile table keyed by them.
//!
//! [`EcosystemTag`] is a closed set of ecosystems. Each tag maps to an
//! [`EcosystemProfile`] holding the base image, setup commands, port, launch
//! command and ignore patterns used when rendering a Dockerfile.
//!
//! The built-in table lives in `profiles.toml` and is compiled into the
//! binary. [`ProfileRegistry`] is constructed once per run and never mutated.
//!
//! # Example
//!
//! ```
//! use dockgen::stack::{EcosystemTag, ProfileRegistry};
//!
//! let registry = ProfileRegistry::builtin().unwrap();
//! let tag = EcosystemTag::Python.refine(&["flask"]);
//! assert_eq!(tag, EcosystemTag::PythonFlask);
//! assert_eq!(registry.get(tag).unwrap().port, Some(8080));
//! ```

#[macro_use]
pub mod id_enum_macro;

pub mod ecosystem;
pub mod profile;
pub mod registry;

pub use ecosystem::EcosystemTag;
pub use profile::{EcosystemProfile, InstallStep};
pub use registry::{ProfileError, ProfileRegistry};
