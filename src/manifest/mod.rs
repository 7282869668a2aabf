//! Dockerfile and `.dockerignore` assembly.

pub mod assembler;
pub mod ir;

pub use assembler::{PendingFile, Recipe, RecipeAssembler, RecipeError};
pub use ir::{BuildManifest, IgnoreList, ManifestSection};
