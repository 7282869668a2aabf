//! Filesystem inspection: ecosystem classification, Python import scanning
//! and volume directory discovery.

pub mod classifier;
pub mod dependencies;
pub mod volumes;

pub use classifier::{Classification, EcosystemClassifier};
pub use dependencies::DependencyScanner;
pub use volumes::detect_volumes;
