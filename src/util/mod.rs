//! Utility modules for dockgen

pub mod logging;

pub use logging::{init_logging, LoggingConfig};
