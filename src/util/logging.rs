//! Structured logging setup for dockgen
//!
//! Initializes a `tracing` subscriber that writes to stderr, keeping stdout
//! free for generated output. Supports pretty or JSON formatting and honors
//! `RUST_LOG` when set.
//!
//! # Example
//!
//! ```no_run
//! use dockgen::util::logging::{self, LoggingConfig};
//! use tracing::info;
//!
//! logging::init_logging(LoggingConfig {
//!     use_json: logging::json_from_env(),
//!     ..Default::default()
//! });
//! info!(root = "/tmp/project", "Generating build files");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., dockgen::detection) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,

    /// Include thread ID and name in logs
    pub include_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

/// Parses a log level from a string, case-insensitively
///
/// Unknown values fall back to `INFO` with a warning on stderr.
///
/// ```
/// use dockgen::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("WARN"), Level::WARN);
/// assert_eq!(parse_level("loud"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn build_filter(level: Level) -> EnvFilter {
    if env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }

    let mut filter = EnvFilter::new("warn");
    if let Ok(directive) = format!("dockgen={}", level).parse::<Directive>() {
        filter = filter.add_directive(directive);
    }
    if let Ok(directive) = "ignore=warn".parse::<Directive>() {
        filter = filter.add_directive(directive);
    }
    filter
}

/// Initializes the logging system; later calls are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .init();
        }
    });
}

/// Reads `DOCKGEN_LOG_JSON`; anything but `true` means pretty output
pub fn json_from_env() -> bool {
    env::var("DOCKGEN_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false)
}
