//! Output formatting for multiple formats
//!
//! Renders generation outcomes, classifications, the profile table and the
//! effective configuration as JSON, YAML or human-readable text.
//!
//! # Example
//!
//! ```
//! use dockgen::cli::output::{OutputFormat, OutputFormatter};
//! use dockgen::stack::ProfileRegistry;
//!
//! let registry = ProfileRegistry::builtin().unwrap();
//! let formatter = OutputFormatter::new(OutputFormat::Json);
//! let output = formatter.format_profiles(&registry).unwrap();
//! assert!(output.contains("python-flask"));
//! ```

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::DockgenConfig;
use crate::detection::Classification;
use crate::pipeline::{GenerationOutcome, GenerationReport};
use crate::stack::ProfileRegistry;

pub const UNDETERMINED_MESSAGE: &str = "Unable to determine project type.";

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_outcome(&self, outcome: &GenerationOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(outcome, "generation outcome"),
            OutputFormat::Yaml => to_yaml(outcome, "generation outcome"),
            OutputFormat::Human => Ok(self.format_outcome_human(outcome)),
        }
    }

    pub fn format_classification(&self, classification: &Classification) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(classification, "classification"),
            OutputFormat::Yaml => to_yaml(classification, "classification"),
            OutputFormat::Human => Ok(self.format_classification_human(classification)),
        }
    }

    pub fn format_profiles(&self, registry: &ProfileRegistry) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(registry, "profile table"),
            OutputFormat::Yaml => to_yaml(registry, "profile table"),
            OutputFormat::Human => Ok(self.format_profiles_human(registry)),
        }
    }

    pub fn format_config(&self, config: &DockgenConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(&config.to_display_map(), "config"),
            OutputFormat::Yaml => to_yaml(&config.to_display_map(), "config"),
            OutputFormat::Human => Ok(config.to_string()),
        }
    }

    // Human formatting methods

    fn format_outcome_human(&self, outcome: &GenerationOutcome) -> String {
        match outcome {
            GenerationOutcome::Undetermined { .. } => format!("{}\n", UNDETERMINED_MESSAGE),
            GenerationOutcome::Generated(report) if report.dry_run => self.format_dry_run(report),
            GenerationOutcome::Generated(report) => self.format_generated(report),
        }
    }

    fn format_generated(&self, report: &GenerationReport) -> String {
        let mut output = format!("Detected project type: {}\n", report.recipe.tag);

        if let Some(pending) = &report.recipe.dependency_manifest {
            if report.written.contains(&pending.name) {
                output.push_str(&format!("{} created.\n", pending.name));
            }
        }

        output.push_str(&format!(
            "{} and {} created successfully.\n",
            report.manifest_file, report.ignore_file
        ));
        output
    }

    fn format_dry_run(&self, report: &GenerationReport) -> String {
        let recipe = &report.recipe;
        let mut output = format!("Detected project type: {}\n", recipe.tag);
        if recipe.was_refined() {
            output.push_str(&format!(
                "Refined from {} by dependencies: {}\n",
                recipe.detected,
                recipe.dependencies.join(", ")
            ));
        }

        if let Some(pending) = &recipe.dependency_manifest {
            output.push_str(&format!("\n# {}\n{}", pending.name, pending.contents));
        }
        output.push_str(&format!(
            "\n# {}\n{}",
            report.manifest_file,
            recipe.manifest.render()
        ));
        output.push_str(&format!("\n# {}\n{}\n", report.ignore_file, recipe.ignore.render()));
        output
    }

    fn format_classification_human(&self, classification: &Classification) -> String {
        match classification {
            Classification::Undetermined => format!("{}\n", UNDETERMINED_MESSAGE),
            Classification::Marker { tag, marker } => format!(
                "Detected project type: {}\nDecided by .gitignore marker: {}\n",
                tag, marker
            ),
            Classification::Extensions { tag, counts } => {
                let counts = counts
                    .iter()
                    .map(|(tag, count)| format!("{}={}", tag, count))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "Detected project type: {}\nDecided by file extensions: {}\n",
                    tag, counts
                )
            }
        }
    }

    fn format_profiles_human(&self, registry: &ProfileRegistry) -> String {
        let mut output = format!("Ecosystem Profiles (version {})\n\n", registry.version());

        for (tag, profile) in registry.iter() {
            output.push_str(&format!("{}\n", tag));
            output.push_str(&format!("\u{251C}\u{2500} Image:   {}\n", profile.base_image));
            if let Some(setup) = profile.setup_command() {
                output.push_str(&format!("\u{251C}\u{2500} Setup:   {}\n", setup));
            }
            if let Some(install) = &profile.install {
                output.push_str(&format!(
                    "\u{251C}\u{2500} Install: {} ({})\n",
                    install.command, install.manifest
                ));
            }
            if let Some(port) = profile.port {
                output.push_str(&format!("\u{251C}\u{2500} Port:    {}\n", port));
            }
            match &profile.cmd {
                Some(cmd) => {
                    output.push_str(&format!("\u{2514}\u{2500} Cmd:     {}\n\n", cmd.join(" ")))
                }
                None => output.push_str("\u{2514}\u{2500} Cmd:     (none)\n\n"),
            }
        }

        output.push_str(&format!(
            "Global ignore: {}\n",
            registry.global_ignore().join(", ")
        ));
        output
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {} to JSON", what))
}

fn to_yaml<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}
