//! Subcommand handlers. Each returns the process exit code.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};

use super::commands::{ConfigArgs, DetectArgs, GenerateArgs, ProfilesArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::config::DockgenConfig;
use crate::fs::RealFileSystem;
use crate::pipeline::{GenerationOrchestrator, GenerationOutcome};
use crate::stack::ProfileRegistry;

pub fn handle_generate(args: &GenerateArgs, quiet: bool) -> i32 {
    exit_code(run_generate(args, quiet))
}

pub fn handle_detect(args: &DetectArgs) -> i32 {
    exit_code(run_detect(args))
}

pub fn handle_profiles(args: &ProfilesArgs) -> i32 {
    exit_code(run_profiles(args))
}

pub fn handle_config(args: &ConfigArgs) -> i32 {
    exit_code(run_config(args))
}

fn run_generate(args: &GenerateArgs, quiet: bool) -> Result<()> {
    let config = load_config(args.profiles.clone())?;
    let root = project_root(args.project_path.clone())?;
    let fs = RealFileSystem;
    let registry = ProfileRegistry::load(&fs, config.profiles_path.as_deref())?;

    info!(root = %root.display(), "Generating build files");
    let outcome = GenerationOrchestrator::new(&fs, &registry, &config).execute(&root, args.dry_run)?;
    if let GenerationOutcome::Undetermined { root } = &outcome {
        info!(root = %root.display(), "No recognized ecosystem, nothing written");
    }

    let format: OutputFormat = args.format.into();
    let output = OutputFormatter::new(format).format_outcome(&outcome)?;

    let confirmation_only = format == OutputFormat::Human
        && !args.dry_run
        && matches!(outcome, GenerationOutcome::Generated(_));
    if !(quiet && confirmation_only) {
        emit(&output);
    }
    Ok(())
}

fn run_detect(args: &DetectArgs) -> Result<()> {
    let config = load_config(None)?;
    let root = project_root(args.project_path.clone())?;
    let fs = RealFileSystem;
    let registry = ProfileRegistry::load(&fs, config.profiles_path.as_deref())?;

    let classification = GenerationOrchestrator::new(&fs, &registry, &config).classify(&root)?;
    debug!(?classification, "Classification complete");

    emit(&OutputFormatter::new(args.format.into()).format_classification(&classification)?);
    Ok(())
}

fn run_profiles(args: &ProfilesArgs) -> Result<()> {
    let config = load_config(args.profiles.clone())?;
    let registry = ProfileRegistry::load(&RealFileSystem, config.profiles_path.as_deref())?;

    emit(&OutputFormatter::new(args.format.into()).format_profiles(&registry)?);
    Ok(())
}

fn run_config(args: &ConfigArgs) -> Result<()> {
    let config = load_config(None)?;
    emit(&OutputFormatter::new(args.format.into()).format_config(&config)?);
    Ok(())
}

/// Environment configuration with command-line overrides applied, validated.
fn load_config(profiles: Option<PathBuf>) -> Result<DockgenConfig> {
    let default_config = DockgenConfig::default();
    let config = DockgenConfig {
        profiles_path: profiles.or(default_config.profiles_path.clone()),
        ..default_config
    };
    if config.profiles_path.is_some() {
        debug!(profiles = ?config.profiles_path, "Using custom profile table");
    }
    config.validate()?;
    Ok(config)
}

fn project_root(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => env::current_dir().context("Failed to get current directory"),
    }
}

fn emit(output: &str) {
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}

fn exit_code(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            debug!(error = ?e, "Command failed");
            eprintln!("Error: {:#}", e);
            1
        }
    }
}
