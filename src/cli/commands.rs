use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Zero-configuration Dockerfile generator
#[derive(Parser, Debug)]
#[command(
    name = "dockgen",
    about = "Detect a project's ecosystem and generate a Dockerfile and .dockerignore for it",
    version,
    author,
    long_about = "dockgen inspects a project directory, infers its primary ecosystem \
                  (python, node, bash, java, cpp) from .gitignore markers or source file \
                  extensions, and writes a Dockerfile and .dockerignore tailored to it. \
                  Python projects are further refined to CUDA, Flask, Streamlit or Gradio \
                  images based on their imports."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate Dockerfile and .dockerignore for a project",
        long_about = "Classifies the project, assembles a build recipe for its ecosystem and \
                      writes Dockerfile and .dockerignore at the project root. Python projects \
                      without a requirements.txt get one generated from their imports. The \
                      reported project type is the one after import refinement, e.g. \
                      python-flask rather than python.\n\n\
                      Examples:\n  \
                      dockgen generate\n  \
                      dockgen generate /path/to/project\n  \
                      dockgen generate --dry-run --format json"
    )]
    Generate(GenerateArgs),

    #[command(
        about = "Detect the project ecosystem without writing anything",
        long_about = "Runs only the classifier and reports the detected ecosystem and how it \
                      was decided.\n\n\
                      Examples:\n  \
                      dockgen detect\n  \
                      dockgen detect /path/to/project --format yaml"
    )]
    Detect(DetectArgs),

    #[command(about = "Show the ecosystem profile table")]
    Profiles(ProfilesArgs),

    #[command(about = "Show the effective configuration")]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to the project (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "TOML profile table to use instead of the built-in one"
    )]
    pub profiles: Option<PathBuf>,

    #[arg(long, help = "Print the generated files instead of writing them")]
    pub dry_run: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to the project (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ProfilesArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "TOML profile table to show instead of the built-in one"
    )]
    pub profiles: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
