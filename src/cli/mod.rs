pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, ConfigArgs, DetectArgs, GenerateArgs, ProfilesArgs};
pub use output::{OutputFormat, OutputFormatter};
