use dockgen::cli::commands::{CliArgs, Commands};
use dockgen::cli::handlers::{handle_config, handle_detect, handle_generate, handle_profiles};
use dockgen::util::logging::{self, LoggingConfig};
use dockgen::VERSION;

use clap::Parser;
use std::env;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("dockgen v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Generate(generate_args) => handle_generate(generate_args, args.quiet),
        Commands::Detect(detect_args) => handle_detect(detect_args),
        Commands::Profiles(profiles_args) => handle_profiles(profiles_args),
        Commands::Config(config_args) => handle_config(config_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        logging::parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str = env::var("DOCKGEN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        logging::parse_level(&level_str)
    };

    logging::init_logging(LoggingConfig {
        level,
        use_json: logging::json_from_env(),
        ..Default::default()
    });
}
