//! Moonlander Dvorak - keymap tool for the ZSA Moonlander
//!
//! Validates the Dvorak keymap, prints layer diagrams and generates the QMK
//! `keymap.c` and `keymap.json` files.

use clap::{Parser, Subcommand};
use moonlander_dvorak::cli::{
    CliError, ExitCode, GenerateArgs, KeycodesArgs, LookupArgs, ShowArgs, ValidateArgs,
};
use moonlander_dvorak::config::Config;
use moonlander_dvorak::constants::APP_NAME;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Moonlander Dvorak - keymap tool for the ZSA Moonlander
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the built-in keymap or a QMK keymap.json
    Validate(ValidateArgs),
    /// Generate QMK keymap files
    Generate(GenerateArgs),
    /// Print keyboard diagrams of the keymap layers
    Show(ShowArgs),
    /// Show what one key does on one layer
    Lookup(LookupArgs),
    /// List, filter and search keycodes
    Keycodes(KeycodesArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let config = match Config::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(cli.verbose, "warn");
            eprintln!("Error: Failed to load config: {e:#}");
            return std::process::ExitCode::from(ExitCode::IoError.code());
        }
    };

    if let Err(e) = config.validate() {
        init_tracing(cli.verbose, "warn");
        eprintln!("Error: Invalid configuration: {e}");
        return std::process::ExitCode::from(ExitCode::ValidationError.code());
    }

    init_tracing(cli.verbose, &config.logging.level);
    debug!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let result = match &cli.command {
        Command::Validate(args) => args.execute(&config),
        Command::Generate(args) => args.execute(&config),
        Command::Show(args) => args.execute(),
        Command::Lookup(args) => args.execute(),
        Command::Keycodes(args) => args.execute(),
    };

    match result {
        Ok(()) => std::process::ExitCode::from(ExitCode::Success.code()),
        Err(CliError { exit_code, message }) => {
            eprintln!("Error: {message}");
            std::process::ExitCode::from(exit_code.code())
        }
    }
}

/// Initializes tracing on stderr so JSON on stdout stays clean.
fn init_tracing(verbose: bool, level: &str) {
    let filter = if verbose { "debug" } else { level };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
