//! CLI command handlers.
//!
//! Each subcommand is a clap `Args` struct with an `execute` method that
//! returns a [`CliResult`]; `main` maps errors to exit codes.

pub mod common;
pub mod generate;
pub mod keycodes;
pub mod lookup;
pub mod show;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use generate::GenerateArgs;
pub use keycodes::KeycodesArgs;
pub use lookup::LookupArgs;
pub use show::ShowArgs;
pub use validate::ValidateArgs;
