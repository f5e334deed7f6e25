//! Shared CLI types: exit codes, errors and JSON response shapes.

use serde::Serialize;
use std::fmt;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Validation or usage failure
    ValidationError = 1,
    /// File or serialization failure
    IoError = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// CLI command failure.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Exit code to terminate with
    pub exit_code: ExitCode,
    /// Message printed as `Error: ...`
    pub message: String,
}

impl CliError {
    /// Validation or usage failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// File or serialization failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::IoError,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type of CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value)
            .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
    );
    Ok(())
}

/// Matrix position in JSON output.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ValidationPosition {
    /// Matrix row
    pub row: u8,
    /// Matrix column
    pub col: u8,
}

/// Where a validation message applies.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ValidationLocation {
    /// Layer index
    pub layer: usize,
    /// Matrix position, when the message concerns one key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<ValidationPosition>,
}

/// One error or warning in JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationMessage {
    /// "error" or "warning"
    pub severity: String,
    /// Error kind (errors only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Message text
    pub message: String,
    /// Location, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<ValidationLocation>,
    /// Suggested fix, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Status of each check group: "passed", "warning" or "failed".
#[derive(Debug, Clone, Serialize)]
pub struct ValidationChecks {
    /// Layer and key counts
    pub shape: String,
    /// Every expression parses
    pub keycodes: String,
    /// No transparent cell on the base layer
    pub base_layer: String,
    /// Unwired cells stay empty
    pub wiring: String,
    /// Layer-tap targets and reachability
    pub layer_taps: String,
    /// Keyboard and layout macro of a loaded keymap match the config
    pub target: String,
}

impl ValidationChecks {
    /// All checks passed.
    #[must_use]
    pub fn all_passed() -> Self {
        Self {
            shape: "passed".to_string(),
            keycodes: "passed".to_string(),
            base_layer: "passed".to_string(),
            wiring: "passed".to_string(),
            layer_taps: "passed".to_string(),
            target: "passed".to_string(),
        }
    }
}

/// JSON output of `validate`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    /// True when there are no errors
    pub valid: bool,
    /// Errors and warnings, errors first
    pub errors: Vec<ValidationMessage>,
    /// Per-check status
    pub checks: ValidationChecks,
}
