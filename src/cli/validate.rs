//! Validation command for keymaps.

use crate::cli::common::{
    print_json, CliError, CliResult, ValidationChecks, ValidationLocation, ValidationMessage,
    ValidationPosition, ValidationResponse,
};
use crate::config::Config;
use crate::firmware::validator::{
    FirmwareValidator, ValidationErrorKind, ValidationReport, ValidationWarningKind,
};
use crate::keycode_db::KeycodeDb;
use crate::keymap::Keymap;
use crate::parser::load_keymap_json;
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

/// Validate the built-in keymap or a QMK keymap.json
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to a QMK keymap.json (defaults to the built-in keymap)
    #[arg(short, long, value_name = "FILE")]
    pub keymap: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let keycode_db = KeycodeDb::load()
            .map_err(|e| CliError::io(format!("Failed to load keycode database: {e}")))?;
        let validator = FirmwareValidator::new(&keycode_db);

        let report = if let Some(path) = &self.keymap {
            debug!("Validating {}", path.display());
            let raw = load_keymap_json(path)
                .map_err(|e| CliError::io(format!("Failed to load keymap: {e:#}")))?;
            let mut report = validator.validate_raw(&raw);
            FirmwareValidator::check_target(&raw, &config.generate, &mut report);
            report
        } else {
            debug!("Validating built-in keymap");
            validator.validate(&Keymap::dvorak())
        };

        let response = build_response(&report);

        if self.json {
            print_json(&response)?;
        } else {
            print_human(&response);
        }

        // Exit code
        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && !report.warnings.is_empty() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}

fn build_response(report: &ValidationReport) -> ValidationResponse {
    let mut checks = ValidationChecks::all_passed();
    let mut messages = Vec::new();

    for error in &report.errors {
        let check = match error.kind {
            ValidationErrorKind::LayerCount | ValidationErrorKind::MismatchedKeyCount => {
                &mut checks.shape
            }
            ValidationErrorKind::InvalidKeycode => &mut checks.keycodes,
            ValidationErrorKind::TransparentBase => &mut checks.base_layer,
            ValidationErrorKind::UnwiredAssigned => &mut checks.wiring,
            ValidationErrorKind::SelfReferencingLayerTap => &mut checks.layer_taps,
        };
        *check = "failed".to_string();

        let location = error.layer.map(|layer| ValidationLocation {
            layer,
            position: error
                .row
                .zip(error.col)
                .map(|(row, col)| ValidationPosition { row, col }),
        });

        messages.push(ValidationMessage {
            severity: "error".to_string(),
            kind: Some(error.kind.to_string()),
            message: error.message.clone(),
            location,
            suggestion: error.suggestion.clone(),
        });
    }

    for warning in &report.warnings {
        let check = match warning.kind {
            ValidationWarningKind::CoveredLayerTap | ValidationWarningKind::UnreachableLayer => {
                &mut checks.layer_taps
            }
            ValidationWarningKind::TargetMismatch => &mut checks.target,
        };
        if *check == "passed" {
            *check = "warning".to_string();
        }

        messages.push(ValidationMessage {
            severity: "warning".to_string(),
            kind: Some(warning.kind.to_string()),
            message: warning.message.clone(),
            location: None,
            suggestion: None,
        });
    }

    ValidationResponse {
        valid: report.is_valid(),
        errors: messages,
        checks,
    }
}

fn print_human(response: &ValidationResponse) {
    if response.valid {
        println!("✓ Validation passed");
    } else {
        println!("✗ Validation failed");
    }

    println!("\nChecks:");
    println!("  Shape:      {}", response.checks.shape);
    println!("  Keycodes:   {}", response.checks.keycodes);
    println!("  Base layer: {}", response.checks.base_layer);
    println!("  Wiring:     {}", response.checks.wiring);
    println!("  Layer taps: {}", response.checks.layer_taps);
    println!("  Target:     {}", response.checks.target);

    if !response.errors.is_empty() {
        println!("\nIssues:");
        for msg in &response.errors {
            let prefix = if msg.severity == "error" {
                "  ✗"
            } else {
                "  ⚠"
            };
            match &msg.location {
                Some(ValidationLocation {
                    layer,
                    position: Some(pos),
                }) => println!(
                    "{} [Layer {} ({}, {})] {}",
                    prefix, layer, pos.row, pos.col, msg.message
                ),
                Some(ValidationLocation { layer, .. }) => {
                    println!("{} [Layer {}] {}", prefix, layer, msg.message);
                }
                None => println!("{} {}", prefix, msg.message),
            }
            if let Some(suggestion) = &msg.suggestion {
                println!("      → {suggestion}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firmware::validator::{ValidationError, ValidationWarning};

    #[test]
    fn test_response_marks_failed_checks() {
        let mut report = ValidationReport::new();
        report.add_error(
            ValidationError::new(ValidationErrorKind::TransparentBase, "transparent")
                .with_layer(0)
                .with_position(2, 3),
        );
        report.add_warning(ValidationWarning::new(
            ValidationWarningKind::UnreachableLayer,
            "unreachable",
        ));
        report.add_warning(ValidationWarning::new(
            ValidationWarningKind::TargetMismatch,
            "other board",
        ));

        let response = build_response(&report);
        assert!(!response.valid);
        assert_eq!(response.checks.base_layer, "failed");
        assert_eq!(response.checks.layer_taps, "warning");
        assert_eq!(response.checks.target, "warning");
        assert_eq!(response.checks.keycodes, "passed");
        assert_eq!(response.errors.len(), 3);
        assert_eq!(response.errors[0].severity, "error");
        assert_eq!(response.errors[1].severity, "warning");
        assert_eq!(response.errors[2].kind.as_deref(), Some("Target Mismatch"));
    }

    #[test]
    fn test_clean_report_response() {
        let response = build_response(&ValidationReport::new());
        assert!(response.valid);
        assert!(response.errors.is_empty());
        assert_eq!(response.checks.shape, "passed");
    }
}
