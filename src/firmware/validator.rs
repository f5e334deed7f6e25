//! Keymap validation before generation.
//!
//! This module checks that a keymap can be compiled into QMK firmware and
//! behaves the way a layered layout is expected to: the base layer is fully
//! defined, unwired cells stay empty and every layer-tap key points somewhere
//! useful.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use crate::config::GenerateConfig;
use crate::keycode::KeyCode;
use crate::keycode_db::KeycodeDb;
use crate::keymap::Keymap;
use crate::models::geometry::{self, LAYOUT_POSITIONS};
use crate::models::{Layer, Position, KEY_COUNT};
use crate::parser::RawKeymap;
use serde::Serialize;
use std::collections::HashSet;

/// Validation result with specific errors and warnings.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Critical errors that prevent firmware generation
    pub errors: Vec<ValidationError>,
    /// Non-critical warnings
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Creates a new empty validation report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Formats the report as a user-friendly error message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("❌ {} validation errors:\n", self.errors.len()));
            for (idx, error) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, error));
            }
        }

        if !self.warnings.is_empty() {
            message.push_str(&format!("\n⚠️  {} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning));
            }
        }

        message
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation error with context.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    /// Type of validation error
    pub kind: ValidationErrorKind,
    /// Layer index where error occurred
    pub layer: Option<usize>,
    /// Row in matrix where error occurred
    pub row: Option<u8>,
    /// Column in matrix where error occurred
    pub col: Option<u8>,
    /// Human-readable error message
    pub message: String,
    /// Optional suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            layer: None,
            row: None,
            col: None,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Sets the layer context.
    #[must_use]
    pub const fn with_layer(mut self, layer: usize) -> Self {
        self.layer = Some(layer);
        self
    }

    /// Sets the position context.
    #[must_use]
    pub const fn with_position(mut self, row: u8, col: u8) -> Self {
        self.row = Some(row);
        self.col = Some(col);
        self
    }

    /// Sets a suggestion for fixing the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let (Some(layer), Some(row), Some(col)) = (self.layer, self.row, self.col) {
            write!(
                f,
                "[Layer {} ({}, {})] {}: {}",
                layer, row, col, self.kind, self.message
            )?;
        } else if let Some(layer) = self.layer {
            write!(f, "[Layer {}] {}: {}", layer, self.kind, self.message)?;
        } else {
            write!(f, "{}: {}", self.kind, self.message)?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n    → {suggestion}")?;
        }

        Ok(())
    }
}

/// Types of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Keycode not recognized
    InvalidKeycode,
    /// Wrong number of layers
    LayerCount,
    /// Number of keys doesn't match the `LAYOUT` macro
    MismatchedKeyCount,
    /// Transparent cell on the base layer
    TransparentBase,
    /// Code assigned to a matrix cell with no switch
    UnwiredAssigned,
    /// Layer-tap key that activates its own layer
    SelfReferencingLayerTap,
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKeycode => write!(f, "Invalid Keycode"),
            Self::LayerCount => write!(f, "Layer Count"),
            Self::MismatchedKeyCount => write!(f, "Mismatched Key Count"),
            Self::TransparentBase => write!(f, "Transparent Base"),
            Self::UnwiredAssigned => write!(f, "Unwired Assigned"),
            Self::SelfReferencingLayerTap => write!(f, "Self-Referencing Layer Tap"),
        }
    }
}

/// Types of validation warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationWarningKind {
    /// Layer-tap position is not transparent on the target layer
    CoveredLayerTap,
    /// No layer-tap key leads to the layer
    UnreachableLayer,
    /// Keymap file written for another keyboard or layout macro
    TargetMismatch,
}

impl std::fmt::Display for ValidationWarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CoveredLayerTap => write!(f, "Covered Layer Tap"),
            Self::UnreachableLayer => write!(f, "Unreachable Layer"),
            Self::TargetMismatch => write!(f, "Target Mismatch"),
        }
    }
}

/// Validation warning (non-blocking).
#[derive(Debug, Clone, Serialize)]
pub struct ValidationWarning {
    /// Type of warning
    pub kind: ValidationWarningKind,
    /// Warning message
    pub message: String,
}

impl ValidationWarning {
    /// Creates a new validation warning
    pub fn new(kind: ValidationWarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Keymap validator.
pub struct FirmwareValidator<'a> {
    keycode_db: &'a KeycodeDb,
}

impl<'a> FirmwareValidator<'a> {
    /// Creates a new validator.
    #[must_use]
    pub const fn new(keycode_db: &'a KeycodeDb) -> Self {
        Self { keycode_db }
    }

    /// Validates a keymap loaded from `keymap.json`.
    ///
    /// Shape and keycode errors are reported first; the semantic checks of
    /// [`Self::validate`] only run once every expression parses.
    #[must_use]
    pub fn validate_raw(&self, raw: &RawKeymap) -> ValidationReport {
        let mut report = ValidationReport::new();

        if raw.layers.len() != Layer::COUNT {
            report.add_error(
                ValidationError::new(
                    ValidationErrorKind::LayerCount,
                    format!(
                        "Keymap has {} layers, expected {}",
                        raw.layers.len(),
                        Layer::COUNT
                    ),
                )
                .with_suggestion("Define exactly one BASE and one MEDIA layer"),
            );
        }

        let mut layers = Vec::with_capacity(raw.layers.len());
        for (layer_idx, keys) in raw.layers.iter().enumerate() {
            if keys.len() != KEY_COUNT {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::MismatchedKeyCount,
                        format!(
                            "Layer {} has {} keys, expected {} for {}",
                            layer_idx,
                            keys.len(),
                            KEY_COUNT,
                            raw.layout
                        ),
                    )
                    .with_layer(layer_idx)
                    .with_suggestion("List every key of the LAYOUT macro in order"),
                );
            }

            let mut codes = Vec::with_capacity(keys.len());
            for (key_idx, expr) in keys.iter().enumerate() {
                match self.keycode_db.parse(expr) {
                    Some(code) => codes.push(code),
                    None => self.report_invalid_keycode(&mut report, layer_idx, key_idx, expr),
                }
            }
            layers.push(codes);
        }

        if !report.is_valid() {
            return report;
        }

        match Keymap::from_layout_keys(&layers) {
            Ok(keymap) => {
                let semantic = self.validate(&keymap);
                report.errors.extend(semantic.errors);
                report.warnings.extend(semantic.warnings);
            }
            Err(e) => report.add_error(ValidationError::new(
                ValidationErrorKind::MismatchedKeyCount,
                e.to_string(),
            )),
        }

        report
    }

    /// Warns when a loaded keymap names another keyboard or layout macro
    /// than the one files are generated for.
    pub fn check_target(raw: &RawKeymap, config: &GenerateConfig, report: &mut ValidationReport) {
        if raw.keyboard != config.keyboard {
            report.add_warning(ValidationWarning::new(
                ValidationWarningKind::TargetMismatch,
                format!(
                    "Keymap is for keyboard '{}', but files are generated for '{}'",
                    raw.keyboard, config.keyboard
                ),
            ));
        }

        if raw.layout != config.layout_macro {
            report.add_warning(ValidationWarning::new(
                ValidationWarningKind::TargetMismatch,
                format!(
                    "Keymap uses layout '{}', but files are generated with '{}'",
                    raw.layout, config.layout_macro
                ),
            ));
        }
    }

    /// Validates a typed keymap.
    ///
    /// Checks:
    /// - The base layer has no transparent cell
    /// - Unwired matrix cells hold no key on every layer
    /// - No layer-tap key activates the layer it sits on
    /// - Layer-tap positions are transparent on the target layer (warning)
    /// - Every non-base layer is reachable from the base layer (warning)
    #[must_use]
    pub fn validate(&self, keymap: &Keymap) -> ValidationReport {
        let mut report = ValidationReport::new();

        for (pos, code) in keymap.layer_cells(Layer::Base) {
            if code.is_transparent() {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::TransparentBase,
                        "Base layer cell is transparent and has nothing to fall through to",
                    )
                    .with_layer(Layer::Base.index())
                    .with_position(pos.row, pos.col)
                    .with_suggestion("Use XXXXXXX for keys that should do nothing"),
                );
            }
        }

        for layer in Layer::ALL {
            for (pos, code) in keymap.layer_cells(layer) {
                if !geometry::is_wired(pos) && !code.is_no_op() {
                    report.add_error(
                        ValidationError::new(
                            ValidationErrorKind::UnwiredAssigned,
                            format!("'{code}' is assigned to a matrix cell with no switch"),
                        )
                        .with_layer(layer.index())
                        .with_position(pos.row, pos.col)
                        .with_suggestion("Unwired cells must hold XXXXXXX"),
                    );
                }

                if let Some(target) = code.hold_layer() {
                    Self::validate_layer_tap(&mut report, keymap, layer, pos, code, target);
                }
            }
        }

        Self::validate_reachability(&mut report, keymap);

        report
    }

    fn report_invalid_keycode(
        &self,
        report: &mut ValidationReport,
        layer_idx: usize,
        key_idx: usize,
        expr: &str,
    ) {
        // Try to find similar keycodes for suggestion
        let suggestions = self.keycode_db.search(expr.trim());
        let suggestion_text = if suggestions.is_empty() || expr.trim().is_empty() {
            "Run 'keycodes' to list valid codes".to_string()
        } else {
            let similar: Vec<&str> = suggestions.iter().take(3).map(|k| k.code).collect();
            format!("Did you mean one of: {}", similar.join(", "))
        };

        let mut error = ValidationError::new(
            ValidationErrorKind::InvalidKeycode,
            format!("Invalid keycode '{expr}' at key {key_idx}"),
        )
        .with_layer(layer_idx)
        .with_suggestion(suggestion_text);

        if let Some(pos) = LAYOUT_POSITIONS.get(key_idx) {
            error = error.with_position(pos.row, pos.col);
        }

        report.add_error(error);
    }

    fn validate_layer_tap(
        report: &mut ValidationReport,
        keymap: &Keymap,
        layer: Layer,
        pos: Position,
        code: KeyCode,
        target: Layer,
    ) {
        if target == layer {
            report.add_error(
                ValidationError::new(
                    ValidationErrorKind::SelfReferencingLayerTap,
                    format!("'{code}' activates the layer it is defined on"),
                )
                .with_layer(layer.index())
                .with_position(pos.row, pos.col)
                .with_suggestion("Point the layer-tap key at another layer"),
            );
            return;
        }

        if let Some(held) = keymap.get(target, pos) {
            if !held.is_transparent() {
                report.add_warning(ValidationWarning::new(
                    ValidationWarningKind::CoveredLayerTap,
                    format!(
                        "Layer {} ({}, {}): '{}' activates {} while held, where the same key is '{}'",
                        layer.index(),
                        pos.row,
                        pos.col,
                        code,
                        target,
                        held
                    ),
                ));
            }
        }
    }

    fn validate_reachability(report: &mut ValidationReport, keymap: &Keymap) {
        let mut reachable = HashSet::from([Layer::Base]);
        let mut pending = vec![Layer::Base];

        while let Some(layer) = pending.pop() {
            for (_, code) in keymap.layer_cells(layer) {
                if let Some(target) = code.hold_layer() {
                    if reachable.insert(target) {
                        pending.push(target);
                    }
                }
            }
        }

        for layer in Layer::ALL {
            if !reachable.contains(&layer) {
                report.add_warning(ValidationWarning::new(
                    ValidationWarningKind::UnreachableLayer,
                    format!(
                        "Layer {} ({}) cannot be reached from the base layer",
                        layer.index(),
                        layer
                    ),
                ));
            }
        }
    }
}
