//! Generate command for firmware files.

use crate::cli::common::{CliError, CliResult};
use crate::config::{self, Config};
use crate::firmware::validator::ValidationWarningKind;
use crate::firmware::{FirmwareGenerator, FirmwareValidator, OutputFormat};
use crate::keycode_db::KeycodeDb;
use crate::keymap::Keymap;
use crate::parser::load_keymap_json;
use clap::Args;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Generate QMK keymap files
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Output directory for generated files
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Path to QMK firmware repository; files go to its keymap directory
    /// when no output directory is given
    #[arg(long, value_name = "PATH")]
    pub qmk_path: Option<PathBuf>,

    /// Output format: keymap, json, or all
    #[arg(long, value_name = "TYPE", default_value = "all")]
    pub format: String,

    /// Keymap name (overrides the config file)
    #[arg(long, value_name = "NAME")]
    pub keymap_name: Option<String>,

    /// Generate from a QMK keymap.json instead of the built-in keymap
    #[arg(short, long, value_name = "FILE")]
    pub keymap: Option<PathBuf>,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        // Validate format
        let format: OutputFormat = self
            .format
            .parse()
            .map_err(|e| CliError::validation(format!("{e}")))?;

        let mut config = config.clone();
        if let Some(name) = &self.keymap_name {
            config.generate.keymap_name.clone_from(name);
        }
        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e}")))?;

        let out_dir = self.resolve_out_dir(&config)?;

        let keycode_db = KeycodeDb::load()
            .map_err(|e| CliError::io(format!("Failed to load keycode database: {e}")))?;

        let keymap = match &self.keymap {
            Some(path) => {
                let raw = load_keymap_json(path)
                    .map_err(|e| CliError::io(format!("Failed to load keymap: {e:#}")))?;
                let mut report = FirmwareValidator::new(&keycode_db).validate_raw(&raw);
                FirmwareValidator::check_target(&raw, &config.generate, &mut report);
                if !report.is_valid() {
                    return Err(CliError::validation(format!(
                        "Keymap validation failed:\n{}",
                        report.format_message()
                    )));
                }
                for warning in report
                    .warnings
                    .iter()
                    .filter(|w| w.kind == ValidationWarningKind::TargetMismatch)
                {
                    warn!("{warning}");
                }
                raw.to_keymap(&keycode_db)
                    .map_err(|e| CliError::validation(format!("{e:#}")))?
            }
            None => Keymap::dvorak(),
        };

        // Validate before generating
        let report = FirmwareValidator::new(&keycode_db).validate(&keymap);
        if !report.is_valid() {
            return Err(CliError::validation(format!(
                "Keymap validation failed:\n{}",
                report.format_message()
            )));
        }
        for warning in &report.warnings {
            warn!("{warning}");
        }

        debug!("Generating {:?} into {}", format, out_dir.display());
        let generator = FirmwareGenerator::new(&keymap, &config.generate, &keycode_db);
        let written = generator
            .write_files(&out_dir, format)
            .map_err(|e| CliError::io(format!("Failed to generate files: {e:#}")))?;

        let names: Vec<String> = written
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        info!("Generated {} file(s)", written.len());
        println!("✓ Generated {}", names.join(" and "));
        println!("  Output: {}", out_dir.display());

        Ok(())
    }

    /// Output directory: `--out-dir`, else the keymap directory inside the
    /// QMK tree from `--qmk-path` or the config file.
    fn resolve_out_dir(&self, config: &Config) -> CliResult<PathBuf> {
        if let Some(out_dir) = &self.out_dir {
            return Ok(out_dir.clone());
        }

        let qmk_path = self
            .qmk_path
            .as_ref()
            .or(config.paths.qmk_firmware.as_ref())
            .ok_or_else(|| {
                CliError::validation(
                    "No output location. Use --out-dir, --qmk-path, or set paths.qmk_firmware",
                )
            })?;

        config::validate_qmk_path(qmk_path).map_err(|e| CliError::validation(format!("{e}")))?;

        Ok(config.generate.keymap_dir(qmk_path))
    }
}
