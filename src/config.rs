//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving configuration in TOML
//! format with platform-specific directory resolution.

use anyhow::{Context, Result};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

use crate::constants::APP_DIR_NAME;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PathConfig {
    /// QMK firmware directory path (e.g., "/`path/to/qmk_firmware`")
    pub qmk_firmware: Option<PathBuf>,
}

/// Settings for generated firmware files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Keyboard path inside the QMK tree
    pub keyboard: String,
    /// Keymap directory name
    pub keymap_name: String,
    /// Layout macro used in keymap.c
    pub layout_macro: String,
    /// Copyright holder for the license header (no header when unset)
    pub copyright_holder: Option<String>,
    /// SPDX license identifier for the header
    pub license: String,
    /// Copyright year (current year when unset)
    pub year: Option<i32>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            keyboard: "zsa/moonlander".to_string(),
            keymap_name: "dvorak".to_string(),
            layout_macro: "LAYOUT".to_string(),
            copyright_holder: None,
            license: "Apache-2.0".to_string(),
            year: None,
        }
    }
}

impl GenerateConfig {
    /// Returns the copyright year, defaulting to the current year.
    #[must_use]
    pub fn resolved_year(&self) -> i32 {
        self.year.unwrap_or_else(|| chrono::Local::now().year())
    }

    /// Returns the keymap directory inside a QMK firmware tree.
    #[must_use]
    pub fn keymap_dir(&self, qmk_path: &Path) -> PathBuf {
        qmk_path
            .join("keyboards")
            .join(&self.keyboard)
            .join("keymaps")
            .join(&self.keymap_name)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level filter (overridden by `RUST_LOG`)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/moonlander-dvorak/config.toml`
/// - macOS: `~/Library/Application Support/moonlander-dvorak/config.toml`
/// - Windows: `%APPDATA%\moonlander-dvorak\config.toml`
///
/// # Validation
///
/// - `keymap_name` must be non-empty and contain only letters, digits, `_` or `-`
/// - `layout_macro` must be a C identifier
/// - `logging.level` must be a valid level filter
///
/// The `qmk_firmware` path is only checked when files are installed into it,
/// see [`validate_qmk_path`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// File system paths
    pub paths: PathConfig,
    /// Firmware generation settings
    pub generate: GenerateConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the default config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from an explicit file or the default location.
    ///
    /// A missing default file yields the default configuration; a missing
    /// explicit file is an error.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let config_path = Self::config_file_path()?;
                if config_path.exists() {
                    Self::load_file(&config_path)
                } else {
                    Ok(Self::new())
                }
            }
        }
    }

    /// Reads and parses a config file.
    ///
    /// Values are not checked here; call [`Config::validate`] on the result.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))
    }

    /// Saves configuration to a file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context(format!(
                "Failed to create config directory: {}",
                parent.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp config file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let keymap_name = &self.generate.keymap_name;
        if keymap_name.is_empty() {
            anyhow::bail!("Keymap name cannot be empty");
        }
        if !keymap_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            anyhow::bail!(
                "Keymap name '{keymap_name}' must contain only letters, digits, '_' or '-'"
            );
        }

        let layout_macro = &self.generate.layout_macro;
        let valid_identifier = layout_macro
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && layout_macro
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_identifier {
            anyhow::bail!("Layout macro '{layout_macro}' is not a valid C identifier");
        }

        if self.generate.keyboard.is_empty() {
            anyhow::bail!("Keyboard cannot be empty");
        }

        self.logging
            .level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow::anyhow!("Invalid log level '{}'", self.logging.level))?;

        Ok(())
    }
}

/// Checks that a directory looks like a QMK firmware checkout.
pub fn validate_qmk_path(qmk_path: &Path) -> Result<()> {
    if !qmk_path.exists() {
        anyhow::bail!("QMK firmware path does not exist: {}", qmk_path.display());
    }

    let makefile_path = qmk_path.join("Makefile");
    if !makefile_path.exists() {
        anyhow::bail!(
            "QMK firmware path is invalid: Makefile not found at {}",
            makefile_path.display()
        );
    }

    let keyboards_dir = qmk_path.join("keyboards");
    if !keyboards_dir.is_dir() {
        anyhow::bail!(
            "QMK firmware path is invalid: keyboards/ directory not found at {}",
            keyboards_dir.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.paths.qmk_firmware, None);
        assert_eq!(config.generate.keyboard, "zsa/moonlander");
        assert_eq!(config.generate.keymap_name, "dvorak");
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [generate]
            keymap_name = "ianlewis_dvorak"
            "#,
        )
        .unwrap();

        assert_eq!(config.generate.keymap_name, "ianlewis_dvorak");
        assert_eq!(config.generate.layout_macro, "LAYOUT");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_validate_keymap_name() {
        let mut config = Config::new();
        config.generate.keymap_name = String::new();
        assert!(config.validate().is_err());

        config.generate.keymap_name = "my keymap".to_string();
        assert!(config.validate().is_err());

        config.generate.keymap_name = "my-keymap_2".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_layout_macro() {
        let mut config = Config::new();
        config.generate.layout_macro = "2LAYOUT".to_string();
        assert!(config.validate().is_err());

        config.generate.layout_macro = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_log_level() {
        let mut config = Config::new();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "debug".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_qmk_path() {
        let temp_dir = TempDir::new().unwrap();
        let qmk_path = temp_dir.path().join("qmk");

        assert!(validate_qmk_path(&qmk_path).is_err());

        // Missing Makefile and keyboards/ directory
        fs::create_dir(&qmk_path).unwrap();
        assert!(validate_qmk_path(&qmk_path).is_err());

        fs::write(qmk_path.join("Makefile"), "").unwrap();
        assert!(validate_qmk_path(&qmk_path).is_err());

        fs::create_dir(qmk_path.join("keyboards")).unwrap();
        assert!(validate_qmk_path(&qmk_path).is_ok());
    }

    #[test]
    fn test_stale_qmk_path_is_valid_config() {
        let mut config = Config::new();
        config.paths.qmk_firmware = Some(PathBuf::from("/nonexistent/qmk_firmware"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::new();
        config.generate.copyright_holder = Some("Test Author".to_string());
        config.generate.year = Some(2025);
        config.save_to(&config_file).unwrap();

        let loaded = Config::load_from(Some(&config_file)).unwrap();
        assert_eq!(loaded, config);
        assert!(!config_file.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");
        assert!(Config::load_from(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_keeps_bad_values_for_validate() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[generate]\nkeymap_name = \"\"\n").unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Keymap name cannot be empty"));
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[generate\n").unwrap();

        assert!(Config::load_from(Some(&path)).is_err());
    }

    #[test]
    fn test_resolved_year() {
        let mut config = GenerateConfig::default();
        assert!(config.resolved_year() >= 2024);

        config.year = Some(2021);
        assert_eq!(config.resolved_year(), 2021);
    }

    #[test]
    fn test_keymap_dir() {
        let config = GenerateConfig::default();
        let dir = config.keymap_dir(Path::new("/qmk"));
        assert_eq!(
            dir,
            PathBuf::from("/qmk/keyboards/zsa/moonlander/keymaps/dvorak")
        );
    }
}
