//! Firmware source generation and validation.
//!
//! This module checks a keymap and turns it into the `keymap.c` and
//! `keymap.json` files a QMK build consumes.

pub mod generator;
pub mod validator;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

// Re-export firmware types
pub use generator::{FirmwareGenerator, OutputFormat};
pub use validator::{FirmwareValidator, ValidationReport};

/// Writes a file atomically (temp file + rename).
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let mut temp_name = path
        .file_name()
        .context(format!("Not a file path: {}", path.display()))?
        .to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, contents)
        .context(format!("Failed to write temp file: {}", temp_path.display()))?;

    fs::rename(&temp_path, path).context(format!(
        "Failed to rename temp file to: {}",
        path.display()
    ))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("keymap.c");

        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!temp_dir.path().join("keymap.c.tmp").exists());
    }

    #[test]
    fn test_write_atomic_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("keymap.c");
        assert!(write_atomic(&path, "x").is_err());
    }
}
