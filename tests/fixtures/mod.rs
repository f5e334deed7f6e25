//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test file uses every fixture

use moonlander_dvorak::config::GenerateConfig;
use moonlander_dvorak::keymap::Keymap;
use moonlander_dvorak::parser::RawKeymap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the moonlander-dvorak binary
pub fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_moonlander-dvorak")
}

/// Runs the binary with the given arguments.
///
/// `RUST_LOG` is cleared and the config directory points at an empty temp
/// dir, so neither the caller's shell nor their config file leaks in.
pub fn run(args: &[&str]) -> Output {
    let home = TempDir::new().expect("Failed to create temp home");
    Command::new(bin())
        .args(args)
        .env_remove("RUST_LOG")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("APPDATA", home.path())
        .output()
        .expect("Failed to execute command")
}

/// Runs the binary with a default config directory holding `config_body`.
pub fn run_with_default_config(config_body: &str, args: &[&str]) -> Output {
    let home = TempDir::new().expect("Failed to create temp home");
    let config_home = home.path().join(".config");
    let app_dir = config_home.join("moonlander-dvorak");
    fs::create_dir_all(&app_dir).expect("Failed to create config dir");
    fs::write(app_dir.join("config.toml"), config_body).expect("Failed to write config");

    Command::new(bin())
        .args(args)
        .env_remove("RUST_LOG")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", &config_home)
        .output()
        .expect("Failed to execute command")
}

/// Parses stdout as JSON.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Should parse JSON output")
}

/// The built-in keymap in keymap.json form.
pub fn builtin_raw_keymap() -> RawKeymap {
    RawKeymap::from_keymap(&Keymap::dvorak(), &GenerateConfig::default())
}

/// Writes a keymap.json into a fresh temp directory.
///
/// # Returns
/// Tuple of (file path, `TempDir` guard).
pub fn create_temp_keymap_file(raw: &RawKeymap) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("keymap.json");
    let json = serde_json::to_string_pretty(raw).expect("Failed to serialize keymap");
    fs::write(&path, json).expect("Failed to write keymap file");
    (path, temp_dir)
}

/// Writes a config file with the given TOML body.
pub fn write_config(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, body).expect("Failed to write config");
    path
}

/// Creates a minimal QMK firmware tree (a Makefile and `keyboards/`).
pub fn create_fake_qmk_tree(dir: &Path) -> PathBuf {
    let qmk = dir.join("qmk_firmware");
    fs::create_dir_all(qmk.join("keyboards/zsa/moonlander")).expect("Failed to create QMK tree");
    fs::write(qmk.join("Makefile"), "# QMK\n").expect("Failed to write Makefile");
    qmk
}
