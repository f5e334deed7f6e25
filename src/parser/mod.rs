//! Parsing and serialization of keymap files.
//!
//! This module reads and writes QMK keymap.json files. The C keymap is
//! emitted by the firmware generator.

pub mod keymap_json;

// Re-export commonly used functions
pub use keymap_json::{load_keymap_json, parse_keymap_json, RawKeymap};
