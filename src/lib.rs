//! Dvorak keymap for the ZSA Moonlander.
//!
//! This library holds the keymap as compile-time tables, resolves keys
//! across layers, validates the layout and generates the `keymap.c` and
//! `keymap.json` files a QMK build consumes.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod firmware;
pub mod keycode;
pub mod keycode_db;
pub mod keymap;
pub mod models;
pub mod parser;
