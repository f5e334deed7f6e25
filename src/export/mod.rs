//! Export functionality for keymaps.
//!
//! This module renders layers as keyboard diagrams, used both on the
//! terminal and in the comments of the generated `keymap.c`.

pub mod keyboard_renderer;

pub use keyboard_renderer::render_layer_diagram;
