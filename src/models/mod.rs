//! Data models for the keymap: layers and keyboard geometry.
//!
//! Models are independent of the keymap contents and of any output format.

pub mod geometry;
pub mod layer;

// Re-export all model types
pub use geometry::{
    Hand, Position, KEY_COUNT, LAYOUT_POSITIONS, MATRIX_COLS, MATRIX_ROWS,
};
pub use layer::Layer;
