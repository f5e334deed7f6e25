//! The keymap: one matrix-shaped table of key codes per layer.
//!
//! Tables are written with [`layout!`], which takes the 72 keys in the
//! order they sit on the desk and places each one in the switch matrix,
//! filling unwired cells with [`KeyCode::NoKey`].

use crate::keycode::KeyCode;
use crate::models::geometry::{self, LAYOUT_POSITIONS};
use crate::models::{Layer, Position, KEY_COUNT, MATRIX_COLS, MATRIX_ROWS};
use anyhow::Result;

/// Codes for one layer, indexed `[row][col]`.
pub type LayerTable = [[KeyCode; MATRIX_COLS]; MATRIX_ROWS];

/// Builds a [`LayerTable`] from the 72 keys of the Moonlander `LAYOUT`.
#[rustfmt::skip]
macro_rules! layout {
    (
        $k00:expr, $k01:expr, $k02:expr, $k03:expr, $k04:expr, $k05:expr, $k06:expr,   $k60:expr, $k61:expr, $k62:expr, $k63:expr, $k64:expr, $k65:expr, $k66:expr,
        $k10:expr, $k11:expr, $k12:expr, $k13:expr, $k14:expr, $k15:expr, $k16:expr,   $k70:expr, $k71:expr, $k72:expr, $k73:expr, $k74:expr, $k75:expr, $k76:expr,
        $k20:expr, $k21:expr, $k22:expr, $k23:expr, $k24:expr, $k25:expr, $k26:expr,   $k80:expr, $k81:expr, $k82:expr, $k83:expr, $k84:expr, $k85:expr, $k86:expr,
        $k30:expr, $k31:expr, $k32:expr, $k33:expr, $k34:expr, $k35:expr,                         $k91:expr, $k92:expr, $k93:expr, $k94:expr, $k95:expr, $k96:expr,
        $k40:expr, $k41:expr, $k42:expr, $k43:expr, $k44:expr,            $k53:expr,   $kb3:expr,            $ka2:expr, $ka3:expr, $ka4:expr, $ka5:expr, $ka6:expr,
                                          $k50:expr, $k51:expr, $k52:expr,   $kb4:expr, $kb5:expr, $kb6:expr $(,)?
    ) => {
        [
            [$k00, $k01, $k02, $k03, $k04, $k05, $k06],
            [$k10, $k11, $k12, $k13, $k14, $k15, $k16],
            [$k20, $k21, $k22, $k23, $k24, $k25, $k26],
            [$k30, $k31, $k32, $k33, $k34, $k35, $crate::keycode::KeyCode::NoKey],
            [$k40, $k41, $k42, $k43, $k44, $crate::keycode::KeyCode::NoKey, $crate::keycode::KeyCode::NoKey],
            [$k50, $k51, $k52, $k53, $crate::keycode::KeyCode::NoKey, $crate::keycode::KeyCode::NoKey, $crate::keycode::KeyCode::NoKey],

            [$k60, $k61, $k62, $k63, $k64, $k65, $k66],
            [$k70, $k71, $k72, $k73, $k74, $k75, $k76],
            [$k80, $k81, $k82, $k83, $k84, $k85, $k86],
            [$crate::keycode::KeyCode::NoKey, $k91, $k92, $k93, $k94, $k95, $k96],
            [$crate::keycode::KeyCode::NoKey, $crate::keycode::KeyCode::NoKey, $ka2, $ka3, $ka4, $ka5, $ka6],
            [$crate::keycode::KeyCode::NoKey, $crate::keycode::KeyCode::NoKey, $crate::keycode::KeyCode::NoKey, $kb3, $kb4, $kb5, $kb6],
        ]
    };
}

mod dvorak;

pub use dvorak::{A_CTL, A_LANG, A_MED, KEYMAPS};

/// Named compound codes, emitted as `#define` aliases in `keymap.c`.
pub const ALIASES: [(&str, KeyCode); 3] = [("A_CTL", A_CTL), ("A_MED", A_MED), ("A_LANG", A_LANG)];

/// Returns the alias name for a code, if one is defined.
#[must_use]
pub fn alias_for(code: KeyCode) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(_, aliased)| *aliased == code)
        .map(|(name, _)| *name)
}

/// A compound code found in the keymap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompoundKey {
    /// Layer holding the code
    pub layer: Layer,
    /// Matrix position of the switch
    pub position: Position,
    /// The compound code
    pub code: KeyCode,
}

/// A complete keymap: one table per layer.
///
/// # Invariants
///
/// - Every layer has exactly `MATRIX_ROWS x MATRIX_COLS` cells (enforced by
///   the table type)
/// - Lookups are total over the matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    layers: [LayerTable; Layer::COUNT],
}

impl Keymap {
    /// Creates a keymap from per-layer tables.
    #[must_use]
    pub const fn new(layers: [LayerTable; Layer::COUNT]) -> Self {
        Self { layers }
    }

    /// The built-in Dvorak keymap.
    #[must_use]
    pub const fn dvorak() -> Self {
        Self::new(KEYMAPS)
    }

    /// Builds a keymap from keys listed in `LAYOUT` order, one list per layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer count is wrong or a layer does not have
    /// exactly one code per wired key.
    pub fn from_layout_keys(layers: &[Vec<KeyCode>]) -> Result<Self> {
        if layers.len() != Layer::COUNT {
            anyhow::bail!(
                "Keymap must have {} layers, got {}",
                Layer::COUNT,
                layers.len()
            );
        }

        let mut tables = [[[KeyCode::NoKey; MATRIX_COLS]; MATRIX_ROWS]; Layer::COUNT];
        for (layer_idx, keys) in layers.iter().enumerate() {
            if keys.len() != KEY_COUNT {
                anyhow::bail!(
                    "Layer {} must have {} keys, got {}",
                    layer_idx,
                    KEY_COUNT,
                    keys.len()
                );
            }

            for (position, code) in LAYOUT_POSITIONS.iter().zip(keys) {
                tables[layer_idx][position.row as usize][position.col as usize] = *code;
            }
        }

        Ok(Self::new(tables))
    }

    /// Returns the table for a layer.
    #[must_use]
    pub const fn table(&self, layer: Layer) -> &LayerTable {
        &self.layers[layer.index()]
    }

    /// Returns the code stored at a position, without resolving transparency.
    ///
    /// Returns `None` only if the position lies outside the matrix.
    #[must_use]
    pub fn get(&self, layer: Layer, position: Position) -> Option<KeyCode> {
        self.table(layer)
            .get(position.row as usize)?
            .get(position.col as usize)
            .copied()
    }

    /// Returns the code that takes effect at a position while `layer` is the
    /// highest active layer.
    ///
    /// Transparent cells fall through to the layers below. A transparent
    /// chain that runs past the base layer yields `NoKey`.
    #[must_use]
    pub fn resolve(&self, layer: Layer, position: Position) -> Option<KeyCode> {
        let mut current = Some(layer);
        while let Some(l) = current {
            let code = self.get(l, position)?;
            if !code.is_transparent() {
                return Some(code);
            }
            current = l.below();
        }
        Some(KeyCode::NoKey)
    }

    /// Iterates over every cell of a layer in row-major order.
    pub fn layer_cells(&self, layer: Layer) -> impl Iterator<Item = (Position, KeyCode)> + '_ {
        geometry::matrix_positions().map(move |pos| {
            (pos, self.table(layer)[pos.row as usize][pos.col as usize])
        })
    }

    /// Iterates over the wired keys of a layer in `LAYOUT` order.
    pub fn layout_keys(&self, layer: Layer) -> impl Iterator<Item = (Position, KeyCode)> + '_ {
        LAYOUT_POSITIONS
            .iter()
            .map(move |pos| (*pos, self.table(layer)[pos.row as usize][pos.col as usize]))
    }

    /// Lists every compound code on every layer.
    #[must_use]
    pub fn compound_keys(&self) -> Vec<CompoundKey> {
        Layer::ALL
            .into_iter()
            .flat_map(|layer| {
                self.layer_cells(layer)
                    .filter(|(_, code)| code.is_compound())
                    .map(move |(position, code)| CompoundKey {
                        layer,
                        position,
                        code,
                    })
            })
            .collect()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::dvorak()
    }
}
