//! Key codes: what a single matrix cell does on one layer.
//!
//! A [`KeyCode`] is either a plain [`Key`], one of the two pass-through
//! markers, or a compound code binding a tap action and a hold action to the
//! same switch. Deciding between tap and hold is the firmware's job; this
//! module only answers "what happens for a tap" and "what happens for a hold"
//! through [`KeyCode::action`].

mod key;

pub use key::{Key, KeyCategory};

use crate::models::Layer;
use serde::{Serialize, Serializer};
use std::fmt;

/// One of the eight HID modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Left Control
    LeftCtrl,
    /// Left Shift
    LeftShift,
    /// Left Alt
    LeftAlt,
    /// Left GUI
    LeftGui,
    /// Right Control
    RightCtrl,
    /// Right Shift
    RightShift,
    /// Right Alt
    RightAlt,
    /// Right GUI
    RightGui,
}

impl Modifier {
    /// All modifiers.
    pub const ALL: [Self; 8] = [
        Self::LeftCtrl,
        Self::LeftShift,
        Self::LeftAlt,
        Self::LeftGui,
        Self::RightCtrl,
        Self::RightShift,
        Self::RightAlt,
        Self::RightGui,
    ];

    /// Name used by `MT()` (e.g., "MOD_LCTL").
    #[must_use]
    pub const fn mod_name(self) -> &'static str {
        match self {
            Self::LeftCtrl => "MOD_LCTL",
            Self::LeftShift => "MOD_LSFT",
            Self::LeftAlt => "MOD_LALT",
            Self::LeftGui => "MOD_LGUI",
            Self::RightCtrl => "MOD_RCTL",
            Self::RightShift => "MOD_RSFT",
            Self::RightAlt => "MOD_RALT",
            Self::RightGui => "MOD_RGUI",
        }
    }

    /// Wrapper macro that sends a key with this modifier (e.g., "LCTL").
    #[must_use]
    pub const fn wrapper(self) -> &'static str {
        match self {
            Self::LeftCtrl => "LCTL",
            Self::LeftShift => "LSFT",
            Self::LeftAlt => "LALT",
            Self::LeftGui => "LGUI",
            Self::RightCtrl => "RCTL",
            Self::RightShift => "RSFT",
            Self::RightAlt => "RALT",
            Self::RightGui => "RGUI",
        }
    }

    /// The plain key for this modifier.
    #[must_use]
    pub const fn key(self) -> Key {
        match self {
            Self::LeftCtrl => Key::LeftCtrl,
            Self::LeftShift => Key::LeftShift,
            Self::LeftAlt => Key::LeftAlt,
            Self::LeftGui => Key::LeftGui,
            Self::RightCtrl => Key::RightCtrl,
            Self::RightShift => Key::RightShift,
            Self::RightAlt => Key::RightAlt,
            Self::RightGui => Key::RightGui,
        }
    }

    /// Short label for key diagrams.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.key().label()
    }

    /// Looks up a modifier by its `MOD_*` name.
    #[must_use]
    pub fn from_mod_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.mod_name() == name)
    }

    /// Looks up a modifier by its wrapper macro name.
    #[must_use]
    pub fn from_wrapper(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.wrapper() == name)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mod_name())
    }
}

impl Serialize for Modifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Code assigned to one matrix cell on one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A plain key
    Key(Key),
    /// Use the code from the layer below
    Transparent,
    /// Do nothing
    NoKey,
    /// Modifier while held, key when tapped - `MT(mod, kc)`
    ModTap {
        /// Modifier held down while the key is held
        hold: Modifier,
        /// Key sent on tap
        tap: Key,
    },
    /// Layer while held, key when tapped - `LT(layer, kc)`
    LayerTap {
        /// Layer activated while the key is held
        layer: Layer,
        /// Key sent on tap
        tap: Key,
    },
    /// Key sent together with a modifier - `LCTL(kc)`
    Chord {
        /// Modifier wrapped around the key
        modifier: Modifier,
        /// Key sent
        key: Key,
    },
}

/// How the switch was pressed, as decided by the firmware's tap/hold logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Released before the tapping term expired
    Tap,
    /// Held past the tapping term
    Hold,
}

/// What the firmware does for one interaction with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Nothing is sent
    None,
    /// A key press and release
    Press {
        /// Key sent
        key: Key,
    },
    /// A key sent with a modifier held
    PressWithModifier {
        /// Key sent
        key: Key,
        /// Modifier wrapped around the key
        modifier: Modifier,
    },
    /// A modifier held for as long as the switch is
    Modifier {
        /// Modifier held
        modifier: Modifier,
    },
    /// A layer active for as long as the switch is held
    LayerOn {
        /// Layer activated
        layer: Layer,
    },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "nothing"),
            Self::Press { key } => write!(f, "press {key}"),
            Self::PressWithModifier { key, modifier } => {
                write!(f, "press {key} with {}", modifier.wrapper())
            }
            Self::Modifier { modifier } => write!(f, "hold {modifier}"),
            Self::LayerOn { layer } => write!(f, "activate layer {layer}"),
        }
    }
}

impl KeyCode {
    /// Returns true for the pass-through marker.
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        matches!(self, Self::Transparent)
    }

    /// Returns true for the "no key" code.
    #[must_use]
    pub const fn is_no_op(self) -> bool {
        matches!(self, Self::NoKey)
    }

    /// Returns true for any code built from more than a single key.
    #[must_use]
    pub const fn is_compound(self) -> bool {
        matches!(
            self,
            Self::ModTap { .. } | Self::LayerTap { .. } | Self::Chord { .. }
        )
    }

    /// Key sent when the switch is tapped, if any.
    #[must_use]
    pub const fn tap_key(self) -> Option<Key> {
        match self {
            Self::Key(key) | Self::Chord { key, .. } => Some(key),
            Self::ModTap { tap, .. } | Self::LayerTap { tap, .. } => Some(tap),
            Self::Transparent | Self::NoKey => None,
        }
    }

    /// Layer activated while the switch is held, if any.
    #[must_use]
    pub const fn hold_layer(self) -> Option<Layer> {
        match self {
            Self::LayerTap { layer, .. } => Some(layer),
            _ => None,
        }
    }

    /// Returns the action performed for the given interaction.
    ///
    /// Transparent codes perform nothing on their own; resolve them against
    /// the keymap first.
    #[must_use]
    pub const fn action(self, interaction: Interaction) -> Action {
        match (self, interaction) {
            (Self::Key(key), _) => Action::Press { key },
            (Self::Chord { modifier, key }, _) => Action::PressWithModifier { key, modifier },
            (Self::ModTap { tap, .. } | Self::LayerTap { tap, .. }, Interaction::Tap) => {
                Action::Press { key: tap }
            }
            (Self::ModTap { hold, .. }, Interaction::Hold) => Action::Modifier { modifier: hold },
            (Self::LayerTap { layer, .. }, Interaction::Hold) => Action::LayerOn { layer },
            (Self::Transparent | Self::NoKey, _) => Action::None,
        }
    }

    /// Renders the code as a QMK expression with named layers.
    #[must_use]
    pub fn to_qmk(self) -> String {
        self.render(false)
    }

    /// Renders the code as a QMK expression with numeric layers, as
    /// `keymap.json` requires.
    #[must_use]
    pub fn to_qmk_indexed(self) -> String {
        self.render(true)
    }

    fn render(self, numeric_layers: bool) -> String {
        match self {
            Self::Key(key) => key.qmk_name().to_string(),
            Self::Transparent => "_______".to_string(),
            Self::NoKey => "XXXXXXX".to_string(),
            Self::ModTap { hold, tap } => format!("MT({}, {})", hold.mod_name(), tap),
            Self::LayerTap { layer, tap } => {
                if numeric_layers {
                    format!("LT({}, {})", layer.index(), tap)
                } else {
                    format!("LT({}, {})", layer.qmk_name(), tap)
                }
            }
            Self::Chord { modifier, key } => format!("{}({})", modifier.wrapper(), key),
        }
    }

    /// Short label for key diagrams.
    ///
    /// Tap/hold codes render as `tap/hold`, chords as `mod+key`.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Key(key) => key.label().to_string(),
            Self::Transparent => "▽".to_string(),
            Self::NoKey => String::new(),
            Self::ModTap { hold, tap } => format!("{}/{}", tap.label(), hold.label()),
            Self::LayerTap { layer, tap } => format!("{}/{}", tap.label(), layer.short_label()),
            Self::Chord { modifier, key } => format!("{}+{}", modifier.label(), key.label()),
        }
    }
}

impl From<Key> for KeyCode {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_qmk())
    }
}

impl Serialize for KeyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
