//! Layer identifiers.

use anyhow::Result;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A layer of the keymap.
///
/// Layers are indexed in declaration order, matching the `enum layers` the
/// firmware is built with. `Base` is the default layer and has nothing below
/// it to fall through to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// Dvorak letters, numbers and symbols
    Base,
    /// Function keys, navigation, browser, mouse and media controls
    Media,
}

impl Layer {
    /// Number of layers in the keymap.
    pub const COUNT: usize = 2;

    /// All layers in index order.
    pub const ALL: [Self; Self::COUNT] = [Self::Base, Self::Media];

    /// Returns the 0-based layer index used by the firmware.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Base => 0,
            Self::Media => 1,
        }
    }

    /// Returns the layer at the given index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Base),
            1 => Some(Self::Media),
            _ => None,
        }
    }

    /// Returns the identifier used in the generated `enum layers`.
    #[must_use]
    pub const fn qmk_name(self) -> &'static str {
        match self {
            Self::Base => "BASE",
            Self::Media => "MEDIA",
        }
    }

    /// Returns the human-readable layer name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::Media => "Media",
        }
    }

    /// Short label used on keys that activate this layer.
    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Base => "BAS",
            Self::Media => "MED",
        }
    }

    /// Returns the layer below this one, if any.
    #[must_use]
    pub const fn below(self) -> Option<Self> {
        match self {
            Self::Base => None,
            Self::Media => Some(Self::Base),
        }
    }
}

impl FromStr for Layer {
    type Err = anyhow::Error;

    /// Parses a layer by QMK name or index, case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();

        if let Ok(index) = trimmed.parse::<usize>() {
            return Self::from_index(index).ok_or_else(|| {
                anyhow::anyhow!(
                    "Layer index {} is out of range (0-{})",
                    index,
                    Self::COUNT - 1
                )
            });
        }

        Self::ALL
            .into_iter()
            .find(|layer| layer.qmk_name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                anyhow::anyhow!("Unknown layer '{trimmed}'. Expected one of: base, media")
            })
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qmk_name())
    }
}

impl Serialize for Layer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for layer in Layer::ALL {
            assert_eq!(Layer::from_index(layer.index()), Some(layer));
        }
        assert_eq!(Layer::from_index(2), None);
    }

    #[test]
    fn test_from_str_accepts_names_and_indices() {
        assert_eq!("BASE".parse::<Layer>().unwrap(), Layer::Base);
        assert_eq!("media".parse::<Layer>().unwrap(), Layer::Media);
        assert_eq!(" Media ".parse::<Layer>().unwrap(), Layer::Media);
        assert_eq!("1".parse::<Layer>().unwrap(), Layer::Media);
        assert!("2".parse::<Layer>().is_err());
        assert!("lower".parse::<Layer>().is_err());
    }

    #[test]
    fn test_below() {
        assert_eq!(Layer::Media.below(), Some(Layer::Base));
        assert_eq!(Layer::Base.below(), None);
    }

    #[test]
    fn test_serializes_as_qmk_name() {
        assert_eq!(serde_json::to_string(&Layer::Media).unwrap(), "\"MEDIA\"");
    }
}
