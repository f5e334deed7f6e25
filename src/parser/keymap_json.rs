//! QMK keymap.json reader and writer.
//!
//! `keymap.json` is the configurator format QMK compiles with `qmk compile`:
//! the keyboard, the layout macro and one array of keycode strings per
//! layer, listed in `LAYOUT` argument order.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::GenerateConfig;
use crate::keycode::KeyCode;
use crate::keycode_db::KeycodeDb;
use crate::keymap::Keymap;
use crate::models::Layer;

/// QMK keymap.json structure.
///
/// Layers are kept as raw strings so a malformed file can still be loaded
/// and reported on by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawKeymap {
    /// Format version (QMK writes 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// Keyboard path (e.g., "zsa/moonlander")
    pub keyboard: String,
    /// Keymap name
    #[serde(default)]
    pub keymap: String,
    /// Layout macro (e.g., "LAYOUT")
    pub layout: String,
    /// Keycode expressions per layer, in `LAYOUT` order
    pub layers: Vec<Vec<String>>,
    /// Keymap author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RawKeymap {
    /// Converts a typed keymap into keymap.json form.
    #[must_use]
    pub fn from_keymap(keymap: &Keymap, config: &GenerateConfig) -> Self {
        let layers = Layer::ALL
            .into_iter()
            .map(|layer| {
                keymap
                    .layout_keys(layer)
                    .map(|(_, code)| code.to_qmk_indexed())
                    .collect()
            })
            .collect();

        Self {
            version: Some(1),
            keyboard: config.keyboard.clone(),
            keymap: config.keymap_name.clone(),
            layout: config.layout_macro.clone(),
            layers,
            author: config.copyright_holder.clone(),
            notes: None,
        }
    }

    /// Parses every expression and builds the typed keymap.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first expression that does not parse, or
    /// if the keymap does not have the expected shape.
    pub fn to_keymap(&self, keycode_db: &KeycodeDb) -> Result<Keymap> {
        let layers = self
            .layers
            .iter()
            .enumerate()
            .map(|(layer_idx, keys)| {
                keys.iter()
                    .enumerate()
                    .map(|(key_idx, expr)| {
                        keycode_db.parse(expr).with_context(|| {
                            format!(
                                "Invalid keycode '{expr}' at layer {layer_idx}, key {key_idx}"
                            )
                        })
                    })
                    .collect::<Result<Vec<KeyCode>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Keymap::from_layout_keys(&layers)
    }
}

/// Parses keymap.json content.
pub fn parse_keymap_json(content: &str) -> Result<RawKeymap> {
    serde_json::from_str(content).context("Failed to parse keymap.json")
}

/// Reads and parses a keymap.json file.
pub fn load_keymap_json(path: &Path) -> Result<RawKeymap> {
    let content = fs::read_to_string(path)
        .context(format!("Failed to read keymap file: {}", path.display()))?;

    parse_keymap_json(&content).context(format!("Invalid keymap file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KEY_COUNT;

    #[test]
    fn test_round_trip_through_json() {
        let keymap = Keymap::dvorak();
        let raw = RawKeymap::from_keymap(&keymap, &GenerateConfig::default());

        let json = serde_json::to_string_pretty(&raw).unwrap();
        let parsed = parse_keymap_json(&json).unwrap();
        assert_eq!(parsed, raw);

        let db = KeycodeDb::load().unwrap();
        assert_eq!(parsed.to_keymap(&db).unwrap(), keymap);
    }

    #[test]
    fn test_from_keymap_shape() {
        let raw = RawKeymap::from_keymap(&Keymap::dvorak(), &GenerateConfig::default());

        assert_eq!(raw.layers.len(), Layer::COUNT);
        assert!(raw.layers.iter().all(|l| l.len() == KEY_COUNT));
        assert_eq!(raw.layers[0][28], "MT(MOD_LCTL, KC_ESC)");
        assert_eq!(raw.layers[0][41], "LT(1, KC_MINS)");
        assert_eq!(raw.layers[1][28], "_______");
    }

    #[test]
    fn test_to_keymap_reports_bad_keycode() {
        let mut raw = RawKeymap::from_keymap(&Keymap::dvorak(), &GenerateConfig::default());
        raw.layers[1][3] = "KC_BOGUS".to_string();

        let db = KeycodeDb::load().unwrap();
        let err = raw.to_keymap(&db).unwrap_err();
        assert!(err.to_string().contains("KC_BOGUS"));
    }

    #[test]
    fn test_parse_minimal_qmk_file() {
        let json = r#"{"keyboard": "zsa/moonlander", "layout": "LAYOUT", "layers": [[], []]}"#;
        let raw = parse_keymap_json(json).unwrap();

        assert_eq!(raw.keymap, "");
        assert_eq!(raw.version, None);
        assert_eq!(raw.layers.len(), 2);
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(parse_keymap_json("{not json").is_err());
        assert!(parse_keymap_json(r#"{"keyboard": "x"}"#).is_err());
    }
}
