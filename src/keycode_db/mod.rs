//! Keycode catalogue, parsing and search.
//!
//! This module lists every basic key the keymap can use, resolves QMK names
//! and aliases to typed codes, and parses compound expressions such as
//! `MT(MOD_LCTL, KC_ESC)` or `LT(MEDIA, KC_MINS)`.

use crate::keycode::{Key, KeyCategory, KeyCode, Modifier};
use crate::keymap;
use crate::models::Layer;
use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

/// Category summary for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeycodeCategory {
    /// Category ID (e.g., "alpha", "navigation")
    pub id: &'static str,
    /// Display name (e.g., "Letters", "Navigation")
    pub name: &'static str,
    /// Number of keys in the category
    pub count: usize,
}

/// Individual keycode definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeycodeDefinition {
    /// Canonical QMK keycode (e.g., "KC_ESC")
    pub code: &'static str,
    /// Short label (e.g., "Esc")
    pub label: &'static str,
    /// Category ID
    pub category: &'static str,
    /// Description
    pub description: &'static str,
    /// Alternative keycode names
    pub aliases: &'static [&'static str],
    /// The typed key
    #[serde(skip)]
    pub key: Key,
}

impl KeycodeDefinition {
    fn from_key(key: Key) -> Self {
        Self {
            code: key.qmk_name(),
            label: key.label(),
            category: key.category().id(),
            description: key.description(),
            aliases: key.aliases(),
            key,
        }
    }
}

/// Compiled patterns for compound keycode expressions.
#[derive(Debug, Clone)]
struct Patterns {
    mod_tap: Regex,
    layer_tap: Regex,
    chord: Regex,
}

impl Patterns {
    fn compile() -> Result<Self> {
        Ok(Self {
            mod_tap: Regex::new(r"^MT\(\s*(MOD_[A-Z]+)\s*,\s*([A-Za-z0-9_]+)\s*\)$")
                .context("Failed to compile MT() pattern")?,
            layer_tap: Regex::new(r"^LT\(\s*([A-Za-z0-9_]+)\s*,\s*([A-Za-z0-9_]+)\s*\)$")
                .context("Failed to compile LT() pattern")?,
            chord: Regex::new(r"^([LR](?:CTL|SFT|ALT|GUI))\(\s*([A-Za-z0-9_]+)\s*\)$")
                .context("Failed to compile modifier wrapper pattern")?,
        })
    }
}

/// Keycode catalogue with fast lookup and search.
///
/// Lookup by canonical name or alias is O(1); compound expressions are
/// matched against precompiled patterns.
#[derive(Debug, Clone)]
pub struct KeycodeDb {
    /// All keycode definitions
    keycodes: Vec<KeycodeDefinition>,
    /// Fast lookup by canonical name or alias
    lookup: HashMap<&'static str, usize>,
    patterns: Patterns,
}

impl KeycodeDb {
    /// Builds the catalogue from the built-in key table.
    pub fn load() -> Result<Self> {
        let keycodes: Vec<KeycodeDefinition> =
            Key::ALL.iter().copied().map(KeycodeDefinition::from_key).collect();

        let mut lookup = HashMap::new();
        for (idx, keycode) in keycodes.iter().enumerate() {
            lookup.insert(keycode.code, idx);
            for alias in keycode.aliases {
                lookup.insert(*alias, idx);
            }
        }

        Ok(Self {
            keycodes,
            lookup,
            patterns: Patterns::compile()?,
        })
    }

    /// Looks up a basic key by canonical name or alias.
    #[must_use]
    pub fn key(&self, name: &str) -> Option<Key> {
        self.get(name).map(|def| def.key)
    }

    /// Gets a keycode definition by canonical name or alias.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&KeycodeDefinition> {
        let idx = self.lookup.get(name)?;
        self.keycodes.get(*idx)
    }

    /// Parses a QMK keycode expression.
    ///
    /// Accepts basic key names and aliases, the transparent and no-op
    /// markers, `MT()`, `LT()` with a layer name or index, modifier wrappers
    /// such as `LCTL()`, and the keymap's own aliases (`A_CTL`, ...).
    ///
    /// # Examples
    ///
    /// ```
    /// use moonlander_dvorak::keycode::{Key, KeyCode, Modifier};
    /// use moonlander_dvorak::keycode_db::KeycodeDb;
    ///
    /// let db = KeycodeDb::load().unwrap();
    /// assert_eq!(db.parse("KC_ESCAPE"), Some(KeyCode::Key(Key::Escape)));
    /// assert_eq!(
    ///     db.parse("MT(MOD_LCTL, KC_ESC)"),
    ///     Some(KeyCode::ModTap { hold: Modifier::LeftCtrl, tap: Key::Escape })
    /// );
    /// assert_eq!(db.parse("NOT_A_KEY"), None);
    /// ```
    #[must_use]
    pub fn parse(&self, expr: &str) -> Option<KeyCode> {
        let expr = expr.trim();

        match expr {
            "_______" | "KC_TRNS" | "KC_TRANSPARENT" => return Some(KeyCode::Transparent),
            "XXXXXXX" | "KC_NO" => return Some(KeyCode::NoKey),
            _ => {}
        }

        if let Some((_, code)) = keymap::ALIASES.iter().find(|(name, _)| *name == expr) {
            return Some(*code);
        }

        if let Some(key) = self.key(expr) {
            return Some(KeyCode::Key(key));
        }

        if let Some(caps) = self.patterns.mod_tap.captures(expr) {
            let hold = Modifier::from_mod_name(&caps[1])?;
            let tap = self.key(&caps[2])?;
            return Some(KeyCode::ModTap { hold, tap });
        }

        if let Some(caps) = self.patterns.layer_tap.captures(expr) {
            let layer = caps[1].parse::<Layer>().ok()?;
            let tap = self.key(&caps[2])?;
            return Some(KeyCode::LayerTap { layer, tap });
        }

        if let Some(caps) = self.patterns.chord.captures(expr) {
            let modifier = Modifier::from_wrapper(&caps[1])?;
            let key = self.key(&caps[2])?;
            return Some(KeyCode::Chord { modifier, key });
        }

        None
    }

    /// Returns true if the expression parses to a key code.
    #[must_use]
    pub fn is_valid(&self, expr: &str) -> bool {
        self.parse(expr).is_some()
    }

    /// Searches keycodes by code, alias, label or description.
    ///
    /// Matching is case-insensitive substring matching; results are sorted
    /// by relevance (exact, prefix, substring, description).
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&KeycodeDefinition> {
        if query.is_empty() {
            return self.keycodes.iter().collect();
        }

        let query_lower = query.to_lowercase();
        let mut results: Vec<(&KeycodeDefinition, i32)> = self
            .keycodes
            .iter()
            .filter_map(|keycode| {
                let code_lower = keycode.code.to_lowercase();
                let label_lower = keycode.label.to_lowercase();
                let desc_lower = keycode.description.to_lowercase();
                let aliases_lower: Vec<String> =
                    keycode.aliases.iter().map(|a| a.to_lowercase()).collect();

                // Exact match (highest priority)
                if code_lower == query_lower
                    || label_lower == query_lower
                    || aliases_lower.iter().any(|a| *a == query_lower)
                {
                    return Some((keycode, 100));
                }

                if code_lower.starts_with(&query_lower) || label_lower.starts_with(&query_lower) {
                    return Some((keycode, 50));
                }

                if code_lower.contains(&query_lower)
                    || label_lower.contains(&query_lower)
                    || aliases_lower.iter().any(|a| a.contains(&query_lower))
                {
                    return Some((keycode, 10));
                }

                if desc_lower.contains(&query_lower) {
                    return Some((keycode, 5));
                }

                None
            })
            .collect();

        // Stable sort keeps catalogue order within a relevance band
        results.sort_by(|a, b| b.1.cmp(&a.1));

        results.into_iter().map(|(keycode, _)| keycode).collect()
    }

    /// Lists categories with their key counts.
    #[must_use]
    pub fn categories(&self) -> Vec<KeycodeCategory> {
        KeyCategory::ALL
            .into_iter()
            .map(|category| KeycodeCategory {
                id: category.id(),
                name: category.name(),
                count: self
                    .keycodes
                    .iter()
                    .filter(|k| k.category == category.id())
                    .count(),
            })
            .collect()
    }

    /// Returns all keycodes in a category.
    #[must_use]
    pub fn by_category(&self, category: KeyCategory) -> Vec<&KeycodeDefinition> {
        self.keycodes
            .iter()
            .filter(|k| k.category == category.id())
            .collect()
    }

    /// Returns every keycode definition.
    #[must_use]
    pub fn all(&self) -> &[KeycodeDefinition] {
        &self.keycodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> KeycodeDb {
        KeycodeDb::load().unwrap()
    }

    #[test]
    fn test_parse_basic_names_and_aliases() {
        let db = db();
        assert_eq!(db.parse("KC_A"), Some(KeyCode::Key(Key::A)));
        assert_eq!(db.parse("KC_ESC"), Some(KeyCode::Key(Key::Escape)));
        assert_eq!(db.parse("KC_ESCAPE"), Some(KeyCode::Key(Key::Escape)));
        assert_eq!(db.parse("KC_RGHT"), Some(KeyCode::Key(Key::Right)));
        assert_eq!(db.parse("  KC_SPC "), Some(KeyCode::Key(Key::Space)));
    }

    #[test]
    fn test_parse_markers() {
        let db = db();
        assert_eq!(db.parse("_______"), Some(KeyCode::Transparent));
        assert_eq!(db.parse("KC_TRNS"), Some(KeyCode::Transparent));
        assert_eq!(db.parse("XXXXXXX"), Some(KeyCode::NoKey));
        assert_eq!(db.parse("KC_NO"), Some(KeyCode::NoKey));
    }

    #[test]
    fn test_parse_compound_expressions() {
        let db = db();
        assert_eq!(db.parse("MT(MOD_LCTL, KC_ESCAPE)"), Some(keymap::A_CTL));
        assert_eq!(db.parse("LT(MEDIA, KC_MINUS)"), Some(keymap::A_MED));
        assert_eq!(db.parse("LT(1,KC_MINS)"), Some(keymap::A_MED));
        assert_eq!(db.parse("LCTL(KC_SPACE)"), Some(keymap::A_LANG));
        assert_eq!(db.parse("A_LANG"), Some(keymap::A_LANG));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let db = db();
        assert_eq!(db.parse("INVALID_KEY"), None);
        assert_eq!(db.parse("MT(MOD_HYPR, KC_A)"), None);
        assert_eq!(db.parse("LT(5, KC_A)"), None);
        assert_eq!(db.parse("LT(MEDIA, KC_NOPE)"), None);
        assert_eq!(db.parse("LCTL(KC_A"), None);
        assert!(!db.is_valid(""));
    }

    #[test]
    fn test_every_code_round_trips_through_parse() {
        let db = db();
        for key in Key::ALL {
            let code = KeyCode::Key(*key);
            assert_eq!(db.parse(&code.to_qmk()), Some(code));
        }
        for code in [keymap::A_CTL, keymap::A_MED, keymap::A_LANG] {
            assert_eq!(db.parse(&code.to_qmk()), Some(code));
            assert_eq!(db.parse(&code.to_qmk_indexed()), Some(code));
        }
    }

    #[test]
    fn test_search_ranks_exact_first() {
        let db = db();
        let results = db.search("esc");
        assert_eq!(results[0].key, Key::Escape);

        let results = db.search("kc_mins");
        assert_eq!(results[0].key, Key::Minus);
    }

    #[test]
    fn test_search_by_description() {
        let db = db();
        let results = db.search("arrow");
        let keys: Vec<Key> = results.iter().map(|k| k.key).collect();
        assert!(keys.contains(&Key::Left));
        assert!(keys.contains(&Key::Up));
    }

    #[test]
    fn test_categories_cover_catalogue() {
        let db = db();
        let total: usize = db.categories().iter().map(|c| c.count).sum();
        assert_eq!(total, db.all().len());
        assert_eq!(db.by_category(KeyCategory::Alpha).len(), 26);
        assert_eq!(db.by_category(KeyCategory::Function).len(), 12);
    }
}
