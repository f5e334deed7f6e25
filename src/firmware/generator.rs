//! QMK source generation.
//!
//! Emits the `keymap.c` and `keymap.json` QMK builds a keymap from. Both
//! refuse to run while the keymap has validation errors.

use anyhow::{Context, Result};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use crate::config::GenerateConfig;
use crate::export::render_layer_diagram;
use crate::keycode::KeyCode;
use crate::keycode_db::KeycodeDb;
use crate::keymap::{self, Keymap};
use crate::models::geometry::{self, HALF_SLOTS};
use crate::models::Layer;
use crate::parser::RawKeymap;

use super::validator::FirmwareValidator;
use super::write_atomic;

/// Which files to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `keymap.c` only
    Keymap,
    /// `keymap.json` only
    Json,
    /// Both files
    All,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "keymap" => Ok(Self::Keymap),
            "json" => Ok(Self::Json),
            "all" => Ok(Self::All),
            other => anyhow::bail!(
                "Invalid format '{other}'. Must be 'keymap', 'json', or 'all'"
            ),
        }
    }
}

/// Standard notice placed under the copyright line of Apache-2.0 files.
const APACHE_2_0_NOTICE: &str = r#"Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

     http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License."#;

/// Firmware source generator.
pub struct FirmwareGenerator<'a> {
    keymap: &'a Keymap,
    config: &'a GenerateConfig,
    keycode_db: &'a KeycodeDb,
}

impl<'a> FirmwareGenerator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub const fn new(
        keymap: &'a Keymap,
        config: &'a GenerateConfig,
        keycode_db: &'a KeycodeDb,
    ) -> Self {
        Self {
            keymap,
            config,
            keycode_db,
        }
    }

    /// Writes the requested files into `out_dir`, creating it if needed.
    ///
    /// Returns the paths written, `keymap.c` first.
    pub fn write_files(&self, out_dir: &Path, format: OutputFormat) -> Result<Vec<PathBuf>> {
        // Render everything before touching the disk
        let mut files = Vec::new();
        if matches!(format, OutputFormat::Keymap | OutputFormat::All) {
            files.push(("keymap.c", self.generate_keymap_c()?));
        }
        if matches!(format, OutputFormat::Json | OutputFormat::All) {
            files.push(("keymap.json", self.generate_keymap_json()?));
        }

        std::fs::create_dir_all(out_dir).context(format!(
            "Failed to create output directory: {}",
            out_dir.display()
        ))?;

        let mut written = Vec::with_capacity(files.len());
        for (name, content) in files {
            let path = out_dir.join(name);
            write_atomic(&path, &content)?;
            info!("Wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }

    /// Generates `keymap.c`.
    pub fn generate_keymap_c(&self) -> Result<String> {
        self.ensure_valid()?;

        let mut code = String::new();
        self.write_header(&mut code)?;

        code.push_str("#include QMK_KEYBOARD_H\n");
        code.push_str("#include \"version.h\"\n\n");

        let name_width = keymap::ALIASES
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0);
        for (name, code_value) in keymap::ALIASES {
            writeln!(code, "#define {name:<name_width$} {}", code_value.to_qmk())?;
        }
        code.push('\n');

        code.push_str("enum layers {\n");
        for layer in Layer::ALL {
            writeln!(code, "    {},", layer.qmk_name())?;
        }
        code.push_str("};\n\n");

        code.push_str("// clang-format off\n");
        code.push_str("const uint16_t PROGMEM keymaps[][MATRIX_ROWS][MATRIX_COLS] = {\n");
        for layer in Layer::ALL {
            self.write_layer(&mut code, layer)?;
        }
        code.push_str("};\n");
        code.push_str("// clang-format on\n");

        debug!("Generated keymap.c ({} bytes)", code.len());
        Ok(code)
    }

    /// Generates QMK `keymap.json`.
    pub fn generate_keymap_json(&self) -> Result<String> {
        self.ensure_valid()?;

        let raw = RawKeymap::from_keymap(self.keymap, self.config);
        let mut json =
            serde_json::to_string_pretty(&raw).context("Failed to serialize keymap.json")?;
        json.push('\n');

        debug!("Generated keymap.json ({} bytes)", json.len());
        Ok(json)
    }

    fn ensure_valid(&self) -> Result<()> {
        let report = FirmwareValidator::new(self.keycode_db).validate(self.keymap);
        if !report.is_valid() {
            anyhow::bail!("Keymap validation failed:\n{}", report.format_message());
        }
        Ok(())
    }

    fn write_header(&self, code: &mut String) -> Result<()> {
        if let Some(holder) = &self.config.copyright_holder {
            let year = self.config.resolved_year();
            if self.config.license == "Apache-2.0" {
                code.push_str("/*\n");
                writeln!(code, " * Copyright {year} {holder}")?;
                code.push_str(" *\n");
                for line in APACHE_2_0_NOTICE.lines() {
                    if line.is_empty() {
                        code.push_str(" *\n");
                    } else {
                        writeln!(code, " * {line}")?;
                    }
                }
                code.push_str(" */\n");
            } else {
                writeln!(code, "// Copyright {year} {holder}")?;
                writeln!(code, "// SPDX-License-Identifier: {}", self.config.license)?;
            }
            code.push('\n');
        }

        writeln!(
            code,
            "// Generated by {} {}",
            crate::constants::APP_BINARY_NAME,
            env!("CARGO_PKG_VERSION")
        )?;
        writeln!(
            code,
            "// Keyboard: {}, keymap: {}",
            self.config.keyboard, self.config.keymap_name
        )?;
        code.push('\n');
        Ok(())
    }

    /// Writes one `[LAYER] = LAYOUT(...)` entry, preceded by its diagram.
    fn write_layer(&self, code: &mut String, layer: Layer) -> Result<()> {
        code.push_str("    /*");
        for (idx, line) in render_layer_diagram(self.keymap, layer, false)
            .lines()
            .enumerate()
        {
            if idx == 0 {
                writeln!(code, " {line}")?;
            } else if line.is_empty() {
                code.push_str("     *\n");
            } else {
                writeln!(code, "     * {line}")?;
            }
        }
        code.push_str("     */\n");

        writeln!(
            code,
            "    [{}] = {}(",
            layer.qmk_name(),
            self.config.layout_macro
        )?;

        let tokens: Vec<String> = self
            .keymap
            .layout_keys(layer)
            .map(|(_, key_code)| c_expression(key_code))
            .collect();
        // Token, comma and one space of separation
        let cell_width = tokens.iter().map(String::len).max().unwrap_or(0) + 2;
        let last = tokens.len().saturating_sub(1);

        for (visual_row, (start, left, right)) in geometry::layout_rows().enumerate() {
            let (left_offset, right_offset) = geometry::row_offsets(visual_row, left, right);
            let mut line = String::from("        ");

            let cells = (0..left)
                .map(|i| (left_offset + i, start + i))
                .chain((0..right).map(|i| (HALF_SLOTS + right_offset + i, start + left + i)));

            let mut slot = 0;
            for (target_slot, idx) in cells {
                while slot < target_slot {
                    line.push_str(&" ".repeat(cell_width));
                    if slot + 1 == HALF_SLOTS {
                        line.push_str("  ");
                    }
                    slot += 1;
                }

                let token = if idx == last {
                    tokens[idx].clone()
                } else {
                    format!("{},", tokens[idx])
                };
                write!(line, "{token:<cell_width$}")?;
                if slot + 1 == HALF_SLOTS {
                    line.push_str("  ");
                }
                slot += 1;
            }

            writeln!(code, "{}", line.trim_end())?;
        }

        code.push_str("    ),\n");
        Ok(())
    }
}

/// Renders a code for `keymap.c`, preferring the `#define` alias.
fn c_expression(code: KeyCode) -> String {
    keymap::alias_for(code).map_or_else(|| code.to_qmk(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode::Key;
    use crate::keymap::KEYMAPS;
    use crate::models::KEY_COUNT;
    use tempfile::TempDir;

    fn generate_c(config: &GenerateConfig) -> String {
        let keymap = Keymap::dvorak();
        let db = KeycodeDb::load().unwrap();
        FirmwareGenerator::new(&keymap, config, &db)
            .generate_keymap_c()
            .unwrap()
    }

    /// Returns the comma-separated entries of one `LAYOUT(...)` block.
    fn layout_entries(code: &str, layer: Layer) -> Vec<String> {
        let start_marker = format!("[{}] = LAYOUT(", layer.qmk_name());
        let start = code.find(&start_marker).unwrap() + start_marker.len();
        let end = start + code[start..].find("\n    ),").unwrap();
        code[start..end]
            .lines()
            .flat_map(|line| line.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    #[test]
    fn test_keymap_c_structure() {
        let code = generate_c(&GenerateConfig::default());

        assert!(code.contains("#include QMK_KEYBOARD_H"));
        assert!(code.contains("#include \"version.h\""));
        assert!(code.contains("#define A_CTL  MT(MOD_LCTL, KC_ESC)"));
        assert!(code.contains("#define A_MED  LT(MEDIA, KC_MINS)"));
        assert!(code.contains("#define A_LANG LCTL(KC_SPC)"));
        assert!(code.contains("enum layers {\n    BASE,\n    MEDIA,\n};"));
        assert!(code.contains("const uint16_t PROGMEM keymaps[][MATRIX_ROWS][MATRIX_COLS]"));
        assert!(code.contains("/* Layer 0: Base"));
        assert!(code.contains("/* Layer 1: Media"));
        assert!(!code.contains("Copyright"));
    }

    #[test]
    fn test_layout_blocks_have_every_key() {
        let code = generate_c(&GenerateConfig::default());

        for layer in Layer::ALL {
            let entries = layout_entries(&code, layer);
            assert_eq!(entries.len(), KEY_COUNT, "{layer}");
        }

        let base = layout_entries(&code, Layer::Base);
        assert_eq!(base[0], "KC_EQL");
        assert_eq!(base[28], "A_CTL");
        assert_eq!(base[41], "A_MED");

        let media = layout_entries(&code, Layer::Media);
        assert_eq!(media[28], "_______");
        assert!(!base.iter().any(|e| e == "_______"));
    }

    #[test]
    fn test_license_header() {
        let config = GenerateConfig {
            copyright_holder: Some("Jane Doe".to_string()),
            year: Some(2023),
            ..GenerateConfig::default()
        };
        let code = generate_c(&config);

        assert!(code.starts_with(
            "/*\n * Copyright 2023 Jane Doe\n *\n * Licensed under the Apache License"
        ));
        assert!(code.contains(" *      http://www.apache.org/licenses/LICENSE-2.0\n"));
        assert!(code.contains(" * limitations under the License.\n */\n\n"));
        assert!(!code.contains("SPDX"));
    }

    #[test]
    fn test_other_license_header() {
        let config = GenerateConfig {
            copyright_holder: Some("Jane Doe".to_string()),
            license: "MIT".to_string(),
            year: Some(2023),
            ..GenerateConfig::default()
        };
        let code = generate_c(&config);

        assert!(code.starts_with(
            "// Copyright 2023 Jane Doe\n// SPDX-License-Identifier: MIT\n"
        ));
        assert!(!code.contains("Apache"));
    }

    #[test]
    fn test_custom_layout_macro() {
        let config = GenerateConfig {
            layout_macro: "LAYOUT_moonlander".to_string(),
            ..GenerateConfig::default()
        };
        let code = generate_c(&config);
        assert!(code.contains("[BASE] = LAYOUT_moonlander("));
    }

    #[test]
    fn test_refuses_invalid_keymap() {
        let mut tables = KEYMAPS;
        tables[Layer::Base.index()][0][0] = KeyCode::Transparent;
        let keymap = Keymap::new(tables);
        let config = GenerateConfig::default();
        let db = KeycodeDb::load().unwrap();
        let generator = FirmwareGenerator::new(&keymap, &config, &db);

        let err = generator.generate_keymap_c().unwrap_err();
        assert!(err.to_string().contains("Transparent Base"));
        assert!(generator.generate_keymap_json().is_err());

        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("out");
        assert!(generator.write_files(&out_dir, OutputFormat::All).is_err());
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_keymap_json_round_trips() {
        let keymap = Keymap::dvorak();
        let config = GenerateConfig::default();
        let db = KeycodeDb::load().unwrap();
        let json = FirmwareGenerator::new(&keymap, &config, &db)
            .generate_keymap_json()
            .unwrap();

        let raw = crate::parser::parse_keymap_json(&json).unwrap();
        assert_eq!(raw.keyboard, "zsa/moonlander");
        assert_eq!(raw.keymap, "dvorak");
        assert_eq!(raw.to_keymap(&db).unwrap(), keymap);
    }

    #[test]
    fn test_write_files() {
        let keymap = Keymap::dvorak();
        let config = GenerateConfig::default();
        let db = KeycodeDb::load().unwrap();
        let generator = FirmwareGenerator::new(&keymap, &config, &db);
        let temp_dir = TempDir::new().unwrap();

        let written = generator
            .write_files(temp_dir.path(), OutputFormat::All)
            .unwrap();
        assert_eq!(
            written,
            vec![
                temp_dir.path().join("keymap.c"),
                temp_dir.path().join("keymap.json")
            ]
        );

        // Overwriting keeps the files readable
        let written = generator
            .write_files(temp_dir.path(), OutputFormat::Json)
            .unwrap();
        assert_eq!(written, vec![temp_dir.path().join("keymap.json")]);
        assert!(std::fs::read_to_string(&written[0])
            .unwrap()
            .contains("\"LT(1, KC_MINS)\""));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("all".parse::<OutputFormat>().unwrap(), OutputFormat::All);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("config".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_c_expression_prefers_alias() {
        assert_eq!(c_expression(keymap::A_LANG), "A_LANG");
        assert_eq!(c_expression(KeyCode::Key(Key::Slash)), "KC_SLSH");
    }
}
