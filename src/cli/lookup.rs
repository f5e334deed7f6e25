//! Lookup command: what one key does on one layer.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::keycode::{Action, Interaction, KeyCode};
use crate::keymap::{self, Keymap};
use crate::models::{geometry, Hand, Layer, Position};
use clap::Args;
use serde::Serialize;

/// Show the code at a matrix position and what tap and hold do
#[derive(Debug, Clone, Args)]
pub struct LookupArgs {
    /// Layer, by name or index
    #[arg(short, long, value_name = "LAYER")]
    pub layer: String,

    /// Matrix row (0-11)
    #[arg(short, long)]
    pub row: u8,

    /// Matrix column (0-6)
    #[arg(short, long)]
    pub col: u8,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct LookupResult {
    layer: Layer,
    position: Position,
    hand: Hand,
    wired: bool,
    code: KeyCode,
    resolved: KeyCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    alias: Option<&'static str>,
    tap: Action,
    hold: Action,
}

impl LookupArgs {
    /// Execute the lookup command
    pub fn execute(&self) -> CliResult<()> {
        let layer: Layer = self
            .layer
            .parse()
            .map_err(|e| CliError::validation(format!("{e}")))?;
        let position = Position::new(self.row, self.col);

        let result = lookup(&Keymap::dvorak(), layer, position).ok_or_else(|| {
            CliError::validation(format!(
                "Position {position} is outside the {}x{} matrix",
                crate::models::MATRIX_ROWS,
                crate::models::MATRIX_COLS
            ))
        })?;

        if self.json {
            print_json(&result)?;
        } else {
            println!("Layer:    {} ({})", result.layer, result.layer.index());
            println!(
                "Position: {} {}",
                result.position,
                match result.hand {
                    Hand::Left => "left half",
                    Hand::Right => "right half",
                }
            );
            if !result.wired {
                println!("          (no switch at this position)");
            }
            match result.alias {
                Some(alias) => println!("Code:     {} = {}", alias, result.code),
                None => println!("Code:     {}", result.code),
            }
            if result.resolved != result.code {
                println!("Resolved: {}", result.resolved);
            }
            println!("Tap:      {}", result.tap);
            println!("Hold:     {}", result.hold);
        }

        Ok(())
    }
}

fn lookup(keymap: &Keymap, layer: Layer, position: Position) -> Option<LookupResult> {
    let code = keymap.get(layer, position)?;
    let resolved = keymap.resolve(layer, position)?;

    Some(LookupResult {
        layer,
        position,
        hand: position.hand(),
        wired: geometry::is_wired(position),
        code,
        resolved,
        alias: keymap::alias_for(resolved),
        tap: resolved.action(Interaction::Tap),
        hold: resolved.action(Interaction::Hold),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode::{Key, Modifier};

    #[test]
    fn test_lookup_control_escape_through_media() {
        let result = lookup(&Keymap::dvorak(), Layer::Media, Position::new(2, 0)).unwrap();

        assert_eq!(result.code, KeyCode::Transparent);
        assert_eq!(result.resolved, keymap::A_CTL);
        assert_eq!(result.alias, Some("A_CTL"));
        assert_eq!(result.tap, Action::Press { key: Key::Escape });
        assert_eq!(
            result.hold,
            Action::Modifier {
                modifier: Modifier::LeftCtrl
            }
        );
    }

    #[test]
    fn test_lookup_unwired_and_out_of_bounds() {
        let keymap = Keymap::dvorak();

        let unwired = lookup(&keymap, Layer::Base, Position::new(4, 6)).unwrap();
        assert!(!unwired.wired);
        assert_eq!(unwired.tap, Action::None);

        assert!(lookup(&keymap, Layer::Base, Position::new(12, 0)).is_none());
    }

    #[test]
    fn test_lookup_json_shape() {
        let result = lookup(&Keymap::dvorak(), Layer::Base, Position::new(8, 6)).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["layer"], "BASE");
        assert_eq!(json["code"], "LT(MEDIA, KC_MINS)");
        assert_eq!(json["hold"]["kind"], "layer_on");
        assert_eq!(json["hold"]["layer"], "MEDIA");
        assert_eq!(json["hand"], "right");
    }
}
