//! Keyboard visual renderer.
//!
//! Generates Unicode keyboard diagrams using box-drawing characters. The two
//! halves are drawn side by side, one box per key, with tap/hold keys split
//! over two lines.

use crate::keycode::KeyCode;
use crate::keymap::Keymap;
use crate::models::geometry::{self, HALF_SLOTS, LAYOUT_POSITIONS};
use crate::models::Layer;

/// Content width of a key box.
const KEY_WIDTH: usize = 7;
/// Horizontal distance between key boxes (content plus one shared border).
const KEY_PITCH: usize = KEY_WIDTH + 1;
/// Vertical distance between key rows (two label lines plus one border).
const ROW_PITCH: usize = 3;
/// Blank columns between the halves.
const SPLIT_GAP: usize = 6;

const UP: u8 = 1;
const DOWN: u8 = 2;
const LEFT: u8 = 4;
const RIGHT: u8 = 8;

/// Renders a single layer as a Unicode keyboard diagram.
///
/// With `resolved` set, transparent cells show the code they fall through
/// to instead of `▽`.
///
/// # Example
///
/// ```text
/// Layer 0: Base
/// ┌───────┬───────┬───────┐ ...
/// │   =   │   1   │   2   │
/// │       │       │       │
/// ├───────┼───────┼───────┤
/// │  Esc  │   A   │   O   │
/// │  Ctl  │       │       │
/// ```
#[must_use]
pub fn render_layer_diagram(keymap: &Keymap, layer: Layer, resolved: bool) -> String {
    let mut output = format!("Layer {}: {}\n", layer.index(), layer.name());

    let mut canvas = Canvas::new(
        2 * HALF_SLOTS * KEY_PITCH + SPLIT_GAP + 1,
        geometry::LAYOUT_ROW_LENGTHS.len() * ROW_PITCH + 1,
    );

    for (visual_row, (start, left, right)) in geometry::layout_rows().enumerate() {
        let (left_offset, right_offset) = geometry::row_offsets(visual_row, left, right);
        let y = visual_row * ROW_PITCH;

        for (i, pos) in LAYOUT_POSITIONS[start..start + left].iter().enumerate() {
            let x = (left_offset + i) * KEY_PITCH;
            canvas.key_box(x, y, &key_lines(keymap, layer, *pos, resolved));
        }

        let right_start = HALF_SLOTS * KEY_PITCH + SPLIT_GAP;
        for (i, pos) in LAYOUT_POSITIONS[start + left..start + left + right]
            .iter()
            .enumerate()
        {
            let x = right_start + (right_offset + i) * KEY_PITCH;
            canvas.key_box(x, y, &key_lines(keymap, layer, *pos, resolved));
        }
    }

    output.push_str(&canvas.render());
    output
}

/// Label lines for one key: tap action first, hold action second.
fn key_lines(
    keymap: &Keymap,
    layer: Layer,
    pos: crate::models::Position,
    resolved: bool,
) -> [String; 2] {
    let code = if resolved {
        keymap.resolve(layer, pos)
    } else {
        keymap.get(layer, pos)
    }
    .unwrap_or(KeyCode::NoKey);

    match code {
        KeyCode::ModTap { hold, tap } => [tap.label().to_string(), hold.label().to_string()],
        KeyCode::LayerTap { layer, tap } => {
            [tap.label().to_string(), layer.short_label().to_string()]
        }
        other => [other.label(), String::new()],
    }
}

/// Character buffer that merges the borders of neighbouring boxes.
struct Canvas {
    text: Vec<Vec<char>>,
    edges: Vec<Vec<u8>>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            text: vec![vec![' '; width]; height],
            edges: vec![vec![0; width]; height],
        }
    }

    fn key_box(&mut self, x: usize, y: usize, lines: &[String; 2]) {
        let right = x + KEY_PITCH;
        let bottom = y + ROW_PITCH;

        for col in x..right {
            self.link_horizontal(col, y);
            self.link_horizontal(col, bottom);
        }
        for row in y..bottom {
            self.link_vertical(x, row);
            self.link_vertical(right, row);
        }

        for (offset, line) in lines.iter().enumerate() {
            self.write_centered(x + 1, y + 1 + offset, line);
        }
    }

    fn link_horizontal(&mut self, x: usize, y: usize) {
        self.edges[y][x] |= RIGHT;
        self.edges[y][x + 1] |= LEFT;
    }

    fn link_vertical(&mut self, x: usize, y: usize) {
        self.edges[y][x] |= DOWN;
        self.edges[y + 1][x] |= UP;
    }

    /// Writes text centered in a key, truncated to the key width.
    fn write_centered(&mut self, x: usize, y: usize, text: &str) {
        let text_len = text.chars().count().min(KEY_WIDTH);
        let padding = (KEY_WIDTH - text_len).div_ceil(2);
        for (i, ch) in text.chars().take(KEY_WIDTH).enumerate() {
            self.text[y][x + padding + i] = ch;
        }
    }

    fn render(&self) -> String {
        let mut output = String::new();
        for (text_row, edge_row) in self.text.iter().zip(&self.edges) {
            let line: String = text_row
                .iter()
                .zip(edge_row)
                .map(|(ch, edges)| border_char(*edges).unwrap_or(*ch))
                .collect();
            output.push_str(line.trim_end());
            output.push('\n');
        }
        output
    }
}

fn border_char(edges: u8) -> Option<char> {
    let ch = match edges {
        0 => return None,
        e if e == LEFT | RIGHT || e == LEFT || e == RIGHT => '─',
        e if e == UP | DOWN || e == UP || e == DOWN => '│',
        e if e == DOWN | RIGHT => '┌',
        e if e == DOWN | LEFT => '┐',
        e if e == UP | RIGHT => '└',
        e if e == UP | LEFT => '┘',
        e if e == UP | DOWN | RIGHT => '├',
        e if e == UP | DOWN | LEFT => '┤',
        e if e == DOWN | LEFT | RIGHT => '┬',
        e if e == UP | LEFT | RIGHT => '┴',
        _ => '┼',
    };
    Some(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_shape() {
        let diagram = render_layer_diagram(&Keymap::dvorak(), Layer::Base, false);
        let lines: Vec<&str> = diagram.lines().collect();

        assert_eq!(lines[0], "Layer 0: Base");
        assert_eq!(lines.len(), 1 + geometry::LAYOUT_ROW_LENGTHS.len() * ROW_PITCH + 1);
        assert!(lines[1].starts_with("┌───────┬"));
    }

    #[test]
    fn test_tap_hold_keys_split_over_two_lines() {
        let diagram = render_layer_diagram(&Keymap::dvorak(), Layer::Base, false);
        let lines: Vec<&str> = diagram.lines().collect();

        // Third row of keys: tap labels, then hold labels
        let tap_line = lines[1 + 2 * ROW_PITCH + 1];
        let hold_line = lines[1 + 2 * ROW_PITCH + 2];
        assert!(tap_line.starts_with("│  Esc  │"));
        assert!(hold_line.starts_with("│  Ctl  │"));
        assert!(hold_line.trim_end().ends_with("│  MED  │"));
    }

    #[test]
    fn test_transparent_marker_and_resolution() {
        let keymap = Keymap::dvorak();

        let raw = render_layer_diagram(&keymap, Layer::Media, false);
        assert!(raw.contains('▽'));
        assert!(!raw.contains("Esc"));

        let resolved = render_layer_diagram(&keymap, Layer::Media, true);
        assert!(!resolved.contains('▽'));
        assert!(resolved.contains("Esc"));
    }

    #[test]
    fn test_halves_are_separated() {
        let diagram = render_layer_diagram(&Keymap::dvorak(), Layer::Base, false);
        let first_border = diagram.lines().nth(1).unwrap();
        let gap = " ".repeat(SPLIT_GAP - 1);
        assert!(first_border.contains(&format!("┐{gap}┌")));
    }

    #[test]
    fn test_border_char_junctions() {
        assert_eq!(border_char(0), None);
        assert_eq!(border_char(DOWN | RIGHT), Some('┌'));
        assert_eq!(border_char(UP | DOWN | LEFT | RIGHT), Some('┼'));
        assert_eq!(border_char(DOWN | LEFT | RIGHT), Some('┬'));
    }
}
