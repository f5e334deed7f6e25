//! Physical geometry of the ZSA Moonlander.
//!
//! The switch matrix is 12 rows by 7 columns. Rows 0-5 belong to the left
//! half and rows 6-11 to the right half. Only 72 of the 84 cells are wired
//! to a switch; the `LAYOUT` macro lists those 72 keys row by row as they
//! appear on the desk, and [`LAYOUT_POSITIONS`] records where each one lands
//! in the matrix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rows in the switch matrix.
pub const MATRIX_ROWS: usize = 12;

/// Number of columns in the switch matrix.
pub const MATRIX_COLS: usize = 7;

/// Number of wired keys (arguments to `LAYOUT`).
pub const KEY_COUNT: usize = 72;

/// Matrix rows per half.
pub const ROWS_PER_HALF: usize = MATRIX_ROWS / 2;

/// Keys per visual row of the `LAYOUT` macro, both halves together.
pub const LAYOUT_ROW_LENGTHS: [usize; 6] = [14, 14, 14, 12, 12, 6];

/// Keys on the left half of each visual row.
pub const LAYOUT_ROW_SPLITS: [usize; 6] = [7, 7, 7, 6, 6, 3];

/// Position in matrix coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Matrix row (0-11)
    pub row: u8,
    /// Matrix column (0-6)
    pub col: u8,
}

impl Position {
    /// Creates a new Position with the given row and column.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Returns true if the position lies inside the matrix.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        (self.row as usize) < MATRIX_ROWS && (self.col as usize) < MATRIX_COLS
    }

    /// Returns the half of the keyboard this position belongs to.
    #[must_use]
    pub const fn hand(self) -> Hand {
        if (self.row as usize) < ROWS_PER_HALF {
            Hand::Left
        } else {
            Hand::Right
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Keyboard half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    /// Left half, matrix rows 0-5
    Left,
    /// Right half, matrix rows 6-11
    Right,
}

const fn p(row: u8, col: u8) -> Position {
    Position::new(row, col)
}

/// Matrix position of each `LAYOUT` argument, in argument order.
#[rustfmt::skip]
pub const LAYOUT_POSITIONS: [Position; KEY_COUNT] = [
    p(0, 0), p(0, 1), p(0, 2), p(0, 3), p(0, 4), p(0, 5), p(0, 6),    p(6, 0), p(6, 1), p(6, 2), p(6, 3), p(6, 4), p(6, 5), p(6, 6),
    p(1, 0), p(1, 1), p(1, 2), p(1, 3), p(1, 4), p(1, 5), p(1, 6),    p(7, 0), p(7, 1), p(7, 2), p(7, 3), p(7, 4), p(7, 5), p(7, 6),
    p(2, 0), p(2, 1), p(2, 2), p(2, 3), p(2, 4), p(2, 5), p(2, 6),    p(8, 0), p(8, 1), p(8, 2), p(8, 3), p(8, 4), p(8, 5), p(8, 6),
    p(3, 0), p(3, 1), p(3, 2), p(3, 3), p(3, 4), p(3, 5),                      p(9, 1), p(9, 2), p(9, 3), p(9, 4), p(9, 5), p(9, 6),
    p(4, 0), p(4, 1), p(4, 2), p(4, 3), p(4, 4),          p(5, 3),    p(11, 3),         p(10, 2), p(10, 3), p(10, 4), p(10, 5), p(10, 6),
                               p(5, 0), p(5, 1), p(5, 2),             p(11, 4), p(11, 5), p(11, 6),
];

/// Returns the `LAYOUT` argument index of a matrix position, if it is wired.
#[must_use]
pub fn layout_index(position: Position) -> Option<usize> {
    LAYOUT_POSITIONS.iter().position(|p| *p == position)
}

/// Returns true if a switch is wired to the matrix position.
#[must_use]
pub fn is_wired(position: Position) -> bool {
    layout_index(position).is_some()
}

/// Iterates over every matrix position in row-major order.
pub fn matrix_positions() -> impl Iterator<Item = Position> {
    (0..MATRIX_ROWS).flat_map(|row| (0..MATRIX_COLS).map(move |col| p(row as u8, col as u8)))
}

/// Splits the `LAYOUT` argument list into visual rows.
///
/// Each entry is `(start, left_len, right_len)`: the first argument index of
/// the row and how many keys fall on each half.
pub fn layout_rows() -> impl Iterator<Item = (usize, usize, usize)> {
    LAYOUT_ROW_LENGTHS
        .into_iter()
        .zip(LAYOUT_ROW_SPLITS)
        .scan(0, |start, (len, left)| {
            let row = (*start, left, len - left);
            *start += len;
            Some(row)
        })
}

/// Key slots per half in diagrams and generated source.
pub const HALF_SLOTS: usize = MATRIX_COLS;

/// Slot of the first key on each half of a visual row.
///
/// Finger rows hug the outer edges; the thumb row hugs the gap between the
/// halves.
#[must_use]
pub const fn row_offsets(visual_row: usize, left: usize, right: usize) -> (usize, usize) {
    if visual_row + 1 == LAYOUT_ROW_LENGTHS.len() {
        (HALF_SLOTS - left, 0)
    } else {
        (0, HALF_SLOTS - right)
    }
}
