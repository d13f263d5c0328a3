//! Cell addressing.
//!
//! Provides bidirectional conversion between spreadsheet-style addresses
//! (e.g., "A1", "B2", "AA100") and zero-indexed row/column coordinates.
//!
//! # Examples
//!
//! ```
//! use cellgraph_engine::engine::Position;
//!
//! let pos = Position::from_a1("B3");
//! assert_eq!(pos.col, 1); // 0-indexed
//! assert_eq!(pos.row, 2);
//! assert_eq!(pos.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Number of addressable rows.
pub const MAX_ROWS: i32 = 16384;
/// Number of addressable columns.
pub const MAX_COLS: i32 = 16384;

const LETTERS: i64 = 26;

/// A cell address by row and column (0-indexed).
///
/// Ordering is by row, then column. It exists so collections of positions
/// iterate deterministically; it carries no spreadsheet meaning.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// The "no position" sentinel. It is never valid.
    pub const NONE: Position = Position { row: -1, col: -1 };

    pub const fn new(row: i32, col: i32) -> Position {
        Position { row, col }
    }

    pub fn is_valid(&self) -> bool {
        (0..MAX_ROWS).contains(&self.row) && (0..MAX_COLS).contains(&self.col)
    }

    /// Parse an address from spreadsheet notation (e.g., "A1", "B2", "AA10").
    ///
    /// Column letters must be upper case. Any malformed or out-of-bounds input
    /// yields [`Position::NONE`]; callers check [`Position::is_valid`].
    pub fn from_a1(name: &str) -> Position {
        Self::parse_a1(name).unwrap_or(Position::NONE)
    }

    fn parse_a1(name: &str) -> Option<Position> {
        let caps = a1_re().captures(name)?;
        let letters = &caps["letters"];
        let numbers = &caps["numbers"];

        let mut col_acc = 0i64;
        for c in letters.bytes() {
            let digit = (c - b'A') as i64 + 1;
            col_acc = col_acc.checked_mul(LETTERS)?.checked_add(digit)?;
            if col_acc > MAX_COLS as i64 {
                return None;
            }
        }
        let row = numbers.parse::<i64>().ok()?;
        if row < 1 || row > MAX_ROWS as i64 {
            return None;
        }

        Some(Position::new((row - 1) as i32, (col_acc - 1) as i32))
    }

    /// Convert a column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: i32) -> String {
        let mut result = Vec::new();
        let mut n = col as i64 + 1;
        while n > 0 {
            n -= 1;
            result.push(b'A' + (n % LETTERS) as u8);
            n /= LETTERS;
        }
        result.reverse();
        String::from_utf8(result).unwrap_or_default()
    }
}

fn a1_re() -> &'static Regex {
    static A1_RE: OnceLock<Regex> = OnceLock::new();
    A1_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Z]+)(?<numbers>[0-9]+)$").expect("A1 address regex must compile")
    })
}

/// Renders A1 notation, or nothing at all for an invalid position.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return Ok(());
        }
        write!(f, "{}{}", Position::col_to_letters(self.col), self.row + 1)
    }
}

/// Extent of a rectangular region anchored at A1.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub rows: i32,
    pub cols: i32,
}

impl Size {
    pub const fn new(rows: i32, cols: i32) -> Size {
        Size { rows, cols }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_a1_overflow_returns_none() {
        let huge = format!("{}1", "Z".repeat(40));
        assert_eq!(Position::from_a1(&huge), Position::NONE);
    }

    #[test]
    fn test_parse_a1_beyond_bounds_returns_none() {
        // Column 16385 is "XFE"; 16384 is "XFD".
        assert_eq!(Position::from_a1("XFD1"), Position::new(0, MAX_COLS - 1));
        assert_eq!(Position::from_a1("XFE1"), Position::NONE);
        assert_eq!(Position::from_a1("A16384"), Position::new(MAX_ROWS - 1, 0));
        assert_eq!(Position::from_a1("A16385"), Position::NONE);
    }

    #[test]
    fn test_bounds() {
        assert!(Position::new(0, 0).is_valid());
        assert!(Position::new(MAX_ROWS - 1, MAX_COLS - 1).is_valid());
        assert!(!Position::new(MAX_ROWS, 0).is_valid());
        assert!(!Position::new(0, MAX_COLS).is_valid());
        assert!(!Position::new(-1, 3).is_valid());
        assert!(!Position::NONE.is_valid());
    }

    #[test]
    fn test_invalid_position_displays_empty() {
        assert_eq!(Position::NONE.to_string(), "");
        assert_eq!(Position::new(MAX_ROWS, 0).to_string(), "");
    }

    #[test]
    fn test_col_to_letters() {
        assert_eq!(Position::col_to_letters(0), "A");
        assert_eq!(Position::col_to_letters(25), "Z");
        assert_eq!(Position::col_to_letters(26), "AA");
        assert_eq!(Position::col_to_letters(701), "ZZ");
        assert_eq!(Position::col_to_letters(702), "AAA");
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut positions = vec![
            Position::new(1, 0),
            Position::new(0, 5),
            Position::new(0, 1),
        ];
        positions.sort();
        assert_eq!(
            positions,
            vec![Position::new(0, 1), Position::new(0, 5), Position::new(1, 0)]
        );
    }
}
