//! Conversion between board points and GTP vertices (`"D4"`, `"pass"`).
//!
//! Columns use the letters A-Z without `I`; rows count from 1 at the bottom
//! edge. Board points count `y` from the top, so row `r` is `y = size - r`.

use thiserror::Error;

use crate::board::Move;
use crate::constants::COLUMN_LETTERS;
use crate::grid::Point;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordError {
    #[error("invalid coordinate '{0}'")]
    Malformed(String),
    #[error("coordinate '{0}' is off the board")]
    OffBoard(String),
}

/// Parse a vertex such as `"D4"` for a board of the given size.
pub fn parse_point(s: &str, size: usize) -> Result<Point, CoordError> {
    let s = s.trim();
    let mut chars = s.chars();
    let col_char = chars
        .next()
        .ok_or_else(|| CoordError::Malformed(s.to_string()))?
        .to_ascii_uppercase();
    let col = COLUMN_LETTERS
        .iter()
        .position(|&c| c as char == col_char)
        .ok_or_else(|| CoordError::Malformed(s.to_string()))?;
    let row: usize = chars
        .as_str()
        .parse()
        .map_err(|_| CoordError::Malformed(s.to_string()))?;

    if col >= size || row == 0 || row > size {
        return Err(CoordError::OffBoard(s.to_string()));
    }
    Ok((col, size - row))
}

/// Format a point as a vertex. The point must be on a board of `size`.
pub fn format_point((x, y): Point, size: usize) -> String {
    format!("{}{}", COLUMN_LETTERS[x] as char, size - y)
}

/// Parse a vertex or `"pass"`.
pub fn parse_move(s: &str, size: usize) -> Result<Move, CoordError> {
    if s.trim().eq_ignore_ascii_case("pass") {
        return Ok(Move::Pass);
    }
    parse_point(s, size).map(Move::Play)
}

pub fn format_move(mv: Move, size: usize) -> String {
    match mv {
        Move::Play(pt) => format_point(pt, size),
        Move::Pass => "pass".into(),
    }
}
