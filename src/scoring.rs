//! Area scoring with a capture bonus.
//!
//! Each side scores its stones on the board, plus every empty region that
//! borders only its own stones, plus the stones it has captured. White
//! additionally receives komi. Empty regions touching both colors, or no
//! stones at all, are neutral.

use std::fmt;

use crate::grid::{Color, Grid};

/// Final or running score for both players.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Score {
    pub black: f32,
    pub white: f32,
}

impl Score {
    pub fn get(&self, color: Color) -> f32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// Result implied by this score. Equal scores are a draw.
    pub fn outcome(&self) -> Outcome {
        let margin = self.black - self.white;
        if margin > 0.0 {
            Outcome::Win {
                color: Color::Black,
                margin,
            }
        } else if margin < 0.0 {
            Outcome::Win {
                color: Color::White,
                margin: -margin,
            }
        } else {
            Outcome::Draw
        }
    }
}

/// Result of a finished game.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Outcome {
    Win { color: Color, margin: f32 },
    Draw,
}

impl Outcome {
    pub fn winner(&self) -> Option<Color> {
        match self {
            Outcome::Win { color, .. } => Some(*color),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    /// GTP `final_score` notation: `B+3.5`, `W+0.5`, `0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win { color, margin } => {
                let side = match color {
                    Color::Black => 'B',
                    Color::White => 'W',
                };
                write!(f, "{side}+{margin:.1}")
            }
            Outcome::Draw => f.write_str("0"),
        }
    }
}

/// Stones plus single-color-bordered empty regions, per color (`[black, white]`).
pub fn area(grid: &Grid) -> [usize; 2] {
    let mut area = [grid.count(Color::Black), grid.count(Color::White)];
    for region in grid.empty_regions() {
        if let Some(owner) = region.owner() {
            area[owner.index()] += region.points.len();
        }
    }
    area
}

/// Score `grid` given each side's capture count (`[black, white]`) and komi.
pub fn score(grid: &Grid, captures: [u32; 2], komi: f32) -> Score {
    let area = area(grid);
    Score {
        black: (area[0] + captures[0] as usize) as f32,
        white: (area[1] + captures[1] as usize) as f32 + komi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_only_komi() {
        let grid = Grid::new(9);
        let s = score(&grid, [0, 0], 6.5);
        assert_eq!(s, Score { black: 0.0, white: 6.5 });
    }

    #[test]
    fn test_single_stone_owns_board() {
        let mut grid = Grid::new(9);
        grid.set((4, 4), Some(Color::Black));
        assert_eq!(area(&grid), [81, 0]);
    }

    #[test]
    fn test_shared_region_is_neutral() {
        let mut grid = Grid::new(5);
        grid.set((0, 0), Some(Color::Black));
        grid.set((4, 4), Some(Color::White));
        assert_eq!(area(&grid), [1, 1]);
    }

    #[test]
    fn test_walls_split_territory() {
        // Black wall on column 1, white wall on column 3 of a 5x5 board:
        // column 0 is black's, column 4 white's, column 2 is dame.
        let mut grid = Grid::new(5);
        for y in 0..5 {
            grid.set((1, y), Some(Color::Black));
            grid.set((3, y), Some(Color::White));
        }
        assert_eq!(area(&grid), [10, 10]);
        let s = score(&grid, [2, 1], 0.5);
        assert_eq!(s, Score { black: 12.0, white: 11.5 });
    }

    #[test]
    fn test_outcome() {
        let s = Score { black: 40.0, white: 41.5 };
        assert_eq!(
            s.outcome(),
            Outcome::Win {
                color: Color::White,
                margin: 1.5
            }
        );
        assert_eq!(s.outcome().to_string(), "W+1.5");

        let tie = Score { black: 7.0, white: 7.0 };
        assert_eq!(tie.outcome(), Outcome::Draw);
        assert_eq!(tie.outcome().winner(), None);
        assert_eq!(tie.outcome().to_string(), "0");
    }

    #[test]
    fn test_outcome_margin_has_one_decimal() {
        // 6.3 - 6.0 is not exact in f32.
        let s = score(&Grid::new(9), [6, 0], 6.3);
        assert_eq!(s.get(Color::Black), 6.0);
        assert_eq!(s.get(Color::White), 6.3);
        assert_eq!(s.outcome().to_string(), "W+0.3");

        let s = Score { black: 81.0, white: 6.5 };
        assert_eq!(s.outcome().to_string(), "B+74.5");
    }
}
