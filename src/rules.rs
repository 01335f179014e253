//! Rule configuration and the errors the engine reports.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{DEFAULT_KOMI, MAX_SIZE, MIN_SIZE};

/// Repetition policy applied to every stone placement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum KoRule {
    /// No repetition check at all.
    None,
    /// A move may not restore the position from before the opponent's last move.
    #[default]
    Simple,
    /// A move may not restore any position seen earlier in the game.
    PositionalSuperko,
}

impl FromStr for KoRule {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(KoRule::None),
            "simple" => Ok(KoRule::Simple),
            "superko" | "positional-superko" => Ok(KoRule::PositionalSuperko),
            _ => Err(RulesError::UnknownKoRule(s.to_string())),
        }
    }
}

impl fmt::Display for KoRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KoRule::None => f.write_str("none"),
            KoRule::Simple => f.write_str("simple"),
            KoRule::PositionalSuperko => f.write_str("superko"),
        }
    }
}

/// Per-match rules: komi and ko policy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rules {
    /// Compensation added to White's score.
    pub komi: f32,
    pub ko: KoRule,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            komi: DEFAULT_KOMI,
            ko: KoRule::default(),
        }
    }
}

impl Rules {
    pub fn with_komi(mut self, komi: f32) -> Self {
        self.komi = komi;
        self
    }

    pub fn with_ko(mut self, ko: KoRule) -> Self {
        self.ko = ko;
        self
    }
}

/// Why a stone placement was refused. A refused move never changes the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move: point is off the board")]
    OutOfBounds,
    #[error("illegal move: point not empty")]
    Occupied,
    #[error("illegal move: suicide")]
    Suicide,
    #[error("illegal move: retakes ko")]
    Ko,
    #[error("illegal move: game is over")]
    GameOver,
}

/// Configuration errors raised when a match is set up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("board size {0} is outside {min}..={max}", min = MIN_SIZE, max = MAX_SIZE)]
    InvalidSize(usize),
    #[error("unknown ko rule '{0}' (expected none, simple or superko)")]
    UnknownKoRule(String),
}

/// Validate a board dimension before building a match.
pub fn check_size(size: usize) -> Result<usize, RulesError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(RulesError::InvalidSize(size))
    }
}
