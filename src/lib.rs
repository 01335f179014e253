//! Go-Rules: the rules engine for the game of Go.
//!
//! This crate validates moves, removes captured stones, enforces ko, detects
//! the end of the game and computes area scores. Presentation layers and
//! automated players drive it through a small synchronous API on [`Board`].
//!
//! ## Modules
//!
//! - [`constants`] - Size limits and rule defaults
//! - [`grid`] - Stones, groups, liberties and empty regions
//! - [`rules`] - Komi, ko policy and error types
//! - [`board`] - The board engine (moves, passes, turn order)
//! - [`scoring`] - Area scoring and game outcome
//! - [`coord`] - GTP vertex notation
//! - [`playout`] - Random move selection and self-play
//! - [`gtp`] - Go Text Protocol front-end
//!
//! ## Example
//!
//! ```
//! use go_rules::{Board, Color};
//!
//! let mut board = Board::new(9, Color::Black).unwrap();
//! assert!(board.is_valid_move((2, 2)));
//! let captured = board.put_stone((2, 2)).unwrap();
//! assert!(captured.is_empty());
//!
//! board.pass_move();
//! assert!(board.pass_move());
//! let score = board.get_score();
//! assert_eq!(score.black, 81.0);
//! assert_eq!(score.white, 6.5);
//! ```

pub mod board;
pub mod constants;
pub mod coord;
pub mod grid;
pub mod gtp;
pub mod playout;
pub mod rules;
pub mod scoring;

pub use board::{Board, Move};
pub use grid::{Color, Grid, Point};
pub use rules::{KoRule, MoveError, Rules, RulesError};
pub use scoring::{Outcome, Score};
