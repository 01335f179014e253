//! Engine-wide constants: board geometry limits, default rules, game length.
//!
//! Unlike a fixed-size engine, the board dimension is chosen at runtime, so
//! this module only holds the bounds and defaults that every board shares.

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest accepted board dimension.
pub const MIN_SIZE: usize = 1;

/// Largest accepted board dimension. GTP vertex letters run out at 25 columns.
pub const MAX_SIZE: usize = 25;

/// The conventional board sizes offered to players.
pub const STANDARD_SIZES: [usize; 3] = [9, 13, 19];

/// Default board size for the CLI.
pub const DEFAULT_SIZE: usize = 9;

// =============================================================================
// Rules Defaults
// =============================================================================

/// Standard area-scoring komi. The half point rules out ties.
pub const DEFAULT_KOMI: f32 = 6.5;

// =============================================================================
// Playouts
// =============================================================================

/// Random games are cut off after `MAX_GAME_LEN_FACTOR * size * size` moves.
pub const MAX_GAME_LEN_FACTOR: usize = 3;

/// Column letters used for GTP vertices (no `I`).
pub const COLUMN_LETTERS: &[u8; 25] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";
