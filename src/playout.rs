//! Random play for an automated opponent and for self-play games.
//!
//! Move selection only goes through the public board contract
//! (`is_valid_move`, `put_stone`, `pass_move`), and whole-game simulations run
//! on a clone so the live board is never touched.

use fastrand::Rng;

use crate::board::Board;
use crate::constants::MAX_GAME_LEN_FACTOR;
use crate::grid::{Color, Grid, Point};
use crate::scoring::Outcome;

/// Whether `pt` is a true single-point eye of `color`.
///
/// Every orthogonal neighbor must be `color`, and opposing stones may occupy
/// at most one diagonal in the middle of the board and none on the edge.
pub fn is_true_eye(grid: &Grid, pt: Point, color: Color) -> bool {
    if grid.get(pt).is_some() {
        return false;
    }
    if grid.neighbors(pt).any(|n| grid.get(n) != Some(color)) {
        return false;
    }

    let (x, y) = pt;
    let size = grid.size();
    let mut on_board = 0;
    let mut bad = 0;
    for (dx, dy) in [(-1isize, -1isize), (1, -1), (-1, 1), (1, 1)] {
        let (Some(dx), Some(dy)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
            continue;
        };
        if dx >= size || dy >= size {
            continue;
        }
        on_board += 1;
        if grid.get((dx, dy)) == Some(color.opponent()) {
            bad += 1;
        }
    }
    let tolerance = if on_board == 4 { 1 } else { 0 };
    bad <= tolerance
}

/// A uniformly random legal move for the side to move that does not fill one
/// of its own true eyes. `None` means the player should pass.
pub fn random_move(board: &Board, rng: &mut Rng) -> Option<Point> {
    let color = board.next_to_move();
    let grid = board.grid();
    let mut candidates: Vec<Point> = grid
        .points()
        .filter(|&pt| grid.get(pt).is_none() && !is_true_eye(grid, pt, color))
        .collect();
    rng.shuffle(&mut candidates);
    candidates.into_iter().find(|&pt| board.is_valid_move(pt))
}

/// Play random moves on a copy of `board` until the game ends or the move cap
/// is reached, then return the result of scoring that position.
pub fn play_out(board: &Board, rng: &mut Rng) -> (Board, Outcome) {
    let mut sim = board.clone();
    let max_moves = MAX_GAME_LEN_FACTOR * sim.size() * sim.size();
    while !sim.is_game_over() && sim.move_number() < max_moves {
        match random_move(&sim, rng) {
            Some(pt) => {
                // random_move only returns points that pass is_valid_move
                if sim.put_stone(pt).is_err() {
                    sim.pass_move();
                }
            }
            None => {
                sim.pass_move();
            }
        }
    }
    let outcome = sim.get_score().outcome();
    (sim, outcome)
}
