//! The board engine: turn order, legality, captures, passes and scoring.
//!
//! A [`Board`] owns one match from the first move to the final score. It is
//! mutated only through [`Board::put_stone`] and [`Board::pass_move`]; every
//! other method is a query. Rejected moves leave the board untouched.
//!
//! `Board` is `Clone` with no shared state, so an automated player can try
//! candidate moves on a copy and only then play for real.

use std::fmt;

use log::{debug, info, trace};

use crate::grid::{Color, Grid, Point};
use crate::rules::{KoRule, MoveError, Rules, RulesError, check_size};
use crate::scoring::{self, Outcome, Score};

/// A completed action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Play(Point),
    Pass,
}

/// Game state for a single match.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    grid: Grid,
    rules: Rules,
    next: Color,
    passes: u8,
    /// Stones each color has taken from the other, indexed by `Color::index`.
    captures: [u32; 2],
    /// Grid as it was before the previous move; `None` places no constraint.
    ko_snapshot: Option<Grid>,
    /// Every position so far. Only kept under positional superko.
    history: Vec<Grid>,
    move_number: usize,
    last_move: Option<Move>,
}

impl Board {
    /// A new empty board with default rules.
    pub fn new(size: usize, first: Color) -> Result<Self, RulesError> {
        Self::with_rules(size, first, Rules::default())
    }

    pub fn with_rules(size: usize, first: Color, rules: Rules) -> Result<Self, RulesError> {
        let size = check_size(size)?;
        let grid = Grid::new(size);
        let history = match rules.ko {
            KoRule::PositionalSuperko => vec![grid.clone()],
            KoRule::None | KoRule::Simple => Vec::new(),
        };
        Ok(Self {
            grid,
            rules,
            next: first,
            passes: 0,
            captures: [0, 0],
            ko_snapshot: None,
            history,
            move_number: 0,
            last_move: None,
        })
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Stone at `pt`, `None` when empty or off the board.
    pub fn get(&self, pt: Point) -> Option<Color> {
        self.grid.get(pt)
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn komi(&self) -> f32 {
        self.rules.komi
    }

    /// Change komi for the rest of the match. Stones, turn and ko state are kept.
    pub fn set_komi(&mut self, komi: f32) {
        debug!("komi {} -> {komi}", self.rules.komi);
        self.rules.komi = komi;
    }

    pub fn next_to_move(&self) -> Color {
        self.next
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.passes
    }

    /// Stones `color` has captured from its opponent.
    pub fn captured_stones(&self, color: Color) -> u32 {
        self.captures[color.index()]
    }

    /// Number of completed moves and passes.
    pub fn move_number(&self) -> usize {
        self.move_number
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// True once two passes have been played in a row.
    pub fn is_game_over(&self) -> bool {
        self.passes >= 2
    }

    /// Check whether the side to move may play at `pt`, without changing anything.
    pub fn check_move(&self, pt: Point) -> Result<(), MoveError> {
        self.resolve(pt).map(|_| ())
    }

    /// Pure legality query.
    pub fn is_valid_move(&self, pt: Point) -> bool {
        self.check_move(pt).is_ok()
    }

    /// All points the side to move may legally play, in row-major order.
    pub fn legal_moves(&self) -> Vec<Point> {
        self.grid.points().filter(|&pt| self.is_valid_move(pt)).collect()
    }

    /// Place a stone for the side to move.
    ///
    /// On success the captured opponent stones are returned and the turn
    /// passes to the opponent. On failure nothing changes.
    pub fn put_stone(&mut self, pt: Point) -> Result<Vec<Point>, MoveError> {
        let (grid, captured) = match self.resolve(pt) {
            Ok(r) => r,
            Err(e) => {
                trace!("{} at {:?} rejected: {}", self.next, pt, e);
                return Err(e);
            }
        };
        let color = self.next;

        let before = std::mem::replace(&mut self.grid, grid);
        self.ko_snapshot = Some(before);
        if self.rules.ko == KoRule::PositionalSuperko {
            self.history.push(self.grid.clone());
        }
        self.captures[color.index()] += captured.len() as u32;
        self.passes = 0;
        self.next = color.opponent();
        self.move_number += 1;
        self.last_move = Some(Move::Play(pt));

        debug_assert!(
            !self.grid.has_dead_group(),
            "group without liberties after {color} played {pt:?}"
        );
        debug!(
            "move {}: {} plays {:?}, captures {}",
            self.move_number,
            color,
            pt,
            captured.len()
        );
        Ok(captured)
    }

    /// Pass the turn. Returns true if the game is over afterwards.
    ///
    /// Once the game has ended this is a no-op that keeps returning true.
    pub fn pass_move(&mut self) -> bool {
        if self.is_game_over() {
            return true;
        }
        let color = self.next;
        self.passes += 1;
        self.next = color.opponent();
        self.move_number += 1;
        self.last_move = Some(Move::Pass);
        // The grid is unchanged, so no placement can restore the pre-pass position.
        self.ko_snapshot = None;
        debug!("move {}: {} passes", self.move_number, color);

        if self.is_game_over() {
            let score = self.get_score();
            info!(
                "game over after {} moves: black {} white {} ({})",
                self.move_number,
                score.black,
                score.white,
                score.outcome()
            );
            return true;
        }
        false
    }

    /// Play either a stone or a pass for the side to move.
    pub fn play(&mut self, mv: Move) -> Result<Vec<Point>, MoveError> {
        match mv {
            Move::Play(pt) => self.put_stone(pt),
            Move::Pass if self.is_game_over() => Err(MoveError::GameOver),
            Move::Pass => {
                self.pass_move();
                Ok(Vec::new())
            }
        }
    }

    /// Area score plus captures, with komi for White.
    pub fn get_score(&self) -> Score {
        scoring::score(&self.grid, self.captures, self.rules.komi)
    }

    /// The result, available once the game is over.
    pub fn winner(&self) -> Option<Outcome> {
        if self.is_game_over() {
            Some(self.get_score().outcome())
        } else {
            None
        }
    }

    /// Work out the grid that placing at `pt` would produce, plus the stones it captures.
    fn resolve(&self, pt: Point) -> Result<(Grid, Vec<Point>), MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        if !self.grid.contains(pt) {
            return Err(MoveError::OutOfBounds);
        }
        if self.grid.get(pt).is_some() {
            return Err(MoveError::Occupied);
        }

        let color = self.next;
        let opp = color.opponent();
        let mut work = self.grid.clone();
        work.set(pt, Some(color));

        let mut captured: Vec<Point> = Vec::new();
        for n in self.grid.neighbors(pt) {
            if work.get(n) == Some(opp) && !captured.contains(&n) {
                let group = work.group(n);
                if work.liberties(&group) == 0 {
                    captured.extend(group);
                }
            }
        }
        work.remove_all(&captured);

        // Captures are resolved first, so a capturing move is never suicide.
        if work.group_liberties(pt) == 0 {
            return Err(MoveError::Suicide);
        }
        if self.repeats(&work) {
            return Err(MoveError::Ko);
        }
        Ok((work, captured))
    }

    fn repeats(&self, next: &Grid) -> bool {
        match self.rules.ko {
            KoRule::None => false,
            KoRule::Simple => self.ko_snapshot.as_ref() == Some(next),
            KoRule::PositionalSuperko => self.history.contains(next),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)?;
        write!(
            f,
            "{} to move, captures black {} white {}",
            self.next,
            self.captured_stones(Color::Black),
            self.captured_stones(Color::White)
        )?;
        if self.is_game_over() {
            write!(f, ", game over")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board9() -> Board {
        Board::new(9, Color::Black).unwrap()
    }

    /// Play a sequence, panicking on any illegal move.
    fn play_all(board: &mut Board, moves: &[Point]) {
        for &pt in moves {
            if let Err(e) = board.put_stone(pt) {
                panic!("setup move {pt:?} failed: {e}");
            }
        }
    }

    /// Black and White alternate; returns the board with White to move
    /// right after Black captured a single stone at (1, 1) by playing (2, 1).
    fn ko_position(rules: Rules) -> Board {
        let mut b = Board::with_rules(9, Color::Black, rules).unwrap();
        play_all(
            &mut b,
            &[
                (1, 0),
                (2, 0),
                (0, 1),
                (1, 1),
                (1, 2),
                (3, 1),
                (8, 8),
                (2, 2),
            ],
        );
        let captured = b.put_stone((2, 1)).unwrap();
        assert_eq!(captured, vec![(1, 1)]);
        b
    }

    #[test]
    fn test_new_board() {
        let b = board9();
        assert_eq!(b.size(), 9);
        assert_eq!(b.next_to_move(), Color::Black);
        assert_eq!(b.consecutive_passes(), 0);
        assert_eq!(b.komi(), 6.5);
        assert_eq!(b.rules().ko, KoRule::Simple);
        assert!(!b.is_game_over());
        assert_eq!(b.winner(), None);
        assert_eq!(b.last_move(), None);
    }

    #[test]
    fn test_invalid_sizes() {
        assert_eq!(
            Board::new(0, Color::Black).unwrap_err(),
            RulesError::InvalidSize(0)
        );
        assert!(Board::new(100, Color::Black).is_err());
        assert!(Board::new(1, Color::Black).is_ok());
    }

    #[test]
    fn test_white_can_start() {
        let mut b = Board::new(9, Color::White).unwrap();
        b.put_stone((4, 4)).unwrap();
        assert_eq!(b.get((4, 4)), Some(Color::White));
        assert_eq!(b.next_to_move(), Color::Black);
    }

    #[test]
    fn test_put_stone_alternates() {
        let mut b = board9();
        assert_eq!(b.put_stone((2, 2)), Ok(vec![]));
        assert_eq!(b.next_to_move(), Color::White);
        assert_eq!(b.put_stone((6, 6)), Ok(vec![]));
        assert_eq!(b.get((2, 2)), Some(Color::Black));
        assert_eq!(b.get((6, 6)), Some(Color::White));
        assert_eq!(b.move_number(), 2);
        assert_eq!(b.last_move(), Some(Move::Play((6, 6))));
    }

    #[test]
    fn test_rejections_leave_state_alone() {
        let mut b = board9();
        b.put_stone((4, 4)).unwrap();
        b.pass_move();
        let before = b.clone();

        assert_eq!(b.put_stone((4, 4)), Err(MoveError::Occupied));
        assert_eq!(b.put_stone((9, 0)), Err(MoveError::OutOfBounds));
        assert_eq!(b.put_stone((0, 42)), Err(MoveError::OutOfBounds));
        assert_eq!(b, before);
        assert_eq!(b.consecutive_passes(), 1);
    }

    #[test]
    fn test_capture_single_stone() {
        let mut b = board9();
        play_all(&mut b, &[(3, 4), (4, 4), (5, 4), (0, 0), (4, 3), (0, 8)]);
        let captured = b.put_stone((4, 5)).unwrap();
        assert_eq!(captured, vec![(4, 4)]);
        assert_eq!(b.get((4, 4)), None);
        assert_eq!(b.captured_stones(Color::Black), 1);
        assert_eq!(b.captured_stones(Color::White), 0);
    }

    #[test]
    fn test_suicide_rejected() {
        let mut b = board9();
        play_all(
            &mut b,
            &[(1, 0), (8, 8), (0, 1), (8, 7), (2, 1), (8, 6), (1, 2)],
        );
        assert_eq!(b.next_to_move(), Color::White);
        assert!(!b.is_valid_move((1, 1)));
        assert_eq!(b.put_stone((1, 1)), Err(MoveError::Suicide));
        assert_eq!(b.get((1, 1)), None);
        assert_eq!(b.next_to_move(), Color::White);
    }

    #[test]
    fn test_multi_stone_suicide_rejected() {
        // White (0,0) would join (1,0) and leave the pair without liberties.
        let mut b = board9();
        play_all(&mut b, &[(2, 0), (1, 0), (1, 1), (8, 8), (0, 1)]);
        assert_eq!(b.put_stone((0, 0)), Err(MoveError::Suicide));
    }

    #[test]
    fn test_capture_beats_suicide() {
        // Black fills the corner, leaving itself no liberty until both
        // white stones come off.
        let mut b = board9();
        play_all(&mut b, &[(2, 0), (1, 0), (1, 1), (0, 1), (0, 2), (8, 8)]);
        let mut captured = b.put_stone((0, 0)).unwrap();
        captured.sort();
        assert_eq!(captured, vec![(0, 1), (1, 0)]);
        assert_eq!(b.captured_stones(Color::Black), 2);
        assert_eq!(b.grid().group_liberties((0, 0)), 2);
    }

    #[test]
    fn test_simple_ko_blocks_immediate_retake() {
        let mut b = ko_position(Rules::default());
        assert_eq!(b.check_move((1, 1)), Err(MoveError::Ko));
        assert_eq!(b.put_stone((1, 1)), Err(MoveError::Ko));

        // A ko threat elsewhere lifts the restriction.
        play_all(&mut b, &[(7, 7), (6, 6)]);
        assert_eq!(b.put_stone((1, 1)), Ok(vec![(2, 1)]));
        assert_eq!(b.captured_stones(Color::White), 1);
    }

    #[test]
    fn test_ko_rule_none_allows_retake() {
        let mut b = ko_position(Rules::default().with_ko(KoRule::None));
        assert_eq!(b.put_stone((1, 1)), Ok(vec![(2, 1)]));
    }

    #[test]
    fn test_superko_blocks_retake() {
        let mut b = ko_position(Rules::default().with_ko(KoRule::PositionalSuperko));
        assert_eq!(b.put_stone((1, 1)), Err(MoveError::Ko));
    }

    #[test]
    fn test_ko_lapses_after_pass_and_reply() {
        let mut b = ko_position(Rules::default());
        assert!(!b.pass_move());
        b.put_stone((6, 6)).unwrap();
        // Retaking now yields a new position because of the extra black stone.
        assert!(b.is_valid_move((1, 1)));
    }

    #[test]
    fn test_two_passes_end_game() {
        let mut b = board9();
        b.put_stone((4, 4)).unwrap();
        assert!(!b.pass_move());
        assert_eq!(b.consecutive_passes(), 1);
        assert!(b.pass_move());
        assert!(b.is_game_over());
        assert_eq!(b.consecutive_passes(), 2);

        let frozen = b.clone();
        assert_eq!(b.put_stone((0, 0)), Err(MoveError::GameOver));
        assert!(b.pass_move());
        assert_eq!(b.play(Move::Pass), Err(MoveError::GameOver));
        assert!(!b.is_valid_move((0, 0)));
        assert_eq!(b, frozen);

        let outcome = b.winner().unwrap();
        assert_eq!(
            outcome,
            Outcome::Win {
                color: Color::Black,
                margin: 74.5
            }
        );
        assert_eq!(b.winner(), Some(outcome));
    }

    #[test]
    fn test_stone_resets_pass_count() {
        let mut b = board9();
        b.pass_move();
        b.put_stone((4, 4)).unwrap();
        assert_eq!(b.consecutive_passes(), 0);
        assert!(!b.pass_move());
    }

    #[test]
    fn test_empty_board_score() {
        let b = board9();
        let s = b.get_score();
        assert_eq!(s.black, 0.0);
        assert_eq!(s.white, 6.5);
        assert_eq!(b.get_score(), s);
    }

    #[test]
    fn test_integer_komi_draw() {
        let rules = Rules::default().with_komi(0.0);
        let mut b = Board::with_rules(9, Color::Black, rules).unwrap();
        b.pass_move();
        b.pass_move();
        assert_eq!(b.winner(), Some(Outcome::Draw));
    }

    #[test]
    fn test_set_komi_mid_game() {
        let mut b = board9();
        b.put_stone((4, 4)).unwrap();
        b.set_komi(100.5);
        assert_eq!(b.rules().komi, 100.5);
        assert_eq!(b.get_score(), Score { black: 81.0, white: 100.5 });
        assert_eq!(b.next_to_move(), Color::White);
        assert_eq!(b.move_number(), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut live = board9();
        live.put_stone((4, 4)).unwrap();
        let mut sim = live.clone();
        sim.put_stone((3, 3)).unwrap();
        assert_eq!(live.get((3, 3)), None);
        assert_eq!(live.next_to_move(), Color::White);
        assert_eq!(sim.next_to_move(), Color::Black);
    }

    #[test]
    fn test_legal_moves_excludes_occupied() {
        let mut b = Board::new(3, Color::Black).unwrap();
        b.put_stone((1, 1)).unwrap();
        let moves = b.legal_moves();
        assert_eq!(moves.len(), 8);
        assert!(!moves.contains(&(1, 1)));
    }

    #[test]
    fn test_display() {
        let mut b = Board::new(3, Color::Black).unwrap();
        b.put_stone((0, 0)).unwrap();
        assert_eq!(
            b.to_string(),
            "   A B C\n 3 X . .\n 2 . . .\n 1 . . .\nwhite to move, captures black 0 white 0\n"
        );
    }
}
