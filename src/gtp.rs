//! Go Text Protocol (GTP) front-end.
//!
//! Exposes a [`Board`] to graphical clients (Sabaki, GoGui, ...) over GTP
//! version 2. Moves are generated by [`crate::playout::random_move`].
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - Any size from 1 to 25
//! - `clear_board`
//! - `komi <value>`
//! - `play <color> <vertex>`
//! - `genmove <color>`
//! - `showboard`
//! - `final_score`
//! - `captures <color>`

use std::io::{self, BufRead, Write};

use fastrand::Rng;
use log::{debug, warn};

use crate::board::{Board, Move};
use crate::coord::{format_move, parse_move};
use crate::grid::Color;
use crate::playout::random_move;
use crate::rules::{Rules, RulesError};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "captures",
    "clear_board",
    "final_score",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    board: Board,
    rules: Rules,
    rng: Rng,
}

impl GtpEngine {
    /// Create an engine with an empty board of `size`, Black to move.
    pub fn new(size: usize, rules: Rules, seed: u64) -> Result<Self, RulesError> {
        Ok(Self {
            board: Board::with_rules(size, Color::Black, rules)?,
            rules,
            rng: Rng::with_seed(seed),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the GTP command loop over stdin and stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over arbitrary streams until `quit` or end of input.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            debug!("gtp <- {command_line}");

            let (success, message) = self.execute(&command, args);
            if !success {
                warn!("gtp command '{command_line}' failed: {message}");
            }
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    fn parse_color(arg: &str) -> Option<Color> {
        match arg.to_lowercase().as_str() {
            "b" | "black" => Some(Color::Black),
            "w" | "white" => Some(Color::White),
            _ => None,
        }
    }

    fn reset(&mut self, size: usize) -> Result<(), String> {
        self.board =
            Board::with_rules(size, Color::Black, self.rules).map_err(|e| e.to_string())?;
        Ok(())
    }

    /// A copy of the board with `color` to move, passing for the other side if needed.
    ///
    /// The copy is committed only once the move on it succeeds, so a failed
    /// `play` or `genmove` leaves the game as it was. A pass that would end
    /// the game is never inserted.
    fn turn_for(&self, color: Color) -> Result<Board, String> {
        let mut trial = self.board.clone();
        if trial.next_to_move() != color {
            if trial.consecutive_passes() > 0 {
                return Err(format!("{color} just passed, {} is to move", color.opponent()));
            }
            trial.pass_move();
        }
        Ok(trial)
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>() {
                    Ok(size) => match self.reset(size) {
                        Ok(()) => (true, String::new()),
                        Err(_) => (false, "unacceptable size".to_string()),
                    },
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                let size = self.board.size();
                match self.reset(size) {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, e),
                }
            }

            "komi" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<f32>() {
                    Ok(komi) => {
                        self.rules = self.rules.with_komi(komi);
                        self.board.set_komi(komi);
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid komi".to_string()),
                }
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let Some(color) = Self::parse_color(args[0]) else {
                    return (false, "invalid color".to_string());
                };
                let mv = match parse_move(args[1], self.board.size()) {
                    Ok(mv) => mv,
                    Err(e) => return (false, e.to_string()),
                };
                if self.board.is_game_over() {
                    return (false, "game is over".to_string());
                }
                let mut trial = match self.turn_for(color) {
                    Ok(board) => board,
                    Err(e) => return (false, e),
                };
                match trial.play(mv) {
                    Ok(_) => {
                        self.board = trial;
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let Some(color) = args.first().and_then(|a| Self::parse_color(a)) else {
                    return (false, "invalid color".to_string());
                };
                if self.board.is_game_over() {
                    return (true, "pass".to_string());
                }
                // Answer a pass with a pass once stones are on the board.
                let opponent_passed = self.board.next_to_move() == color
                    && self.board.last_move() == Some(Move::Pass);
                let mut trial = match self.turn_for(color) {
                    Ok(board) => board,
                    Err(e) => return (false, e),
                };
                let mv = if opponent_passed && !trial.grid().is_empty() {
                    Move::Pass
                } else {
                    random_move(&trial, &mut self.rng).map_or(Move::Pass, Move::Play)
                };
                match trial.play(mv) {
                    Ok(_) => {
                        self.board = trial;
                        (true, format_move(mv, self.board.size()))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "showboard" => (true, format!("\n{}", self.board)),

            "final_score" => (true, self.board.get_score().outcome().to_string()),

            "captures" => {
                let Some(color) = args.first().and_then(|a| Self::parse_color(a)) else {
                    return (false, "invalid color".to_string());
                };
                (true, self.board.captured_stones(color).to_string())
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
