//! Go-Rules command line.
//!
//! ## Usage
//!
//! - `go-rules` - Show a demo
//! - `go-rules gtp` - Start a GTP server for GUI integration
//! - `go-rules selfplay` - Play random games and report the results

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fastrand::Rng;
use log::LevelFilter;

use go_rules::constants::{DEFAULT_KOMI, DEFAULT_SIZE};
use go_rules::coord::parse_point;
use go_rules::gtp::GtpEngine;
use go_rules::playout::play_out;
use go_rules::rules::{KoRule, Rules, check_size};
use go_rules::{Board, Color, Outcome};

/// Go-Rules: a Go rules engine
#[derive(Parser)]
#[command(name = "go-rules")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp(GameArgs),
    /// Play a short scripted game and print the score
    Demo,
    /// Play random games against itself
    Selfplay {
        #[command(flatten)]
        game: GameArgs,
        /// Number of games to play
        #[arg(long, default_value_t = 1)]
        games: usize,
    },
}

#[derive(Args)]
struct GameArgs {
    /// Board size (1-25)
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,
    /// Points added to White's score
    #[arg(long, default_value_t = DEFAULT_KOMI)]
    komi: f32,
    /// Ko rule: none, simple or superko
    #[arg(long, default_value = "simple")]
    ko: KoRule,
    /// Random seed for generated moves
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

impl GameArgs {
    fn rules(&self) -> Rules {
        Rules::default().with_komi(self.komi).with_ko(self.ko)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Some(Commands::Gtp(args)) => {
            let size = check_size(args.size)?;
            let mut engine = GtpEngine::new(size, args.rules(), args.seed)?;
            engine.run().context("GTP session failed")?;
        }
        Some(Commands::Selfplay { game, games }) => run_selfplay(&game, games)?,
        Some(Commands::Demo) | None => run_demo()?,
    }
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("Go-Rules: capture and scoring demo\n");

    let mut board = Board::new(9, Color::Black)?;
    // Black surrounds and captures the white stone at D5.
    for vertex in ["C5", "D5", "E5", "J1", "D6", "J2", "D4"] {
        let pt = parse_point(vertex, board.size())?;
        let captured = board
            .put_stone(pt)
            .with_context(|| format!("demo move {vertex} rejected"))?;
        if !captured.is_empty() {
            println!("{vertex} captures {} stone(s)", captured.len());
        }
    }
    println!("{board}");

    board.pass_move();
    board.pass_move();
    let score = board.get_score();
    let rules = board.rules();
    println!("Rules: komi {}, {} ko", rules.komi, rules.ko);
    for color in [Color::Black, Color::White] {
        println!(
            "{color}: {:.1} ({} captured)",
            score.get(color),
            board.captured_stones(color)
        );
    }
    if let Some(outcome) = board.winner() {
        println!("Result: {outcome}");
    }
    Ok(())
}

fn run_selfplay(args: &GameArgs, games: usize) -> Result<()> {
    let size = check_size(args.size)?;
    let board = Board::with_rules(size, Color::Black, args.rules())?;
    let mut rng = Rng::with_seed(args.seed);
    let mut wins = [0usize; 2];
    let mut draws = 0usize;

    for game in 1..=games {
        let (finished, outcome) = play_out(&board, &mut rng);
        match outcome {
            Outcome::Win {
                color: Color::Black,
                ..
            } => wins[0] += 1,
            Outcome::Win {
                color: Color::White,
                ..
            } => wins[1] += 1,
            Outcome::Draw => draws += 1,
        }
        println!(
            "game {game}: {outcome} after {} moves (captures B {} W {})",
            finished.move_number(),
            finished.captured_stones(Color::Black),
            finished.captured_stones(Color::White)
        );
    }
    println!("black {} white {} draws {}", wins[0], wins[1], draws);
    Ok(())
}
