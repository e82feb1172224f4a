use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use scacco_api::{apply_move, score_to_json};
use scacco_core::{Board, Color, GameState, STARTING_FEN, perft};
use scacco_engine::Engine;

#[derive(Parser)]
#[command(name = "scacco", about = "A small chess engine", version)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// Play both sides from the terminal.
    Board {
        /// Starting position as a FEN string.
        #[arg(long, default_value = STARTING_FEN)]
        fen: String,
    },
    /// Play against the engine.
    Bot {
        /// Starting position as a FEN string.
        #[arg(long, default_value = STARTING_FEN)]
        fen: String,
        /// Search depth for the engine's replies.
        #[arg(long = "engine-depth", default_value_t = 3)]
        engine_depth: u32,
        /// Which side you play.
        #[arg(long, value_enum, default_value_t = PlayerColor::White)]
        color: PlayerColor,
    },
    /// Run perft from depth 1 to N and print counts and timings.
    Test {
        /// Starting position as a FEN string.
        #[arg(long, default_value = STARTING_FEN)]
        fen: String,
        /// Maximum perft depth.
        #[arg(long, default_value_t = 6)]
        depth: usize,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlayerColor {
    White,
    Black,
}

impl From<PlayerColor> for Color {
    fn from(color: PlayerColor) -> Color {
        match color {
            PlayerColor::White => Color::White,
            PlayerColor::Black => Color::Black,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    match Cli::parse().mode.unwrap_or(Mode::Board {
        fen: STARTING_FEN.to_string(),
    }) {
        Mode::Board { fen } => run_board(&fen),
        Mode::Bot {
            fen,
            engine_depth,
            color,
        } => {
            check_depth(engine_depth as usize)?;
            run_bot(&fen, engine_depth, color.into())
        }
        Mode::Test { fen, depth } => {
            check_depth(depth)?;
            run_test(&fen, depth)
        }
    }
}

fn check_depth(depth: usize) -> Result<()> {
    if !(1..=12).contains(&depth) {
        bail!("depth must be between 1 and 12");
    }
    Ok(())
}

fn parse_board(fen: &str) -> Result<Board> {
    fen.parse::<Board>()
        .with_context(|| format!("invalid FEN {fen:?}"))
}

/// Read one move string from stdin. `None` on EOF or "quit".
fn read_move(side: Color) -> Result<Option<String>> {
    loop {
        print!("{side}> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line == "quit" {
            return Ok(None);
        }
        if !line.is_empty() {
            return Ok(Some(line.to_string()));
        }
    }
}

/// Report a finished game; `true` while the game goes on.
fn still_running(board: &mut Board) -> bool {
    match board.game_state() {
        GameState::InProgress => true,
        GameState::Mate(winner) => {
            println!("checkmate: {winner} wins");
            false
        }
        GameState::Draw => {
            println!("stalemate: draw");
            false
        }
    }
}

fn run_board(fen: &str) -> Result<()> {
    let mut board = parse_board(fen)?;
    info!(%board, "board mode");
    println!("{}", board.pretty());

    while still_running(&mut board) {
        let Some(input) = read_move(board.side_to_move())? else {
            break;
        };
        let status = apply_move(&mut board, &input);
        if !status.legal {
            println!("illegal move: {input}");
            continue;
        }
        println!("{}", board.pretty());
    }
    Ok(())
}

fn run_bot(fen: &str, engine_depth: u32, human: Color) -> Result<()> {
    let mut board = parse_board(fen)?;
    let mut engine = Engine::new();
    info!(%board, engine_depth, "bot mode");
    println!("{}", board.pretty());

    while still_running(&mut board) {
        if board.side_to_move() == human {
            let Some(input) = read_move(human)? else {
                break;
            };
            let status = apply_move(&mut board, &input);
            if !status.legal {
                println!("illegal move: {input}");
                continue;
            }
        } else {
            let result = engine.search(&mut board, engine_depth);
            let Some(mv) = result.best_move else {
                // Game over; the loop condition reports it next round.
                continue;
            };
            board.make_move(mv);
            let score = score_to_json(result.score);
            match score.mate {
                Some(n) => println!("engine plays {mv} (mate in {n})"),
                None => println!("engine plays {mv} (cp {})", score.cp.unwrap_or(0)),
            }
        }
        println!("{}", board.pretty());
    }
    Ok(())
}

fn run_test(fen: &str, max_depth: usize) -> Result<()> {
    let mut board = parse_board(fen)?;
    println!("FEN: {board}");

    for depth in 1..=max_depth {
        let start = Instant::now();
        let nodes = perft(&mut board, depth);
        let elapsed = start.elapsed();
        if elapsed.as_millis() < 1000 {
            println!("Depth {depth}: {nodes} ({}ms)", elapsed.as_millis());
        } else {
            println!("Depth {depth}: {nodes} ({:.2}s)", elapsed.as_secs_f64());
        }
    }
    Ok(())
}
