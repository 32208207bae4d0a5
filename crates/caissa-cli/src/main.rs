//! Interactive terminal chess.
//!
//! A thin I/O wrapper around the rules engine: it prompts for input,
//! prints the board, and relays the engine's verdicts. All legality
//! decisions live in `caissa-rules`.

mod player;
mod render;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use caissa_core::{PieceKind, Promotion, Side, Square, Wing};
use caissa_rules::{Game, GameStatus, MoveOutcome};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use player::Player;

#[derive(Debug, Parser)]
#[command(name = "caissa", about = "Play chess in the terminal")]
struct Args {
    /// Name of the player with the white pieces.
    #[arg(long, default_value = "White")]
    white: String,

    /// Name of the player with the black pieces.
    #[arg(long, default_value = "Black")]
    black: String,

    /// Start from this position instead of the standard one.
    #[arg(long)]
    fen: Option<String>,
}

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Move(Square, Square),
    Castle(Wing),
    Quit,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut game = match &args.fen {
        Some(fen) => Game::from_fen(fen).context("invalid starting position")?,
        None => Game::new(),
    };
    let mut white = Player::new(&args.white, Side::White);
    let mut black = Player::new(&args.black, Side::Black);

    print_banner();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !game.status().is_over() {
        println!("{}", render::board_to_string(game.board()));

        let side = game.side_to_move();
        let name = match side {
            Side::White => &white.name,
            Side::Black => &black.name,
        };
        let check_notice = if game.is_check() { " (in CHECK!)" } else { "" };
        print!("{}'s turn{}\nEnter move: ", name, check_notice);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!("\nGame abandoned.");
            return Ok(());
        };
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match parse_command(input) {
            Some(Command::Quit) => {
                println!("Game abandoned.");
                return Ok(());
            }
            Some(Command::Castle(wing)) => {
                tracing::debug!(%wing, side = %side, "castle attempt");
                if let Err(err) = game.castle(wing) {
                    println!("Error: {err}");
                }
            }
            Some(Command::Move(from, to)) => {
                tracing::debug!(%from, %to, side = %side, "move attempt");
                match game.play(from, to) {
                    Ok(MoveOutcome::Played { captured }) => {
                        record_capture(side, captured, &mut white, &mut black);
                    }
                    Ok(MoveOutcome::PromotionPending { captured, .. }) => {
                        record_capture(side, captured, &mut white, &mut black);
                        let choice = prompt_promotion(&mut lines)?;
                        if let Err(err) = game.promote(choice) {
                            println!("Error: {err}");
                        }
                    }
                    Err(err) => {
                        tracing::debug!(%err, "rejected");
                        println!("Error: {err}");
                    }
                }
            }
            None => println!("Error: enter a move like 'e2 e4', a castle like 'O-O', or 'quit'"),
        }
    }

    println!("{}", render::board_to_string(game.board()));
    println!("\nGame Over!");
    match game.status() {
        GameStatus::Checkmate { winner } => {
            let name = match winner {
                Side::White => &white.name,
                Side::Black => &black.name,
            };
            println!("Checkmate! {} wins!", name);
        }
        GameStatus::Stalemate => println!("Stalemate! It's a draw!"),
        GameStatus::InProgress => unreachable!("loop exits only on a terminal status"),
    }
    print_tally(&white);
    print_tally(&black);

    Ok(())
}

fn print_banner() {
    println!("=================================");
    println!("         Terminal  Chess         ");
    println!("=================================");
    println!();
    println!("Commands:");
    println!("  - Move: e2 e4");
    println!("  - Castle kingside: O-O or 0-0");
    println!("  - Castle queenside: O-O-O or 0-0-0");
    println!("  - Quit: quit or exit");
    println!();
}

/// Parses a line of input: a quit word, a castle token, or two squares
/// such as "e2 e4".
fn parse_command(input: &str) -> Option<Command> {
    if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
        return Some(Command::Quit);
    }
    if let Some(wing) = Wing::from_token(input) {
        return Some(Command::Castle(wing));
    }
    let mut parts = input.split_whitespace();
    let from = Square::from_algebraic(parts.next()?)?;
    let to = Square::from_algebraic(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some(Command::Move(from, to))
}

/// Asks for a promotion piece. An unrecognized answer falls through as
/// `None`, which the engine resolves to its configured default.
fn prompt_promotion(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<Option<Promotion>> {
    print!("Pawn promotion! Choose piece (Q/R/B/N): ");
    io::stdout().flush()?;
    let Some(line) = lines.next() else {
        return Ok(None);
    };
    let line = line?;
    Ok(line.trim().chars().next().and_then(Promotion::from_char))
}

fn record_capture(side: Side, captured: Option<PieceKind>, white: &mut Player, black: &mut Player) {
    let Some(kind) = captured else { return };
    let player = match side {
        Side::White => white,
        Side::Black => black,
    };
    player.record_capture(kind);
    println!("{} captured a {}!", player.name, kind);
}

fn print_tally(player: &Player) {
    println!(
        "{} ({}) captured {} points of material.",
        player.name,
        player.side,
        player.captured_value()
    );
}
