use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use skirmish::chess::board::Board;
use skirmish::chess::core::Color;
use skirmish::game::{Game, GameConfig, DEFAULT_MAX_MOVES};
use skirmish::policy::PolicyKind;

/// Plays a game between two policies on a board read from a text file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// Side that makes the first move: "white" or "black".
    starting_color: Color,
    /// Policy of the white side.
    #[arg(value_enum)]
    white: PolicyKind,
    /// Policy of the black side.
    #[arg(value_enum)]
    black: PolicyKind,
    /// Board text: one line per row, "KQRBNP" for White, "kqrbnp" for Black
    /// and "." for empty squares.
    input: PathBuf,
    /// Stop the game as a draw after this many moves of both sides.
    #[arg(long, default_value_t = DEFAULT_MAX_MOVES)]
    max_moves: usize,
    /// Seed the policies for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,
    /// Print the board with Unicode chess figurines.
    #[arg(long)]
    figurines: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let config = Config::parse();
    let mut stdout = io::stdout().lock();
    skirmish::print_binary_info(&mut stdout)?;

    let input = fs::read_to_string(&config.input)
        .with_context(|| format!("failed to open input file: {}", config.input.display()))?;
    let board = Board::from_text(&input)
        .with_context(|| format!("failed to parse board from {}", config.input.display()))?;

    let mut game = Game::new(
        board,
        config.white.build(config.seed),
        config.black.build(config.seed.map(|seed| seed.wrapping_add(1))),
        config.starting_color,
        GameConfig {
            max_moves: config.max_moves,
            figurines: config.figurines,
        },
    );
    let _ = game.play(&mut stdout)?;
    Ok(())
}
