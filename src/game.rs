//! The game loop: the sides alternate, each asking its policy for a move,
//! until one of them is done or the move limit is reached.
//!
//! This is a losing game: the side that runs out of pieces or moves first
//! wins.

use std::fmt;
use std::io::Write;

use log::{debug, info};

use crate::chess::board::Board;
use crate::chess::core::Color;
use crate::policy::Policy;

/// The game is stopped after this many moves (of both sides combined) unless
/// configured otherwise.
pub const DEFAULT_MAX_MOVES: usize = 1000;

/// Game loop parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Upper bound on the number of moves made by both sides combined.
    pub max_moves: usize,
    /// Print the board with Unicode figurines instead of letters.
    pub figurines: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_moves: DEFAULT_MAX_MOVES,
            figurines: false,
        }
    }
}

/// How the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The winner ran out of pieces or moves on its turn.
    Win(Color),
    /// The move limit was reached first.
    MoveLimit,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win(color) => write!(f, "{color} wins!"),
            Self::MoveLimit => write!(f, "Draw: Maximum number of moves reached."),
        }
    }
}

/// A single game between two policies.
pub struct Game {
    board: Board,
    white: Box<dyn Policy>,
    black: Box<dyn Policy>,
    to_move: Color,
    moves_played: usize,
    config: GameConfig,
}

impl Game {
    /// Sets up the game: `to_move` makes the first move.
    #[must_use]
    pub fn new(
        board: Board,
        white: Box<dyn Policy>,
        black: Box<dyn Policy>,
        to_move: Color,
        config: GameConfig,
    ) -> Self {
        Self {
            board,
            white,
            black,
            to_move,
            moves_played: 0,
            config,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Side that makes the next move.
    #[must_use]
    pub const fn to_move(&self) -> Color {
        self.to_move
    }

    /// Number of moves made so far by both sides.
    #[must_use]
    pub const fn moves_played(&self) -> usize {
        self.moves_played
    }

    fn write_board(&self, output: &mut impl Write) -> anyhow::Result<()> {
        if self.config.figurines {
            write!(output, "{:#}", self.board)?;
        } else {
            write!(output, "{}", self.board)?;
        }
        writeln!(
            output,
            "White pieces: {}",
            self.board.piece_list(Color::White)
        )?;
        writeln!(
            output,
            "Black pieces: {}",
            self.board.piece_list(Color::Black)
        )?;
        Ok(())
    }

    /// Runs the game to completion, writing the transcript (moves and boards
    /// after each of them) to `output`.
    ///
    /// # Errors
    ///
    /// Propagates failures of the writer.
    pub fn play(&mut self, output: &mut impl Write) -> anyhow::Result<Outcome> {
        info!(
            "Starting {}x{} game: {} moves first, white plays {}, black plays {}",
            self.board.rows(),
            self.board.cols(),
            self.to_move,
            self.white.name(),
            self.black.name()
        );
        writeln!(output, "Starting board configuration:")?;
        self.write_board(output)?;
        loop {
            let color = self.to_move;
            let policy = match color {
                Color::White => &mut self.white,
                Color::Black => &mut self.black,
            };
            let next_move = policy.select_move(&self.board, color);
            match &next_move {
                Some(next_move) => writeln!(output, "{next_move}")?,
                None => writeln!(output, "{color} has no moves")?,
            }
            if self.moves_played >= self.config.max_moves || self.board.game_over(color) {
                break;
            }
            let Some(next_move) = next_move else {
                break;
            };
            debug!(
                "Move {}: {color} ({}) plays {next_move}",
                self.moves_played + 1,
                policy.name()
            );
            self.board.make_move(&next_move);
            writeln!(output)?;
            writeln!(output, "Move by {color}:")?;
            self.write_board(output)?;
            self.to_move = !color;
            self.moves_played += 1;
        }
        let outcome = if self.moves_played >= self.config.max_moves {
            Outcome::MoveLimit
        } else {
            Outcome::Win(self.to_move)
        };
        info!("Game over after {} moves: {outcome}", self.moves_played);
        writeln!(output, "{outcome}")?;
        Ok(outcome)
    }
}
