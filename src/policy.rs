//! Decision policies choose the next move for a side. They only read the board
//! through its public move generation API and never mutate it: the chosen
//! move is applied by the caller.

use itertools::Itertools;
use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::chess::board::Board;
use crate::chess::core::{Color, Move};

/// Chooses a move for `color` on the given board.
pub trait Policy {
    /// Identifier of the policy for diagnostics.
    fn name(&self) -> &'static str;

    /// Returns one of the moves generated by `board` for `color`, or `None`
    /// if there are no candidate moves.
    fn select_move(&mut self, board: &Board, color: Color) -> Option<Move>;
}

fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Picks a uniformly random move among all capturing and non-capturing
/// candidates.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Creates the policy. The same seed produces the same sequence of
    /// choices; `None` seeds from the operating system.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: rng_from_seed(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        board.generate_moves(color).choose(&mut self.rng).copied()
    }
}

/// Looks one ply ahead: tries every candidate move on a copy of the board and
/// picks the one that leaves the side with the least material relative to the
/// opponent. A move after which the opponent is done (no pieces or no moves)
/// hands the opponent the win and is only played when nothing else is left.
/// Ties are broken at random.
#[derive(Debug)]
pub struct OneStepAheadPolicy {
    rng: StdRng,
}

impl OneStepAheadPolicy {
    /// Creates the policy. The seed only affects tie-breaking.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: rng_from_seed(seed),
        }
    }

    fn score(board: &Board, color: Color, candidate: &Move) -> i64 {
        let mut next = board.clone();
        next.make_move(candidate);
        if next.game_over(color.opponent()) {
            return i64::MIN;
        }
        i64::from(next.material(color.opponent())) - i64::from(next.material(color))
    }
}

impl Policy for OneStepAheadPolicy {
    fn name(&self) -> &'static str {
        "onestep"
    }

    fn select_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        let moves = board.generate_moves(color);
        let best = moves
            .iter()
            .max_set_by_key(|candidate| Self::score(board, color, candidate));
        trace!(
            "{} best of {} candidate moves for {color}",
            best.len(),
            moves.len()
        );
        best.choose(&mut self.rng).map(|&&best| best)
    }
}

/// Policies available from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum PolicyKind {
    /// [`RandomPolicy`].
    Random,
    /// [`OneStepAheadPolicy`].
    #[value(name = "onestep")]
    OneStep,
}

impl PolicyKind {
    /// Instantiates the policy.
    #[must_use]
    pub fn build(self, seed: Option<u64>) -> Box<dyn Policy> {
        match self {
            Self::Random => Box::new(RandomPolicy::new(seed)),
            Self::OneStep => Box::new(OneStepAheadPolicy::new(seed)),
        }
    }
}
