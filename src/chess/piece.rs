//! Pieces and their movement geometry.
//!
//! Every piece computes two disjoint candidate sets from its own location and
//! color against the current board occupancy:
//!
//! - *capturing* moves land on a square occupied by an opponent piece that is
//!   not shielded by an intervening piece;
//! - *non-capturing* moves land on an empty square.
//!
//! | Kind   | Reach                                   | Blocking                 |
//! | ------ | --------------------------------------- | ------------------------ |
//! | King   | 8 adjacent squares                      | n/a                      |
//! | Queen  | 8 directions, unbounded                 | first occupied square    |
//! | Rook   | 4 orthogonal directions, unbounded      | first occupied square    |
//! | Bishop | 4 diagonal directions, unbounded        | first occupied square    |
//! | Knight | 8 L-shaped jumps                        | never blocked            |
//! | Pawn   | 1 (or 2 from the start) forward, 1 diagonal capture | color-dependent direction |
//!
//! Candidates outside the board are silently dropped.

use std::fmt;

use arrayvec::ArrayVec;

use crate::chess::board::{Board, PieceId};
use crate::chess::core::{Color, Direction, Move, PieceKind, Promotion, Square};

const KNIGHT_JUMPS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_STEPS: [(isize, isize); 8] = [
    Direction::UpLeft.delta(),
    Direction::Up.delta(),
    Direction::UpRight.delta(),
    Direction::Right.delta(),
    Direction::Left.delta(),
    Direction::DownLeft.delta(),
    Direction::Down.delta(),
    Direction::DownRight.delta(),
];

/// Which of the two disjoint candidate sets is being generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Targets {
    Capturing,
    NonCapturing,
}

/// A piece owned by one of the sides, placed on a specific square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    square: Square,
}

impl Piece {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            kind,
            color,
            square,
        }
    }

    /// Creates a piece from its letter in the board text: uppercase letters
    /// are White, lowercase are Black. Returns `None` for anything else.
    #[must_use]
    pub const fn from_symbol(symbol: char, square: Square) -> Option<Self> {
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        match PieceKind::from_symbol(symbol) {
            Some(kind) => Some(Self::new(kind, color, square)),
            None => None,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn square(&self) -> Square {
        self.square
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn row(&self) -> usize {
        self.square.row
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn col(&self) -> usize {
        self.square.col
    }

    pub(super) fn set_square(&mut self, square: Square) {
        self.square = square;
    }

    /// ASCII letter used in the board text and diagnostics: uppercase for
    /// White, lowercase for Black.
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self.color {
            Color::White => self.kind.symbol(),
            Color::Black => self.kind.symbol().to_ascii_lowercase(),
        }
    }

    /// Unicode chess figurine for human-readable output.
    #[must_use]
    pub const fn figurine(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }

    /// Moves landing on opponent pieces. `id` is the handle of this piece on
    /// `board`.
    #[must_use]
    pub fn capturing_moves(&self, id: PieceId, board: &Board) -> Vec<Move> {
        self.generate(id, board, Targets::Capturing)
    }

    /// Moves landing on empty squares. `id` is the handle of this piece on
    /// `board`.
    #[must_use]
    pub fn non_capturing_moves(&self, id: PieceId, board: &Board) -> Vec<Move> {
        self.generate(id, board, Targets::NonCapturing)
    }

    fn generate(&self, id: PieceId, board: &Board, targets: Targets) -> Vec<Move> {
        let mut moves = Vec::new();
        match self.kind {
            PieceKind::King => self.leap(id, board, &KING_STEPS, targets, &mut moves),
            PieceKind::Knight => self.leap(id, board, &KNIGHT_JUMPS, targets, &mut moves),
            PieceKind::Queen => self.slide(id, board, &Direction::ALL, targets, &mut moves),
            PieceKind::Rook => self.slide(id, board, &Direction::ORTHOGONAL, targets, &mut moves),
            PieceKind::Bishop => self.slide(id, board, &Direction::DIAGONAL, targets, &mut moves),
            PieceKind::Pawn => match targets {
                Targets::Capturing => self.pawn_captures(id, board, &mut moves),
                Targets::NonCapturing => self.pawn_pushes(id, board, &mut moves),
            },
        }
        moves
    }

    /// Checks whether landing on `to` belongs to the requested candidate set.
    fn accepts(&self, board: &Board, to: Square, targets: Targets) -> bool {
        match (board.piece_at(to), targets) {
            (None, Targets::NonCapturing) => true,
            (Some(occupant), Targets::Capturing) => occupant.color != self.color,
            _ => false,
        }
    }

    fn leap(
        &self,
        id: PieceId,
        board: &Board,
        offsets: &[(isize, isize); 8],
        targets: Targets,
        moves: &mut Vec<Move>,
    ) {
        let destinations: ArrayVec<Square, 8> = offsets
            .iter()
            .filter_map(|&delta| board.shift(self.square, delta))
            .filter(|&to| self.accepts(board, to, targets))
            .collect();
        moves.extend(
            destinations
                .into_iter()
                .map(|to| Move::new(self.square, to, id, None)),
        );
    }

    fn slide(
        &self,
        id: PieceId,
        board: &Board,
        directions: &[Direction],
        targets: Targets,
        moves: &mut Vec<Move>,
    ) {
        for direction in directions {
            let mut current = self.square;
            while let Some(to) = board.shift(current, direction.delta()) {
                match board.piece_at(to) {
                    None => {
                        if targets == Targets::NonCapturing {
                            moves.push(Move::new(self.square, to, id, None));
                        }
                        current = to;
                    },
                    // The ray stops at the first occupied square.
                    Some(occupant) => {
                        if targets == Targets::Capturing && occupant.color != self.color {
                            moves.push(Move::new(self.square, to, id, None));
                        }
                        break;
                    },
                }
            }
        }
    }

    fn pawn_pushes(&self, id: PieceId, board: &Board, moves: &mut Vec<Move>) {
        let forward = self.color.forward();
        let Some(single) = board.shift(self.square, (forward, 0)) else {
            return;
        };
        if board.piece_at(single).is_some() {
            return;
        }
        self.push_pawn_move(id, board, single, moves);
        if Some(self.row()) != board.pawn_starting_row(self.color) {
            return;
        }
        if let Some(double) = board.shift(single, (forward, 0)) {
            if board.piece_at(double).is_none() {
                self.push_pawn_move(id, board, double, moves);
            }
        }
    }

    fn pawn_captures(&self, id: PieceId, board: &Board, moves: &mut Vec<Move>) {
        let forward = self.color.forward();
        for side in [-1, 1] {
            if let Some(to) = board.shift(self.square, (forward, side)) {
                if self.accepts(board, to, Targets::Capturing) {
                    self.push_pawn_move(id, board, to, moves);
                }
            }
        }
    }

    /// Reaching the farthest row turns the move into one promoting move per
    /// replacement kind.
    fn push_pawn_move(&self, id: PieceId, board: &Board, to: Square, moves: &mut Vec<Move>) {
        if to.row != board.promotion_row(self.color) {
            moves.push(Move::new(self.square, to, id, None));
            return;
        }
        for promotion in Promotion::ALL {
            let replacement = Self::new(promotion.into(), self.color, to);
            moves.push(Move::new(self.square, to, id, Some(replacement)));
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    use super::*;

    fn setup(input: &str) -> Board {
        Board::from_text(input).unwrap_or_else(|e| panic!("valid board {input:?}: {e}"))
    }

    /// Destinations of the moves made by the piece on `square`, sorted.
    fn destinations(board: &Board, square: Square, targets: Targets) -> Vec<(usize, usize)> {
        let id = board.id_at(square).expect("piece should be present");
        let piece = board.piece_at(square).expect("piece should be present");
        let moves = match targets {
            Targets::Capturing => piece.capturing_moves(id, board),
            Targets::NonCapturing => piece.non_capturing_moves(id, board),
        };
        for m in &moves {
            assert_eq!(m.from(), square);
            assert_eq!(m.piece(), id);
        }
        moves
            .iter()
            .map(|m| (m.to().row, m.to().col))
            .sorted()
            .dedup()
            .collect()
    }

    #[test]
    fn king_steps() {
        let board = setup("...\n.K.\n...");
        assert_eq!(
            destinations(&board, Square::new(1, 1), Targets::NonCapturing),
            vec![
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 0),
                (1, 2),
                (2, 0),
                (2, 1),
                (2, 2)
            ]
        );
        // Corner: only 3 squares are on the board.
        let board = setup("K..\n...\n...");
        assert_eq!(
            destinations(&board, Square::new(0, 0), Targets::NonCapturing),
            vec![(0, 1), (1, 0), (1, 1)]
        );
    }

    #[test]
    fn king_captures_only_opponents() {
        let board = setup("pP.\n.K.\n..n");
        assert_eq!(
            destinations(&board, Square::new(1, 1), Targets::Capturing),
            vec![(0, 0), (2, 2)]
        );
        assert_eq!(
            destinations(&board, Square::new(1, 1), Targets::NonCapturing),
            vec![(0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]
        );
    }

    #[test]
    fn knight_jumps_over_pieces() {
        let board = setup(".....\n.PPP.\n.PNP.\n.PPp.\n.....");
        assert_eq!(
            destinations(&board, Square::new(2, 2), Targets::NonCapturing),
            vec![
                (0, 1),
                (0, 3),
                (1, 0),
                (1, 4),
                (3, 0),
                (3, 4),
                (4, 1),
                (4, 3)
            ]
        );
        assert!(destinations(&board, Square::new(2, 2), Targets::Capturing).is_empty());
        let board = setup("p...\n....\n.N..");
        assert_eq!(
            destinations(&board, Square::new(2, 1), Targets::Capturing),
            vec![(0, 0)]
        );
        assert_eq!(
            destinations(&board, Square::new(2, 1), Targets::NonCapturing),
            vec![(0, 2), (1, 3)]
        );
    }

    #[test]
    fn rook_stops_at_first_occupied_square() {
        let board = setup("..p..\n.....\nP.R.r\n.....\n..P..");
        assert_eq!(
            destinations(&board, Square::new(2, 2), Targets::Capturing),
            vec![(0, 2), (2, 4)]
        );
        assert_eq!(
            destinations(&board, Square::new(2, 2), Targets::NonCapturing),
            vec![(1, 2), (2, 1), (2, 3), (3, 2)]
        );
    }

    #[test]
    fn bishop_diagonals() {
        let board = setup("r...b\n.....\n..B..\n...P.\n.....");
        assert_eq!(
            destinations(&board, Square::new(2, 2), Targets::Capturing),
            vec![(0, 0), (0, 4)]
        );
        assert_eq!(
            destinations(&board, Square::new(2, 2), Targets::NonCapturing),
            vec![(1, 1), (1, 3), (3, 1), (4, 0)]
        );
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let board = setup(".....\n.....\n..q..\n.....\n.....");
        let quiet = destinations(&board, Square::new(2, 2), Targets::NonCapturing);
        assert_eq!(quiet.len(), 16);
        let board = setup("..R..\n.....\n..q..\n.n...\nN....");
        assert_eq!(
            destinations(&board, Square::new(2, 2), Targets::Capturing),
            vec![(0, 2)]
        );
    }

    #[test]
    fn pawn_pushes() {
        // White pawn on its starting row (second to last) can advance twice.
        let board = setup("....\n....\n....\n.P..\n....");
        assert_eq!(
            destinations(&board, Square::new(3, 1), Targets::NonCapturing),
            vec![(1, 1), (2, 1)]
        );
        // Black pawn on its starting row (second).
        let board = setup("....\n..p.\n....\n....\n....");
        assert_eq!(
            destinations(&board, Square::new(1, 2), Targets::NonCapturing),
            vec![(2, 2), (3, 2)]
        );
        // Outside of the starting row only a single step is allowed.
        let board = setup("....\n....\n.P..\n....\n....");
        assert_eq!(
            destinations(&board, Square::new(2, 1), Targets::NonCapturing),
            vec![(1, 1)]
        );
    }

    #[test]
    fn blocked_pawn() {
        let board = setup("....\n....\n.n..\n.P..\n....");
        assert!(destinations(&board, Square::new(3, 1), Targets::NonCapturing).is_empty());
        // The double step requires both squares to be empty.
        let board = setup("....\n.n..\n....\n.P..\n....");
        assert_eq!(
            destinations(&board, Square::new(3, 1), Targets::NonCapturing),
            vec![(2, 1)]
        );
    }

    #[test]
    fn pawn_captures_diagonally_forward() {
        let board = setup(".....\nn.r..\n.P...\n..b..");
        assert_eq!(
            destinations(&board, Square::new(2, 1), Targets::Capturing),
            vec![(1, 0), (1, 2)]
        );
        let board = setup("..p..\n.R.N.\n.....");
        assert_eq!(
            destinations(&board, Square::new(0, 2), Targets::Capturing),
            vec![(1, 1), (1, 3)]
        );
    }

    #[test]
    fn promotion_moves() {
        let board = setup("...\nP..\n...");
        let id = board.id_at(Square::new(1, 0)).unwrap();
        let pawn = board.piece(id).unwrap();
        let moves = pawn.non_capturing_moves(id, &board);
        assert_eq!(moves.len(), Promotion::ALL.len());
        assert_eq!(
            moves
                .iter()
                .map(|m| m.promotion().unwrap().kind())
                .collect::<Vec<_>>(),
            vec![
                PieceKind::Queen,
                PieceKind::Rook,
                PieceKind::Bishop,
                PieceKind::Knight
            ]
        );
        for m in &moves {
            let replacement = m.promotion().unwrap();
            assert_eq!(replacement.color(), Color::White);
            assert_eq!(replacement.square(), Square::new(0, 0));
        }
        // Capturing into the farthest row promotes, too.
        let board = setup("...\n..p\n.N.");
        let id = board.id_at(Square::new(1, 2)).unwrap();
        let moves = board.piece(id).unwrap().capturing_moves(id, &board);
        assert_eq!(moves.len(), Promotion::ALL.len());
        assert!(moves.iter().all(|m| m.to() == Square::new(2, 1)));
    }

    #[test]
    fn symbols() {
        let piece = Piece::from_symbol('q', Square::new(0, 0)).unwrap();
        assert_eq!(piece.kind(), PieceKind::Queen);
        assert_eq!(piece.color(), Color::Black);
        assert_eq!(piece.symbol(), 'q');
        assert_eq!(piece.figurine(), '♛');
        assert_eq!(piece.to_string(), "q");
        assert_eq!(
            Piece::from_symbol('N', Square::new(1, 2)),
            Some(Piece::new(PieceKind::Knight, Color::White, Square::new(1, 2)))
        );
        assert_eq!(Piece::from_symbol('.', Square::new(0, 0)), None);
        assert_eq!(Piece::from_symbol('?', Square::new(0, 0)), None);
    }
}
