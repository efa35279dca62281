//! The board is the authoritative container of the pieces: it owns them,
//! answers occupancy queries, applies moves and aggregates move generation
//! for a side.
//!
//! Pieces are stored in a slot arena and referenced by [`PieceId`] handles.
//! Slots are never reused within one board: once a piece is captured or
//! promoted its handle becomes stale instead of silently pointing to a
//! different piece. A square-centric index (mailbox) is kept in lockstep with
//! the arena to answer "who is on this square" without scanning all pieces.
//!
//! The textual representation is one line per row, one character per
//! square: `KQRBNP` for White, `kqrbnp` for Black and `.` for an empty square.
//!
//! ```
//! use skirmish::chess::board::Board;
//! use skirmish::chess::core::{Color, Square};
//!
//! let board = Board::from_text(".....\n..K..\n.....\n").unwrap();
//! assert_eq!((board.rows(), board.cols()), (3, 5));
//! assert_eq!(board.piece_at(Square::new(1, 2)).unwrap().color(), Color::White);
//! assert_eq!(board.to_string(), ".....\n..K..\n.....\n");
//! ```

use std::fmt::{self, Write};
use std::str::FromStr;

use itertools::Itertools;
use log::warn;
use thiserror::Error;

use crate::chess::core::{Color, Move, Square};
use crate::chess::piece::Piece;

/// Stable handle of a piece within a specific [`Board`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(usize);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Failures of board construction and placement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// Malformed or empty board text. No partial board is produced.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Coordinates outside of the board: a violation of the caller contract.
    #[error("square ({square}) is out of range for {rows}x{cols} board")]
    OutOfRange {
        #[allow(missing_docs)]
        square: Square,
        #[allow(missing_docs)]
        rows: usize,
        #[allow(missing_docs)]
        cols: usize,
    },
    /// The handle does not refer to a piece on the board (e.g. it was
    /// captured).
    #[error("piece {0} is not on the board")]
    UnknownPiece(PieceId),
}

/// Rectangular board with fixed extents and the pieces placed on it.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Slot arena: the sole owner of the pieces. The order of live slots is
    /// the collection order used by move generation.
    pieces: Vec<Option<Piece>>,
    /// Square-centric index, `row * cols + col` to the occupant handle.
    mailbox: Vec<Option<PieceId>>,
}

impl Board {
    /// Creates an empty board with given extents.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            pieces: Vec::new(),
            mailbox: vec![None; rows * cols],
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Checks whether the square is within the board bounds.
    #[must_use]
    pub const fn contains(&self, square: Square) -> bool {
        square.row < self.rows && square.col < self.cols
    }

    /// Offsets the square by `(rows, cols)` and returns it if it stays on the
    /// board.
    #[must_use]
    pub fn shift(&self, square: Square, delta: (isize, isize)) -> Option<Square> {
        square.offset(delta).filter(|&target| self.contains(target))
    }

    fn index(&self, square: Square) -> usize {
        debug_assert!(self.contains(square));
        square.row * self.cols + square.col
    }

    fn check_bounds(&self, square: Square) -> Result<(), BoardError> {
        if self.contains(square) {
            Ok(())
        } else {
            Err(BoardError::OutOfRange {
                square,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Returns the handle of the unique occupant of the square, if any.
    #[must_use]
    pub fn id_at(&self, square: Square) -> Option<PieceId> {
        if !self.contains(square) {
            return None;
        }
        self.mailbox[self.index(square)]
    }

    /// Returns the unique occupant of the square, if any.
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.id_at(square).and_then(|id| self.piece(id))
    }

    /// Resolves a handle. Returns `None` for pieces that were removed from
    /// the board.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0).and_then(Option::as_ref)
    }

    /// All pieces on the board in collection order.
    pub fn iter(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|piece| (PieceId(index), piece)))
    }

    /// All pieces of the given color in collection order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.iter()
            .map(|(_, piece)| piece)
            .filter(move |piece| piece.color() == color)
    }

    /// Total number of pieces on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Checks whether the board has no pieces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Puts a new piece on the square (or clears it when `piece` is `None`).
    /// The previous occupant, if any, is removed from the board. The stored
    /// coordinates of the piece are updated to `square`.
    ///
    /// # Errors
    ///
    /// [`BoardError::OutOfRange`] if the square is outside of the board.
    pub fn set_piece_at(
        &mut self,
        square: Square,
        piece: Option<Piece>,
    ) -> Result<Option<PieceId>, BoardError> {
        self.check_bounds(square)?;
        if let Some(occupant) = self.id_at(square) {
            self.remove(occupant);
        }
        Ok(piece.map(|mut piece| {
            piece.set_square(square);
            self.insert(piece)
        }))
    }

    /// Re-places a piece that is already on the board. The previous occupant
    /// of the target square, if any, is removed. Placing a piece on the square
    /// it already occupies is a no-op.
    ///
    /// # Errors
    ///
    /// [`BoardError::OutOfRange`] if the square is outside of the board and
    /// [`BoardError::UnknownPiece`] if the handle is stale.
    pub fn place(&mut self, id: PieceId, square: Square) -> Result<(), BoardError> {
        self.check_bounds(square)?;
        if self.piece(id).is_none() {
            return Err(BoardError::UnknownPiece(id));
        }
        match self.id_at(square) {
            Some(occupant) if occupant == id => return Ok(()),
            Some(occupant) => self.remove(occupant),
            None => {},
        }
        self.relocate(id, square);
        Ok(())
    }

    /// Appends the piece to the collection at its own square. The previous
    /// occupant of the square, if any, is removed.
    ///
    /// # Errors
    ///
    /// [`BoardError::OutOfRange`] if the square of the piece is outside of the
    /// board.
    pub fn add_piece(&mut self, piece: Piece) -> Result<PieceId, BoardError> {
        self.check_bounds(piece.square())?;
        if let Some(occupant) = self.id_at(piece.square()) {
            self.remove(occupant);
        }
        Ok(self.insert(piece))
    }

    /// Replaces `old` with `new` (placed at its own square): used for
    /// promotion. The replacement gets a fresh handle at the end of the
    /// collection.
    ///
    /// # Errors
    ///
    /// [`BoardError::OutOfRange`] if the square of `new` is outside of the
    /// board. The board is left untouched in that case.
    pub fn update_piece_lists(
        &mut self,
        old: PieceId,
        new: Piece,
    ) -> Result<PieceId, BoardError> {
        self.check_bounds(new.square())?;
        self.remove(old);
        self.add_piece(new)
    }

    /// Pushes a piece onto a square that is within bounds and empty.
    fn insert(&mut self, piece: Piece) -> PieceId {
        let index = self.index(piece.square());
        debug_assert!(
            self.mailbox[index].is_none(),
            "Can't put piece to already occupied square"
        );
        let id = PieceId(self.pieces.len());
        self.pieces.push(Some(piece));
        self.mailbox[index] = Some(id);
        id
    }

    fn remove(&mut self, id: PieceId) {
        let Some(piece) = self.pieces.get_mut(id.0).and_then(Option::take) else {
            return;
        };
        let index = self.index(piece.square());
        if self.mailbox[index] == Some(id) {
            self.mailbox[index] = None;
        }
    }

    fn relocate(&mut self, id: PieceId, to: Square) {
        let to_index = self.index(to);
        let Some(piece) = self.pieces.get_mut(id.0).and_then(Option::as_mut) else {
            return;
        };
        let from = piece.square();
        piece.set_square(to);
        let from_index = self.index(from);
        if self.mailbox[from_index] == Some(id) {
            self.mailbox[from_index] = None;
        }
        self.mailbox[to_index] = Some(id);
    }

    /// Applies a move produced by this board's own move generation: removes
    /// the occupant of the destination square (capture), then either moves the
    /// piece there or, for promotions, replaces it with the promoted piece.
    ///
    /// The move is not checked for legality. Moves leading outside of the
    /// board or made by a piece that is no longer on it are ignored.
    pub fn make_move(&mut self, next_move: &Move) {
        debug_assert_eq!(
            self.piece(next_move.piece()).map(Piece::square),
            Some(next_move.from()),
            "moving piece should stand on the source square"
        );
        if !self.contains(next_move.to()) || self.piece(next_move.piece()).is_none() {
            warn!("ignoring move {next_move} of {}", next_move.piece());
            return;
        }
        if let Some(captured) = self.id_at(next_move.to()) {
            if captured != next_move.piece() {
                self.remove(captured);
            }
        }
        match next_move.promotion() {
            Some(mut replacement) => {
                replacement.set_square(next_move.to());
                self.remove(next_move.piece());
                let _ = self.insert(replacement);
            },
            None => self.relocate(next_move.piece(), next_move.to()),
        }
    }

    /// Union of the capturing moves of every piece of `color`, in collection
    /// order.
    #[must_use]
    pub fn capturing_moves(&self, color: Color) -> Vec<Move> {
        self.iter()
            .filter(|(_, piece)| piece.color() == color)
            .flat_map(|(id, piece)| piece.capturing_moves(id, self))
            .collect()
    }

    /// Union of the non-capturing moves of every piece of `color`, in
    /// collection order.
    #[must_use]
    pub fn non_capturing_moves(&self, color: Color) -> Vec<Move> {
        self.iter()
            .filter(|(_, piece)| piece.color() == color)
            .flat_map(|(id, piece)| piece.non_capturing_moves(id, self))
            .collect()
    }

    /// All candidate moves of `color`: capturing moves followed by
    /// non-capturing ones.
    #[must_use]
    pub fn generate_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = self.capturing_moves(color);
        moves.extend(self.non_capturing_moves(color));
        moves
    }

    /// Checks whether `color` has no pieces left or no candidate moves. This
    /// is a material/mobility test only: king safety is not considered.
    #[must_use]
    pub fn game_over(&self, color: Color) -> bool {
        if self.pieces(color).next().is_none() {
            return true;
        }
        self.capturing_moves(color).is_empty() && self.non_capturing_moves(color).is_empty()
    }

    /// Sum of the values of all pieces of `color`.
    #[must_use]
    pub fn material(&self, color: Color) -> u32 {
        self.pieces(color).map(|piece| piece.kind().value()).sum()
    }

    /// Space-separated letters of the pieces of `color` in collection order.
    #[must_use]
    pub fn piece_list(&self, color: Color) -> String {
        self.pieces(color).map(Piece::symbol).join(" ")
    }

    /// Row pawns of `color` promote on.
    pub(super) const fn promotion_row(&self, color: Color) -> usize {
        match color {
            Color::White => 0,
            Color::Black => self.rows.saturating_sub(1),
        }
    }

    /// Row pawns of `color` may advance two squares from.
    pub(super) const fn pawn_starting_row(&self, color: Color) -> Option<usize> {
        match color {
            Color::White => self.rows.checked_sub(2),
            Color::Black => Some(1),
        }
    }

    /// Parses the board from its textual representation.
    ///
    /// Lines are consumed until the first blank line or the end of input. The
    /// number of rows is the number of lines read and the number of columns is
    /// the length of the first line. Rows of a different length are accepted
    /// with a warning: missing squares are left empty and characters past the
    /// width of the board are ignored.
    ///
    /// # Errors
    ///
    /// [`BoardError::InvalidInput`] if there are no lines to read or a
    /// character is neither a piece letter nor `.`.
    pub fn from_text(input: &str) -> Result<Self, BoardError> {
        let lines = input
            .lines()
            .take_while(|line| !line.is_empty())
            .collect_vec();
        let Some(first) = lines.first() else {
            return Err(BoardError::InvalidInput(
                "board text is empty".to_string(),
            ));
        };
        let cols = first.chars().count();
        let mut board = Self::new(lines.len(), cols);
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != cols {
                warn!("row {row} has {width} squares, expected {cols}: {line:?}");
            }
            for (col, symbol) in line.chars().take(cols).enumerate() {
                let square = Square::new(row, col);
                let piece = match symbol {
                    '.' => None,
                    _ => Some(Piece::from_symbol(symbol, square).ok_or_else(|| {
                        BoardError::InvalidInput(format!(
                            "unexpected character {symbol:?} at ({square}), expected one of \
                             \"KQRBNPkqrbnp.\""
                        ))
                    })?),
                };
                if let Some(piece) = piece {
                    let _ = board.add_piece(piece)?;
                }
            }
        }
        Ok(board)
    }
}

impl Default for Board {
    /// Empty standard 8x8 board.
    fn default() -> Self {
        Self::new(8, 8)
    }
}

impl TryFrom<&str> for Board {
    type Error = BoardError;

    fn try_from(input: &str) -> Result<Self, BoardError> {
        Self::from_text(input)
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(input: &str) -> Result<Self, BoardError> {
        Self::from_text(input)
    }
}

impl fmt::Display for Board {
    /// Renders the board row by row, one line per row. The alternate form
    /// (`{:#}`) uses Unicode figurines instead of letters; only the default
    /// form can be parsed back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                f.write_char(match self.piece_at(Square::new(row, col)) {
                    Some(piece) if f.alternate() => piece.figurine(),
                    Some(piece) => piece.symbol(),
                    None => '.',
                })?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")?;
        writeln!(f, "White pieces: {}", self.piece_list(Color::White))?;
        writeln!(f, "Black pieces: {}", self.piece_list(Color::Black))?;
        Ok(())
    }
}
