//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};
use std::ops::Not;
use std::str::FromStr;

use anyhow::bail;

use crate::chess::board::PieceId;
use crate::chess::piece::Piece;

/// Represents a transition of a single piece produced by the move generator.
/// A move is the only way the game mutates
/// [`crate::chess::board::Board`].
///
/// The moving piece is referenced by its [`PieceId`] handle, which stays valid
/// (and never points to a different piece) for the lifetime of the board. A
/// pawn arriving on its farthest row carries the piece it will be replaced
/// with.
///
/// Absence of a move (the side has nothing to play) is expressed as
/// `Option::<Move>::None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub(super) from: Square,
    pub(super) to: Square,
    pub(super) piece: PieceId,
    pub(super) promotion: Option<Piece>,
}

impl Move {
    /// Creates a move of `piece` from `from` to `to`. The caller is responsible
    /// for `from` matching the current location of the piece.
    #[must_use]
    pub const fn new(from: Square, to: Square, piece: PieceId, promotion: Option<Piece>) -> Self {
        Self {
            from,
            to,
            piece,
            promotion,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Handle of the moving piece.
    #[must_use]
    pub const fn piece(&self) -> PieceId {
        self.piece
    }

    /// The piece that replaces the moving pawn once the move is made.
    #[must_use]
    pub const fn promotion(&self) -> Option<Piece> {
        self.promotion
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "from {} to {}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "={}", promotion.kind())?;
        }
        Ok(())
    }
}

/// Location on the board. Row 0 corresponds to the first line of the textual
/// board representation, column 0 to the first character of a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    #[allow(missing_docs)]
    pub row: usize,
    #[allow(missing_docs)]
    pub col: usize,
}

impl Square {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offsets the square by `(rows, cols)`. Returns `None` if either
    /// coordinate becomes negative; the upper bound is checked by the board.
    #[must_use]
    pub const fn offset(self, (rows, cols): (isize, isize)) -> Option<Self> {
        match (
            self.row.checked_add_signed(rows),
            self.col.checked_add_signed(cols),
        ) {
            (Some(row), Some(col)) => Some(Self { row, col }),
            _ => None,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// The game is played between two sides. White is written in uppercase in the
/// board text and advances towards row 0; Black is written in lowercase and
/// advances towards the last row.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row delta of a pawn push.
    pub(super) const fn forward(self) -> isize {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl TryFrom<&str> for Color {
    type Error = anyhow::Error;

    fn try_from(color: &str) -> anyhow::Result<Self> {
        match color.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Self::White),
            "black" | "b" => Ok(Self::Black),
            _ => bail!("color should be 'white' or 'black', got '{color}'"),
        }
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(color: &str) -> anyhow::Result<Self> {
        Self::try_from(color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match &self {
            Self::White => "White",
            Self::Black => "Black",
        })
    }
}

/// Standard [chess pieces]. The set is closed: movement geometry of every
/// kind is fixed by the rules, see [`crate::chess::piece`].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Material value used by the policies to compare positions. The king has
    /// no special status in this game and can be captured like any other
    /// piece, so it gets its usual "fighting" value.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Self::King => 4,
            Self::Queen => 9,
            Self::Rook => 5,
            Self::Bishop | Self::Knight => 3,
            Self::Pawn => 1,
        }
    }

    /// Uppercase letter of the piece in the board text.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Rook => 'R',
            Self::Bishop => 'B',
            Self::Knight => 'N',
            Self::Pawn => 'P',
        }
    }

    /// Parses the piece kind from its letter regardless of the case.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'K' => Some(Self::King),
            'Q' => Some(Self::Queen),
            'R' => Some(Self::Rook),
            'B' => Some(Self::Bishop),
            'N' => Some(Self::Knight),
            'P' => Some(Self::Pawn),
            _ => None,
        }
    }
}

impl From<Promotion> for PieceKind {
    fn from(promotion: Promotion) -> Self {
        match promotion {
            Promotion::Queen => Self::Queen,
            Promotion::Rook => Self::Rook,
            Promotion::Bishop => Self::Bishop,
            Promotion::Knight => Self::Knight,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.symbol())
    }
}

/// A pawn can be promoted to a queen, rook, bishop or a knight.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    /// All promotion options, most valuable first.
    pub const ALL: [Self; 4] = [Self::Queen, Self::Rook, Self::Bishop, Self::Knight];
}

/// Directions on the board from the perspective of the first text line being
/// at the top.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Right,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Direction {
    /// Rook lines.
    pub const ORTHOGONAL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];
    /// Bishop lines.
    pub const DIAGONAL: [Self; 4] = [
        Self::UpLeft,
        Self::UpRight,
        Self::DownLeft,
        Self::DownRight,
    ];
    /// Queen and king lines.
    pub const ALL: [Self; 8] = [
        Self::UpLeft,
        Self::Up,
        Self::UpRight,
        Self::Right,
        Self::Left,
        Self::DownLeft,
        Self::Down,
        Self::DownRight,
    ];

    /// `(row, col)` delta of a single step.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::UpLeft => (-1, -1),
            Self::Up => (-1, 0),
            Self::UpRight => (-1, 1),
            Self::Right => (0, 1),
            Self::Left => (0, -1),
            Self::DownLeft => (1, -1),
            Self::Down => (1, 0),
            Self::DownRight => (1, 1),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::UpLeft => Self::DownRight,
            Self::Up => Self::Down,
            Self::UpRight => Self::DownLeft,
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::DownLeft => Self::UpRight,
            Self::Down => Self::Up,
            Self::DownRight => Self::UpLeft,
        }
    }
}
