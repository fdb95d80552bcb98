//! Chess primitives commonly used within [`crate::chess`]: colors, piece kinds
//! and the two views of a board square.
//!
//! A square has two representations:
//!
//! - [`Square`] is the human-facing algebraic coordinate (file letter 'a'-'h'
//!   and rank number 1-8), e.g. "e4".
//! - [`Position`] is the internal zero-based (row, column) index into the
//!   [`crate::chess::grid::Grid`]. Row 0 is the eighth rank (the top of the
//!   board as it is printed), column 0 is file 'a'.
//!
//! The mapping between the two is `row = 8 - rank` and `column = file - 'a'`.

use std::fmt::{self, Write};
use std::ops::Not;

use itertools::Itertools;

use crate::chess::error::MatchError;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// Board squares: from left to right, from bottom to the top:
///
/// ```
/// use rookery::chess::core::Square;
///
/// assert_eq!(Square::A1 as u8, 0);
/// assert_eq!(Square::E1 as u8, 4);
/// assert_eq!(Square::H1 as u8, 7);
/// assert_eq!(Square::A4 as u8, 8 * 3);
/// assert_eq!(Square::H8 as u8, 63);
/// ```
///
/// Square is a compact representation using only one byte.
///
/// ```
/// use rookery::chess::core::Square;
///
/// assert_eq!(std::mem::size_of::<Square>(), 1);
/// ```
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter, strum::FromRepr)]
#[rustfmt::skip]
#[allow(missing_docs)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub fn new(file: File, rank: Rank) -> Self {
        match Self::from_repr(file as u8 + (rank as u8) * BOARD_WIDTH) {
            Some(square) => square,
            None => unreachable!("file and rank are always within the board"),
        }
    }

    /// Creates a square from its algebraic coordinates: file letter and rank
    /// number.
    ///
    /// ```
    /// use rookery::chess::core::Square;
    ///
    /// assert_eq!(Square::from_algebraic('c', 2).unwrap(), Square::C2);
    /// assert!(Square::from_algebraic('i', 2).is_err());
    /// assert!(Square::from_algebraic('a', 0).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidCoordinate`] if the file is not within
    /// 'a'..='h' or the rank is not within 1..=8.
    pub fn from_algebraic(file: char, rank: u8) -> Result<Self, MatchError> {
        let invalid = || MatchError::InvalidCoordinate(format!("{file}{rank}"));
        let file = File::try_from(file).map_err(|_| invalid())?;
        let rank = match rank {
            1..=8 => Rank::from_repr(rank - 1).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };
        Ok(Self::new(file, rank))
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub fn file(self) -> File {
        match File::from_repr(self as u8 % BOARD_WIDTH) {
            Some(file) => file,
            None => unreachable!("square index modulo board width is a valid file"),
        }
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub fn rank(self) -> Rank {
        match Rank::from_repr(self as u8 / BOARD_WIDTH) {
            Some(rank) => rank,
            None => unreachable!("square index divided by board width is a valid rank"),
        }
    }

    /// Converts algebraic coordinates to the grid indices.
    ///
    /// ```
    /// use rookery::chess::core::{Position, Square};
    ///
    /// assert_eq!(Square::A8.position(), Position::new(0, 0));
    /// assert_eq!(Square::H1.position(), Position::new(7, 7));
    /// assert_eq!(Square::C2.position(), Position::new(6, 2));
    /// ```
    #[must_use]
    pub const fn position(self) -> Position {
        let index = self as u8;
        Position {
            row: (BOARD_WIDTH - 1 - index / BOARD_WIDTH) as i8,
            column: (index % BOARD_WIDTH) as i8,
        }
    }
}

impl TryFrom<Position> for Square {
    type Error = MatchError;

    /// Converts grid indices back to algebraic coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidCoordinate`] if the position is outside of
    /// the board.
    fn try_from(position: Position) -> Result<Self, MatchError> {
        if !position.is_on_board() {
            return Err(MatchError::InvalidCoordinate(position.to_string()));
        }
        let (Ok(row), Ok(column)) = (u8::try_from(position.row), u8::try_from(position.column))
        else {
            return Err(MatchError::InvalidCoordinate(position.to_string()));
        };
        let square = (BOARD_WIDTH - 1 - row) * BOARD_WIDTH + column;
        Self::from_repr(square).ok_or_else(|| MatchError::InvalidCoordinate(position.to_string()))
    }
}

impl TryFrom<&str> for Square {
    type Error = MatchError;

    /// Parses algebraic square notation (e.g. "e4"). Surrounding whitespace is
    /// ignored and the file letter is case-insensitive.
    fn try_from(square: &str) -> Result<Self, MatchError> {
        let trimmed = square.trim();
        let Some((file, rank)) = trimmed.chars().collect_tuple() else {
            return Err(MatchError::InvalidCoordinate(trimmed.to_string()));
        };
        let Some(rank) = rank.to_digit(10).and_then(|digit| u8::try_from(digit).ok()) else {
            return Err(MatchError::InvalidCoordinate(trimmed.to_string()));
        };
        Self::from_algebraic(file.to_ascii_lowercase(), rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Represents a column (vertical row) of the chessboard. In chess notation, it
/// is normally represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter, strum::FromRepr)]
#[allow(missing_docs)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = MatchError;

    fn try_from(file: char) -> Result<Self, MatchError> {
        match file {
            'a'..='h' => Self::from_repr(file as u8 - b'a')
                .ok_or_else(|| MatchError::InvalidCoordinate(file.to_string())),
            _ => Err(MatchError::InvalidCoordinate(file.to_string())),
        }
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter, strum::FromRepr)]
#[allow(missing_docs)]
pub enum Rank {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// Zero-based (row, column) index into the grid. Row 0 is the eighth rank.
///
/// Positions are signed so that stepping off the board while walking rays
/// produces a representable (but not on-board) value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    #[allow(missing_docs)]
    pub row: i8,
    #[allow(missing_docs)]
    pub column: i8,
}

impl Position {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(row: i8, column: i8) -> Self {
        Self { row, column }
    }

    /// Returns true if the position addresses one of the 64 cells.
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        self.row >= 0
            && self.row < BOARD_WIDTH as i8
            && self.column >= 0
            && self.column < BOARD_WIDTH as i8
    }

    /// Shifts the position by the given (row, column) offset.
    #[must_use]
    pub const fn offset(self, rows: i8, columns: i8) -> Self {
        Self::new(self.row + rows, self.column + columns)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A game of chess is played between two players: White (having the advantage
/// of the first turn) and Black.
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

    /// Row delta of a single pawn step for this color on the grid. White pawns
    /// walk towards row 0 (the eighth rank).
    #[must_use]
    pub(super) const fn forward(self) -> i8 {
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

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::White => "White",
            Self::Black => "Black",
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        })
    }
}

/// Represents a specific piece owned by a player, without its whereabouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub color: Color,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match (&self.color, &self.kind) {
            // White player: uppercase symbols.
            (Color::White, PieceKind::King) => 'K',
            (Color::White, PieceKind::Queen) => 'Q',
            (Color::White, PieceKind::Rook) => 'R',
            (Color::White, PieceKind::Bishop) => 'B',
            (Color::White, PieceKind::Knight) => 'N',
            (Color::White, PieceKind::Pawn) => 'P',
            // Black player: lowercase symbols.
            (Color::Black, PieceKind::King) => 'k',
            (Color::Black, PieceKind::Queen) => 'q',
            (Color::Black, PieceKind::Rook) => 'r',
            (Color::Black, PieceKind::Bishop) => 'b',
            (Color::Black, PieceKind::Knight) => 'n',
            (Color::Black, PieceKind::Pawn) => 'p',
        })
    }
}
