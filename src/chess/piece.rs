//! Pieces in play and their movement geometry.
//!
//! Every piece the match has ever placed lives in an arena owned by
//! [`crate::chess::game::Match`] and is referred to by its [`PieceId`]. The
//! grid cells only store an [`Occupant`] (the id and the color, which is all
//! the geometry needs to know about a blocker), so pieces never hold a
//! reference to the board: the grid is lent to [`Man::legal_destinations`]
//! read-only for the duration of the query.
//!
//! Legal destinations here are purely geometric: they ignore whose turn it is
//! and whether the move would expose the mover's king. King safety is checked
//! by the match.

use std::fmt;

use crate::chess::core::{Color, Piece, PieceKind, Position, Square};
use crate::chess::grid::Grid;
use crate::chess::squares::SquareSet;

/// (row, column) unit steps of the pieces moving along ranks and files.
const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
/// (row, column) unit steps of the pieces moving along diagonals.
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
/// King steps and queen rays.
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];
const KNIGHT_LEAPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Stable index of a piece in the match arena. Ids are never reused, even
/// after the piece is captured.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(pub(super) u8);

impl PieceId {
    #[must_use]
    pub(super) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Contents of an occupied grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Occupant {
    #[allow(missing_docs)]
    pub id: PieceId,
    #[allow(missing_docs)]
    pub color: Color,
}

/// A piece taking part in the match: what it is, where it stands (or stood
/// when it was captured) and how many times it has moved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Man {
    id: PieceId,
    piece: Piece,
    square: Square,
    move_count: u16,
}

impl Man {
    pub(super) const fn new(id: PieceId, piece: Piece, square: Square) -> Self {
        Self {
            id,
            piece,
            square,
            move_count: 0,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn color(&self) -> Color {
        self.piece.color
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.piece.kind
    }

    /// The square the piece occupies. For a captured piece this is the square
    /// it was captured on.
    #[must_use]
    pub const fn square(&self) -> Square {
        self.square
    }

    /// Number of times the piece has moved.
    #[must_use]
    pub const fn move_count(&self) -> u16 {
        self.move_count
    }

    pub(super) fn relocate(&mut self, to: Square) {
        self.square = to;
        self.move_count = self.move_count.saturating_add(1);
    }

    pub(super) fn restore(&mut self, square: Square, move_count: u16) {
        self.square = square;
        self.move_count = move_count;
    }

    pub(super) const fn occupant(&self) -> Occupant {
        Occupant {
            id: self.id,
            color: self.piece.color,
        }
    }

    /// Calculates every square this piece could move to by its movement rules
    /// alone, i.e. without considering king safety or whose turn it is.
    ///
    /// Sliding pieces stop at the first occupied square and include it only if
    /// it holds an opposing piece. Knights leap over blockers. Pawns advance
    /// straight onto empty squares (two squares on their first move) and
    /// capture one square diagonally forward.
    #[must_use]
    pub fn legal_destinations(&self, grid: &Grid<Occupant>) -> SquareSet {
        let from = self.square.position();
        let color = self.color();
        match self.kind() {
            PieceKind::King => leaps(grid, from, color, &ALL_DIRECTIONS),
            PieceKind::Queen => slides(grid, from, color, &ALL_DIRECTIONS),
            PieceKind::Rook => slides(grid, from, color, &ORTHOGONAL),
            PieceKind::Bishop => slides(grid, from, color, &DIAGONAL),
            PieceKind::Knight => leaps(grid, from, color, &KNIGHT_LEAPS),
            PieceKind::Pawn => pawn_moves(grid, from, color, self.move_count == 0),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn can_move_to(&self, grid: &Grid<Occupant>, target: Square) -> bool {
        self.legal_destinations(grid).contains(target)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn has_any_legal_move(&self, grid: &Grid<Occupant>) -> bool {
        self.legal_destinations(grid).has_any()
    }
}

impl fmt::Display for Man {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.piece)
    }
}

fn is_opponent(grid: &Grid<Occupant>, position: Position, color: Color) -> bool {
    grid.occupant(position)
        .is_some_and(|occupant| occupant.color != color)
}

fn insert(destinations: &mut SquareSet, position: Position) {
    if let Ok(square) = Square::try_from(position) {
        destinations.insert(square);
    }
}

fn slides(
    grid: &Grid<Occupant>,
    from: Position,
    color: Color,
    directions: &[(i8, i8)],
) -> SquareSet {
    let mut destinations = SquareSet::empty();
    for &(rows, columns) in directions {
        let mut next = from.offset(rows, columns);
        while grid.is_in_bounds(next) && !grid.has_piece(next) {
            insert(&mut destinations, next);
            next = next.offset(rows, columns);
        }
        if grid.is_in_bounds(next) && is_opponent(grid, next, color) {
            insert(&mut destinations, next);
        }
    }
    destinations
}

fn leaps(grid: &Grid<Occupant>, from: Position, color: Color, offsets: &[(i8, i8)]) -> SquareSet {
    let mut destinations = SquareSet::empty();
    for &(rows, columns) in offsets {
        let target = from.offset(rows, columns);
        if grid.is_in_bounds(target) && (!grid.has_piece(target) || is_opponent(grid, target, color))
        {
            insert(&mut destinations, target);
        }
    }
    destinations
}

fn pawn_moves(grid: &Grid<Occupant>, from: Position, color: Color, first_move: bool) -> SquareSet {
    let mut destinations = SquareSet::empty();
    let forward = color.forward();
    let single_push = from.offset(forward, 0);
    if grid.is_in_bounds(single_push) && !grid.has_piece(single_push) {
        insert(&mut destinations, single_push);
        let double_push = single_push.offset(forward, 0);
        if first_move && grid.is_in_bounds(double_push) && !grid.has_piece(double_push) {
            insert(&mut destinations, double_push);
        }
    }
    for side in [-1, 1] {
        let capture = from.offset(forward, side);
        if is_opponent(grid, capture, color) {
            insert(&mut destinations, capture);
        }
    }
    destinations
}
