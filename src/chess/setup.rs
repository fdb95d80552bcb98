//! Built-in initial layouts a [`crate::chess::game::Match`] can start from.

use strum::{Display, EnumIter, EnumString};

use crate::chess::core::{Color, Piece, PieceKind, Square};

/// Initial piece placement. White always moves first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Setup {
    /// Kings and rooks only: the white king on d1 surrounded by five rooks
    /// (c1, c2, d2, e2, e1) and the black king on d8 with rooks on c7, d7, e7,
    /// c8 and e8.
    #[default]
    Classic,
    /// The standard starting position of all 32 pieces. Castling, en passant
    /// and promotion are not supported.
    Standard,
}

impl Setup {
    /// Returns the squares and the pieces placed on them, white pieces first.
    #[must_use]
    pub fn layout(self) -> Vec<(Square, Piece)> {
        match self {
            Self::Classic => classic(),
            Self::Standard => standard(),
        }
    }
}

fn classic() -> Vec<(Square, Piece)> {
    let white_rook = Piece::new(Color::White, PieceKind::Rook);
    let black_rook = Piece::new(Color::Black, PieceKind::Rook);
    vec![
        (Square::C2, white_rook),
        (Square::D2, white_rook),
        (Square::E2, white_rook),
        (Square::E1, white_rook),
        (Square::D1, Piece::new(Color::White, PieceKind::King)),
        (Square::C1, white_rook),
        (Square::C7, black_rook),
        (Square::D7, black_rook),
        (Square::E7, black_rook),
        (Square::C8, black_rook),
        (Square::E8, black_rook),
        (Square::D8, Piece::new(Color::Black, PieceKind::King)),
    ]
}

fn standard() -> Vec<(Square, Piece)> {
    const BACKRANK: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    const WHITE_BACKRANK: [Square; 8] = [
        Square::A1,
        Square::B1,
        Square::C1,
        Square::D1,
        Square::E1,
        Square::F1,
        Square::G1,
        Square::H1,
    ];
    const WHITE_PAWNS: [Square; 8] = [
        Square::A2,
        Square::B2,
        Square::C2,
        Square::D2,
        Square::E2,
        Square::F2,
        Square::G2,
        Square::H2,
    ];
    const BLACK_PAWNS: [Square; 8] = [
        Square::A7,
        Square::B7,
        Square::C7,
        Square::D7,
        Square::E7,
        Square::F7,
        Square::G7,
        Square::H7,
    ];
    const BLACK_BACKRANK: [Square; 8] = [
        Square::A8,
        Square::B8,
        Square::C8,
        Square::D8,
        Square::E8,
        Square::F8,
        Square::G8,
        Square::H8,
    ];
    let mut layout = Vec::with_capacity(32);
    for (square, kind) in WHITE_BACKRANK.into_iter().zip(BACKRANK) {
        layout.push((square, Piece::new(Color::White, kind)));
    }
    for square in WHITE_PAWNS {
        layout.push((square, Piece::new(Color::White, PieceKind::Pawn)));
    }
    for square in BLACK_PAWNS {
        layout.push((square, Piece::new(Color::Black, PieceKind::Pawn)));
    }
    for (square, kind) in BLACK_BACKRANK.into_iter().zip(BACKRANK) {
        layout.push((square, Piece::new(Color::Black, kind)));
    }
    layout
}
