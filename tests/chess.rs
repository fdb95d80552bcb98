use pretty_assertions::assert_eq;
use rookery::chess::core::{Color, Piece, PieceKind, Position, Square};
use rookery::chess::error::MatchError;
use rookery::chess::game::Match;
use rookery::chess::setup::Setup;
use rookery::chess::squares::SquareSet;
use strum::IntoEnumIterator;

fn white(kind: PieceKind) -> Piece {
    Piece::new(Color::White, kind)
}

fn black(kind: PieceKind) -> Piece {
    Piece::new(Color::Black, kind)
}

fn setup(active: Color, layout: &[(Square, Piece)]) -> Match {
    Match::from_layout(active, layout).expect("layout is valid")
}

fn play(game: &mut Match, moves: &[(Square, Square)]) {
    for &(from, to) in moves {
        let result = game.perform_move(from, to);
        assert!(result.is_ok(), "{from} -> {to}: {result:?}\n{game:?}");
    }
}

/// Tries every move the side to move has and checks that each one either
/// fails leaving the match intact or advances it by exactly one turn.
fn check_every_move(game: &Match) {
    let movers: Vec<_> = game
        .pieces_on_board()
        .filter(|man| man.color() == game.active_color())
        .map(|man| man.square())
        .collect();
    for from in movers {
        let Ok(destinations) = game.possible_moves(from) else {
            continue;
        };
        for to in destinations {
            let mut next = game.clone();
            match next.perform_move(from, to) {
                Ok(captured) => {
                    assert_eq!(captured, game.piece_at(to));
                    assert_eq!(next.piece_at(to), game.piece_at(from));
                    assert_eq!(next.piece_at(from), None);
                    assert!(!next.in_check(game.active_color()).unwrap());
                    if next.is_checkmate() {
                        assert!(next.is_check());
                        assert_eq!(next.turn(), game.turn());
                        assert_eq!(next.active_color(), game.active_color());
                    } else {
                        assert_eq!(next.turn(), game.turn() + 1);
                        assert_eq!(next.active_color(), !game.active_color());
                    }
                },
                Err(MatchError::SelfCheck { .. }) => assert_eq!(&next, game),
                Err(e) => panic!("{from} -> {to} is geometrically legal, got {e}"),
            }
        }
    }
}

#[test]
fn coordinate_round_trip() {
    for square in Square::iter() {
        let position = square.position();
        let parsed = Square::try_from(square.to_string().as_str()).unwrap();
        assert_eq!(parsed.position(), position);
        assert_eq!(Square::try_from(position), Ok(square));
    }
    assert_eq!(Square::try_from("C2"), Ok(Square::C2));
    assert_eq!(Square::C2.position(), Position::new(6, 2));
    assert!(Square::try_from("a0").is_err());
    assert!(Square::try_from("i1").is_err());
    assert!(Square::try_from("a10").is_err());
    assert!(Square::try_from(Position::new(8, 0)).is_err());
}

#[test]
fn rook_on_open_file() {
    let game = setup(
        Color::White,
        &[
            (Square::C2, white(PieceKind::Rook)),
            (Square::H1, white(PieceKind::King)),
            (Square::H8, black(PieceKind::King)),
        ],
    );
    let moves = game.possible_moves(Square::C2).unwrap();
    assert_eq!(
        moves,
        SquareSet::from_squares(&[
            Square::C1,
            Square::C3,
            Square::C4,
            Square::C5,
            Square::C6,
            Square::C7,
            Square::C8,
            Square::A2,
            Square::B2,
            Square::D2,
            Square::E2,
            Square::F2,
            Square::G2,
            Square::H2,
        ])
    );
    let matrix = moves.to_matrix();
    for row in 0..6 {
        assert!(matrix[row][2], "row {row}");
    }
    assert!(matrix[6][0]);
    assert!(!matrix[6][2]);
}

#[test]
fn rook_in_classic_setup() {
    let game = Match::new(Setup::Classic);
    assert_eq!(
        game.possible_moves(Square::C2),
        Ok(SquareSet::from_squares(&[
            Square::A2,
            Square::B2,
            Square::C3,
            Square::C4,
            Square::C5,
            Square::C6,
            Square::C7,
        ]))
    );
}

#[test]
fn king_step() {
    let mut game = setup(
        Color::White,
        &[
            (Square::D1, white(PieceKind::King)),
            (Square::D8, black(PieceKind::King)),
        ],
    );
    assert_eq!(game.perform_move(Square::D1, Square::D2), Ok(None));
    assert_eq!(game.turn(), 2);
    assert_eq!(game.active_color(), Color::Black);
    assert!(!game.is_check());
    assert!(!game.is_checkmate());
    assert_eq!(game.piece_at(Square::D2), Some(white(PieceKind::King)));
    assert_eq!(game.piece_at(Square::D1), None);
}

#[test]
fn two_rook_mate() {
    let mut game = setup(
        Color::White,
        &[
            (Square::E1, white(PieceKind::King)),
            (Square::H7, white(PieceKind::Rook)),
            (Square::D1, white(PieceKind::Rook)),
            (Square::A8, black(PieceKind::King)),
        ],
    );
    assert_eq!(game.perform_move(Square::D1, Square::D8), Ok(None));
    assert!(game.is_check());
    assert!(game.is_checkmate());
    assert!(game.in_checkmate(Color::Black).unwrap());
    assert_eq!(game.winner(), Some(Color::White));
    assert_eq!(game.turn(), 1);
    assert_eq!(game.active_color(), Color::White);

    let before = game.clone();
    let game_over = Err(MatchError::GameOver {
        winner: Color::White,
    });
    assert_eq!(game.perform_move(Square::A8, Square::B8), game_over.clone());
    assert_eq!(game.perform_move(Square::H7, Square::H6), game_over);
    assert_eq!(
        game.possible_moves(Square::E1),
        Err(MatchError::GameOver {
            winner: Color::White
        })
    );
    assert_eq!(game, before);
}

#[test]
fn check_escaped_by_capture() {
    let mut game = setup(
        Color::White,
        &[
            (Square::E1, white(PieceKind::King)),
            (Square::H7, white(PieceKind::Rook)),
            (Square::D1, white(PieceKind::Rook)),
            (Square::A8, black(PieceKind::King)),
            (Square::F8, black(PieceKind::Rook)),
        ],
    );
    assert_eq!(game.perform_move(Square::D1, Square::D8), Ok(None));
    assert!(game.is_check());
    assert!(!game.is_checkmate());
    assert_eq!(game.turn(), 2);
    assert_eq!(game.active_color(), Color::Black);

    // Everything but taking the rook leaves the king in check.
    assert_eq!(
        game.perform_move(Square::F8, Square::E8),
        Err(MatchError::SelfCheck {
            from: Square::F8,
            to: Square::E8
        })
    );
    assert_eq!(
        game.perform_move(Square::F8, Square::D8),
        Ok(Some(white(PieceKind::Rook)))
    );
    assert!(!game.is_check());
    assert_eq!(game.turn(), 3);
    assert_eq!(
        game.captured_pieces(Color::White)
            .map(|man| man.piece())
            .collect::<Vec<_>>(),
        vec![white(PieceKind::Rook)]
    );
    assert_eq!(game.pieces_on_board().count(), 4);
}

#[test]
fn pinned_rook() {
    let mut game = setup(
        Color::White,
        &[
            (Square::E1, white(PieceKind::King)),
            (Square::E2, white(PieceKind::Rook)),
            (Square::E8, black(PieceKind::Rook)),
            (Square::A8, black(PieceKind::King)),
            (Square::H2, black(PieceKind::Knight)),
        ],
    );
    let before = game.clone();
    // The move is geometrically fine and is highlighted.
    assert!(game.possible_moves(Square::E2).unwrap().contains(Square::A2));
    assert_eq!(
        game.perform_move(Square::E2, Square::A2),
        Err(MatchError::SelfCheck {
            from: Square::E2,
            to: Square::A2
        })
    );
    assert_eq!(game, before);
    // Rolling back a capture puts the captured piece back into play.
    assert_eq!(
        game.perform_move(Square::E2, Square::H2),
        Err(MatchError::SelfCheck {
            from: Square::E2,
            to: Square::H2
        })
    );
    assert_eq!(game, before);
    assert_eq!(game.piece_at(Square::H2), Some(black(PieceKind::Knight)));
    assert_eq!(game.captured_pieces(Color::Black).count(), 0);
    // Moving along the pin is allowed.
    assert_eq!(
        game.perform_move(Square::E2, Square::E8),
        Ok(Some(black(PieceKind::Rook)))
    );
}

#[test]
fn king_can_not_step_into_check() {
    let mut game = setup(
        Color::White,
        &[
            (Square::E1, white(PieceKind::King)),
            (Square::D8, black(PieceKind::Rook)),
            (Square::A8, black(PieceKind::King)),
        ],
    );
    let before = game.clone();
    assert_eq!(
        game.perform_move(Square::E1, Square::D1),
        Err(MatchError::SelfCheck {
            from: Square::E1,
            to: Square::D1
        })
    );
    assert_eq!(game, before);
    assert_eq!(game.perform_move(Square::E1, Square::F1), Ok(None));
}

#[test]
fn source_validation() {
    let mut game = Match::new(Setup::Classic);
    let before = game.clone();
    assert_eq!(
        game.possible_moves(Square::E4),
        Err(MatchError::EmptySource(Square::E4))
    );
    assert_eq!(
        game.possible_moves(Square::D8),
        Err(MatchError::WrongColor {
            square: Square::D8,
            active: Color::White
        })
    );
    // The king is boxed in by its own rooks.
    assert_eq!(
        game.possible_moves(Square::D1),
        Err(MatchError::NoLegalMoves(Square::D1))
    );
    assert_eq!(
        game.perform_move(Square::E4, Square::E5),
        Err(MatchError::EmptySource(Square::E4))
    );
    assert_eq!(
        game.perform_move(Square::C2, Square::D3),
        Err(MatchError::IllegalDestination {
            from: Square::C2,
            to: Square::D3
        })
    );
    assert_eq!(
        game.perform_move(Square::C2, Square::D2),
        Err(MatchError::IllegalDestination {
            from: Square::C2,
            to: Square::D2
        })
    );
    assert_eq!(game, before);
}

#[test]
fn turns_alternate() {
    let mut game = Match::new(Setup::Standard);
    let moves = [
        (Square::A2, Square::A3),
        (Square::H7, Square::H6),
        (Square::G1, Square::F3),
        (Square::B8, Square::C6),
    ];
    for (index, &(from, to)) in moves.iter().enumerate() {
        let turn = game.turn();
        let active = game.active_color();
        assert_eq!(usize::from(turn), index + 1);
        assert_eq!(game.perform_move(from, to), Ok(None));
        assert_eq!(game.turn(), turn + 1);
        assert_eq!(game.active_color(), !active);
    }
    // Pawns only make the double step on their first move.
    assert_eq!(
        game.perform_move(Square::A3, Square::A5),
        Err(MatchError::IllegalDestination {
            from: Square::A3,
            to: Square::A5
        })
    );
    play(&mut game, &[(Square::E2, Square::E4), (Square::E7, Square::E5)]);
    // Blocked head-to-head.
    assert_eq!(
        game.possible_moves(Square::E4),
        Err(MatchError::NoLegalMoves(Square::E4))
    );
    assert_eq!(game.turn(), 7);
}

#[test]
fn scholars_mate() {
    let mut game = Match::new(Setup::Standard);
    play(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::E7, Square::E5),
            (Square::F1, Square::C4),
            (Square::B8, Square::C6),
            (Square::D1, Square::H5),
            (Square::G8, Square::F6),
        ],
    );
    assert_eq!(game.turn(), 7);
    assert!(!game.is_check());
    assert_eq!(
        game.perform_move(Square::H5, Square::F7),
        Ok(Some(black(PieceKind::Pawn)))
    );
    assert!(game.is_check());
    assert!(game.is_checkmate());
    assert_eq!(game.winner(), Some(Color::White));
    assert_eq!(game.turn(), 7);
    assert_eq!(game.active_color(), Color::White);
}

#[test]
fn every_move_is_consistent() {
    check_every_move(&Match::new(Setup::Classic));
    check_every_move(&Match::new(Setup::Standard));

    let mut game = Match::new(Setup::Standard);
    play(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::F7, Square::F6),
            (Square::D2, Square::D4),
            (Square::G7, Square::G5),
        ],
    );
    // One of the moves is a checkmate.
    check_every_move(&game);
    assert_eq!(game.perform_move(Square::D1, Square::H5), Ok(None));
    assert!(game.is_checkmate());

    check_every_move(&setup(
        Color::White,
        &[
            (Square::E1, white(PieceKind::King)),
            (Square::E2, white(PieceKind::Rook)),
            (Square::E8, black(PieceKind::Rook)),
            (Square::A8, black(PieceKind::King)),
            (Square::H2, black(PieceKind::Knight)),
        ],
    ));
    check_every_move(&setup(
        Color::Black,
        &[
            (Square::E1, white(PieceKind::King)),
            (Square::H7, white(PieceKind::Rook)),
            (Square::D8, white(PieceKind::Rook)),
            (Square::A8, black(PieceKind::King)),
            (Square::F8, black(PieceKind::Rook)),
        ],
    ));
}

#[test]
fn checkmate_implies_check() {
    let mut game = Match::new(Setup::Classic);
    for color in [Color::White, Color::Black] {
        assert!(!game.in_check(color).unwrap());
        assert!(!game.in_checkmate(color).unwrap());
    }
    let mated = setup(
        Color::Black,
        &[
            (Square::E1, white(PieceKind::King)),
            (Square::A8, white(PieceKind::Rook)),
            (Square::B7, white(PieceKind::Rook)),
            (Square::H8, black(PieceKind::King)),
        ],
    );
    assert!(mated.is_checkmate());
    assert!(mated.in_check(Color::Black).unwrap());
}

#[test]
fn checkmate_search_leaves_match_intact() {
    // The king and the pawn (its pushes and its capture) are tried before the
    // rook finds the only escape by taking the checking rook.
    let mut game = setup(
        Color::Black,
        &[
            (Square::E1, white(PieceKind::King)),
            (Square::H7, white(PieceKind::Rook)),
            (Square::D8, white(PieceKind::Rook)),
            (Square::H5, white(PieceKind::Knight)),
            (Square::A8, black(PieceKind::King)),
            (Square::G6, black(PieceKind::Pawn)),
            (Square::F8, black(PieceKind::Rook)),
        ],
    );
    assert!(game.is_check());
    assert!(game
        .possible_moves(Square::G6)
        .unwrap()
        .contains(Square::H5));
    assert!(game
        .possible_moves(Square::G6)
        .unwrap()
        .contains(Square::G4));
    let before = game.clone();
    assert!(!game.in_checkmate(Color::Black).unwrap());
    assert_eq!(game, before);

    let mut mated = setup(
        Color::Black,
        &[
            (Square::E1, white(PieceKind::King)),
            (Square::H7, white(PieceKind::Rook)),
            (Square::D8, white(PieceKind::Rook)),
            (Square::H5, white(PieceKind::Knight)),
            (Square::A8, black(PieceKind::King)),
            (Square::G6, black(PieceKind::Pawn)),
        ],
    );
    let before = mated.clone();
    assert!(mated.in_checkmate(Color::Black).unwrap());
    assert_eq!(mated, before);
    // A layout that starts mated reports the winner as the active color, the
    // same as after a mating move.
    assert_eq!(mated.winner(), Some(Color::White));
    assert_eq!(mated.active_color(), Color::White);
}
