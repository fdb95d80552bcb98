#![no_main]
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use rookery::chess::core::{Color, PieceKind, Square};
use rookery::chess::game::Match;
use rookery::chess::setup::Setup;

fn king_count(game: &Match, color: Color) -> usize {
    game.pieces_on_board()
        .filter(|man| man.color() == color && man.kind() == PieceKind::King)
        .count()
}

// Every pair of bytes is a (source, target) move attempt.
fuzz_target!(|data: &[u8]| {
    let Some((&setup, moves)) = data.split_first() else {
        return;
    };
    let mut game = Match::new(if setup % 2 == 0 {
        Setup::Classic
    } else {
        Setup::Standard
    });
    for pair in moves.chunks_exact(2) {
        let (Some(from), Some(to)) = (Square::from_repr(pair[0] % 64), Square::from_repr(pair[1] % 64))
        else {
            return;
        };
        let before = game.clone();
        match game.perform_move(from, to) {
            Ok(_) => {
                assert!(!game.in_check(before.active_color()).unwrap());
                assert_eq!(game.is_check(), game.in_check(!before.active_color()).unwrap());
            },
            Err(e) => {
                assert!(e.is_recoverable(), "{e}");
                assert_eq!(game, before);
            },
        }
        if game.is_checkmate() {
            assert!(game.is_check());
            return;
        }
        assert_eq!(king_count(&game, Color::White), 1);
        assert_eq!(king_count(&game, Color::Black), 1);
    }
});
