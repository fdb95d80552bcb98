//! Text rendering of the match state. Everything here is pure: the functions
//! build strings and [`crate::session::Session`] decides where to print them.

use itertools::Itertools;

use crate::chess::core::{Color, BOARD_WIDTH};
use crate::chess::game::{BoardSnapshot, Match};
use crate::chess::squares::SquareMatrix;

const FILES: &str = "abcdefgh";
const EMPTY: char = '.';
const HIGHLIGHT: char = '*';

/// Draws the board from the eighth rank down with rank numbers on the left
/// and file letters at the bottom. Squares from `highlights` get a `*` mark
/// in front of their contents:
///
/// ```
/// use rookery::chess::core::Square;
/// use rookery::chess::game::Match;
/// use rookery::chess::setup::Setup;
/// use rookery::session::render;
///
/// let game = Match::new(Setup::Classic);
/// let moves = game.possible_moves(Square::C2).unwrap().to_matrix();
/// let board = render::board(&game.board_snapshot(), Some(&moves));
/// assert_eq!(board.lines().nth(1), Some("7  .  . *r  r  r  .  .  ."));
/// assert_eq!(board.lines().last(), Some("   a  b  c  d  e  f  g  h"));
/// ```
#[must_use]
pub fn board(snapshot: &BoardSnapshot, highlights: Option<&SquareMatrix>) -> String {
    let rows = snapshot.iter().enumerate().map(|(row, cells)| {
        let rank = usize::from(BOARD_WIDTH) - row;
        let cells = cells
            .iter()
            .enumerate()
            .map(|(column, cell)| {
                let marked = highlights.is_some_and(|matrix| matrix[row][column]);
                format!(
                    "{}{}",
                    if marked { HIGHLIGHT } else { ' ' },
                    cell.map_or(EMPTY.to_string(), |piece| piece.to_string())
                )
            })
            .join(" ");
        format!("{rank} {cells}")
    });
    let files = FILES.chars().map(|file| format!(" {file}")).join(" ");
    rows.chain(std::iter::once(format!("  {files}"))).join("\n")
}

/// Lists the captured pieces of both colors.
#[must_use]
pub fn captured(game: &Match) -> String {
    let list = |color| {
        game.captured_pieces(color)
            .map(ToString::to_string)
            .join(", ")
    };
    format!(
        "Captured pieces:\nWhite: [{}]\nBlack: [{}]",
        list(Color::White),
        list(Color::Black)
    )
}

/// Turn number and whose move it is, or the result once the match is over.
#[must_use]
pub fn status(game: &Match) -> String {
    let turn = game.turn();
    let active = game.active_color();
    match game.winner() {
        Some(winner) => format!("Turn: {turn}\nCHECKMATE!\nWinner: {winner}"),
        None if game.is_check() => format!("Turn: {turn}\nWaiting player: {active}\nCHECK!"),
        None => format!("Turn: {turn}\nWaiting player: {active}"),
    }
}

/// Board followed by the captured lists and the status.
#[must_use]
pub fn summary(game: &Match) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        board(&game.board_snapshot(), None),
        captured(game),
        status(game)
    )
}
