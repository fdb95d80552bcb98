//! Failures reported by the match engine.
//!
//! Everything a player can provoke is recoverable: validation happens before
//! any mutation, and the one mutate-then-validate case ([`MatchError::SelfCheck`])
//! is fully unwound before it is reported. The remaining variants signal a
//! broken match (e.g. a position without a king) and should not be retried.

use thiserror::Error;

use crate::chess::core::{Color, Square};
use crate::chess::grid::GridError;

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("invalid square '{0}': valid squares are from a1 to h8")]
    InvalidCoordinate(String),
    #[error("there is no piece on source square {0}")]
    EmptySource(Square),
    #[error("the piece on {square} is not yours: {active} is to move")]
    WrongColor { square: Square, active: Color },
    #[error("there are no possible moves for the piece on {0}")]
    NoLegalMoves(Square),
    #[error("the piece on {from} can not move to {to}")]
    IllegalDestination { from: Square, to: Square },
    #[error("moving {from} to {to} would leave your own king in check")]
    SelfCheck { from: Square, to: Square },
    #[error("the match is over: {winner} won by checkmate")]
    GameOver { winner: Color },
    #[error("there is no {0} king on the board")]
    MissingKing(Color),
    #[error("expected 1 {color} king, got {count}")]
    KingCount { color: Color, count: usize },
    #[error("{0} king is in check while it is not {0}'s turn")]
    UnexpectedCheck(Color),
    #[error("the piece on {0} is missing from the roster of pieces on the board")]
    RosterMismatch(Square),
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl MatchError {
    /// Returns true for errors caused by the player's input. These leave the
    /// match untouched and the action can simply be retried.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidCoordinate(_)
            | Self::EmptySource(_)
            | Self::WrongColor { .. }
            | Self::NoLegalMoves(_)
            | Self::IllegalDestination { .. }
            | Self::SelfCheck { .. }
            | Self::GameOver { .. } => true,
            Self::MissingKing(_)
            | Self::KingCount { .. }
            | Self::UnexpectedCheck(_)
            | Self::RosterMismatch(_)
            | Self::Grid(_) => false,
        }
    }
}
