//! The match engine: owns the board and every piece, tracks whose turn it is
//! and enforces the rules.
//!
//! All mutation of the board goes through a single primitive pair:
//! [`Match::make_move`] executes a move and produces a [`MoveRecord`], and
//! [`Match::undo_move`] consumes that record to restore the exact previous
//! state (occupancy, piece squares and move counters, roster membership and
//! order). Both the self-check rollback in [`Match::perform_move`] and the
//! trial moves of the checkmate search are built on it, so the search can nest
//! captures and undos without drifting.
//!
//! Check detection is recomputed from scratch after every mutation: for each
//! opposing piece on the board, compute its destinations and see if the king's
//! square is among them.

use std::fmt;
use std::num::NonZeroU16;

use arrayvec::ArrayVec;

use crate::chess::core::{Color, Piece, PieceKind, Square, BOARD_SIZE, BOARD_WIDTH};
use crate::chess::error::MatchError;
use crate::chess::grid::Grid;
use crate::chess::piece::{Man, Occupant, PieceId};
use crate::chess::setup::Setup;
use crate::chess::squares::SquareSet;

const CAPACITY: usize = BOARD_SIZE as usize;

/// Rendering view of the board: `snapshot[row][column]`, row 0 being the
/// eighth rank.
pub type BoardSnapshot = [[Option<Piece>; BOARD_WIDTH as usize]; BOARD_WIDTH as usize];

/// A piece removed from the board by a move, with its place in the roster of
/// pieces on the board at the time of capture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Capture {
    id: PieceId,
    roster_index: usize,
}

/// Everything needed to take back an executed move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct MoveRecord {
    piece: PieceId,
    from: Square,
    to: Square,
    /// Move counter of the moving piece before the move.
    move_count: u16,
    captured: Option<Capture>,
}

/// State of a single game: board, rosters, turn counter and the check and
/// checkmate flags.
///
/// A match is created from one of the built-in [`Setup`]s or from an arbitrary
/// layout and then advanced by [`Match::perform_move`] until one side is
/// checkmated.
///
/// ```
/// use rookery::chess::core::{Color, Square};
/// use rookery::chess::game::Match;
/// use rookery::chess::setup::Setup;
///
/// let mut game = Match::new(Setup::Standard);
/// assert!(game.possible_moves(Square::E2).unwrap().contains(Square::E4));
/// assert_eq!(game.perform_move(Square::E2, Square::E4), Ok(None));
/// assert_eq!(game.turn(), 2);
/// assert_eq!(game.active_color(), Color::Black);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Match {
    grid: Grid<Occupant>,
    /// Arena of every piece placed during the match, indexed by [`PieceId`].
    men: ArrayVec<Man, CAPACITY>,
    on_board: ArrayVec<PieceId, CAPACITY>,
    captured: ArrayVec<PieceId, CAPACITY>,
    turn: NonZeroU16,
    active: Color,
    check: bool,
    winner: Option<Color>,
}

impl Match {
    /// Creates a match from one of the built-in layouts with White to move.
    #[must_use]
    pub fn new(setup: Setup) -> Self {
        match Self::from_layout(Color::White, &setup.layout()) {
            Ok(game) => game,
            Err(e) => unreachable!("built-in {setup} layout is valid: {e}"),
        }
    }

    /// Creates a match from an arbitrary layout.
    ///
    /// The check flag is computed for the side to move. If that side is
    /// already checkmated, the match starts (and ends) finished and, as after
    /// a mating move, the active color is the winner.
    ///
    /// # Errors
    ///
    /// Fails if two pieces share a square, if either color does not have
    /// exactly one king, or if the side that just "moved" (the one not to
    /// move) is in check.
    pub fn from_layout(active: Color, layout: &[(Square, Piece)]) -> Result<Self, MatchError> {
        let mut game = Self::empty(active);
        for &(square, piece) in layout {
            let _id = game.place_new_piece(square, piece)?;
        }
        for color in [Color::White, Color::Black] {
            let count = game
                .pieces_on_board()
                .filter(|man| man.color() == color && man.kind() == PieceKind::King)
                .count();
            if count != 1 {
                return Err(MatchError::KingCount { color, count });
            }
        }
        if game.in_check(active.opponent())? {
            return Err(MatchError::UnexpectedCheck(active.opponent()));
        }
        game.check = game.in_check(active)?;
        if game.check && game.in_checkmate(active)? {
            game.winner = Some(active.opponent());
            game.active = active.opponent();
        }
        Ok(game)
    }

    fn empty(active: Color) -> Self {
        Self {
            grid: Grid::new(),
            men: ArrayVec::new(),
            on_board: ArrayVec::new(),
            captured: ArrayVec::new(),
            turn: NonZeroU16::MIN,
            active,
            check: false,
            winner: None,
        }
    }

    fn place_new_piece(&mut self, square: Square, piece: Piece) -> Result<PieceId, MatchError> {
        // The grid has as many cells as the arena has slots: if the placement
        // succeeds, there is room in the arena.
        #[allow(clippy::cast_possible_truncation)]
        let id = PieceId(self.men.len() as u8);
        let man = Man::new(id, piece, square);
        self.grid.place(man.occupant(), square.position())?;
        self.men.push(man);
        self.on_board.push(id);
        Ok(id)
    }

    /// Number of the current turn, starting from 1. It is incremented after
    /// every move that does not end the match.
    #[must_use]
    pub const fn turn(&self) -> u16 {
        self.turn.get()
    }

    /// The color that is to move (or, after checkmate, the color that
    /// delivered it).
    #[must_use]
    pub const fn active_color(&self) -> Color {
        self.active
    }

    /// Returns true if the side that did not make the last move is in check.
    /// Before checkmate this is the side to move, afterwards the mated side.
    #[must_use]
    pub const fn is_check(&self) -> bool {
        self.check
    }

    /// Returns true if the match is over.
    #[must_use]
    pub const fn is_checkmate(&self) -> bool {
        self.winner.is_some()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Returns the piece standing on the square, if any.
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid
            .occupant(square.position())
            .map(|occupant| self.man(occupant.id).piece())
    }

    /// Copies the board contents for rendering.
    #[must_use]
    pub fn board_snapshot(&self) -> BoardSnapshot {
        let mut snapshot = [[None; BOARD_WIDTH as usize]; BOARD_WIDTH as usize];
        for (position, occupant) in self.grid.iter() {
            if let (Ok(row), Ok(column)) =
                (usize::try_from(position.row), usize::try_from(position.column))
            {
                snapshot[row][column] = Some(self.man(occupant.id).piece());
            }
        }
        snapshot
    }

    /// Pieces currently on the board, in the order they were placed (captures
    /// taken back by a rollback regain their original place).
    pub fn pieces_on_board(&self) -> impl Iterator<Item = &Man> + '_ {
        self.on_board.iter().map(|&id| self.man(id))
    }

    /// Pieces of the given color that were captured, in the order of capture.
    pub fn captured_pieces(&self, color: Color) -> impl Iterator<Item = &Man> + '_ {
        self.captured
            .iter()
            .map(|&id| self.man(id))
            .filter(move |man| man.color() == color)
    }

    /// Returns the squares the piece on `source` can move to by its movement
    /// rules. This is meant for highlighting: the moves that would leave the
    /// king in check are not filtered out and will be rejected by
    /// [`Match::perform_move`].
    ///
    /// # Errors
    ///
    /// Fails if the match is over, the square is empty, the piece belongs to
    /// the opponent or the piece can not move at all.
    pub fn possible_moves(&self, source: Square) -> Result<SquareSet, MatchError> {
        self.ensure_in_progress()?;
        let id = self.validate_source(source)?;
        Ok(self.man(id).legal_destinations(&self.grid))
    }

    /// Moves the piece from `source` to `target` and passes the turn to the
    /// opponent. Returns the captured piece, if any.
    ///
    /// If the move checkmates the opponent, the match is over and neither the
    /// turn counter nor the active color change.
    ///
    /// # Errors
    ///
    /// Fails without changing the match if the source is not valid (see
    /// [`Match::possible_moves`]), if the piece can not reach the target, or
    /// if the move would leave the mover's own king in check. Internal errors
    /// (e.g. a missing king) are reported as well and leave the match
    /// unusable.
    pub fn perform_move(
        &mut self,
        source: Square,
        target: Square,
    ) -> Result<Option<Piece>, MatchError> {
        self.ensure_in_progress()?;
        let id = self.validate_source(source)?;
        self.validate_target(id, source, target)?;
        let record = self.make_move(source, target)?;
        match self.in_check(self.active) {
            Ok(false) => {},
            Ok(true) => {
                self.undo_move(record)?;
                return Err(MatchError::SelfCheck {
                    from: source,
                    to: target,
                });
            },
            Err(e) => {
                self.undo_move(record)?;
                return Err(e);
            },
        }
        let opponent = self.active.opponent();
        self.check = self.in_check(opponent)?;
        if self.check && self.in_checkmate(opponent)? {
            self.winner = Some(self.active);
        } else {
            self.next_turn();
        }
        Ok(record.captured.map(|capture| self.man(capture.id).piece()))
    }

    /// Returns true if the king of the given color is attacked by any opposing
    /// piece.
    ///
    /// # Errors
    ///
    /// Fails if there is no king of that color on the board.
    pub fn in_check(&self, color: Color) -> Result<bool, MatchError> {
        let king = self.king(color)?;
        Ok(self
            .pieces_on_board()
            .filter(|man| man.color() != color)
            .any(|man| man.legal_destinations(&self.grid).contains(king)))
    }

    /// Returns true if the given color is in check and no move of any of its
    /// pieces gets the king out of it.
    ///
    /// Every candidate move is executed on the board, tested and taken back,
    /// so the match is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Fails if there is no king of that color on the board.
    pub fn in_checkmate(&mut self, color: Color) -> Result<bool, MatchError> {
        if !self.in_check(color)? {
            return Ok(false);
        }
        // The rosters change during trial moves: iterate over a snapshot.
        let defenders: ArrayVec<PieceId, CAPACITY> = self
            .pieces_on_board()
            .filter(|man| man.color() == color)
            .map(Man::id)
            .collect();
        for id in defenders {
            let man = self.man(id);
            let from = man.square();
            for to in man.legal_destinations(&self.grid) {
                let record = self.make_move(from, to)?;
                let still_in_check = self.in_check(color);
                self.undo_move(record)?;
                if !still_in_check? {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Executes the move on the board without any validation: the piece on
    /// `from` replaces whatever stands on `to`.
    ///
    /// # Errors
    ///
    /// Fails without modifying anything if `from` is empty or the roster does
    /// not know about the captured piece.
    pub(crate) fn make_move(&mut self, from: Square, to: Square) -> Result<MoveRecord, MatchError> {
        let Some(mover) = self.grid.occupant(from.position()) else {
            return Err(MatchError::EmptySource(from));
        };
        let captured = match self.grid.occupant(to.position()) {
            Some(victim) => {
                let Some(roster_index) = self.on_board.iter().position(|&id| id == victim.id)
                else {
                    return Err(MatchError::RosterMismatch(to));
                };
                Some(Capture {
                    id: victim.id,
                    roster_index,
                })
            },
            None => None,
        };
        let record = MoveRecord {
            piece: mover.id,
            from,
            to,
            move_count: self.man(mover.id).move_count(),
            captured,
        };

        let _mover = self.grid.remove(from.position())?;
        let _victim = self.grid.remove(to.position())?;
        self.grid.place(mover, to.position())?;
        self.men[mover.id.index()].relocate(to);
        if let Some(capture) = captured {
            let removed = self.on_board.remove(capture.roster_index);
            debug_assert_eq!(removed, capture.id);
            self.captured.push(capture.id);
        }
        Ok(record)
    }

    /// Takes back a move executed by [`Match::make_move`]. Records have to be
    /// undone in the reverse order of execution.
    pub(crate) fn undo_move(&mut self, record: MoveRecord) -> Result<(), MatchError> {
        let moved = self.grid.remove(record.to.position())?;
        debug_assert_eq!(moved.map(|occupant| occupant.id), Some(record.piece));
        let mover = &mut self.men[record.piece.index()];
        mover.restore(record.from, record.move_count);
        self.grid.place(mover.occupant(), record.from.position())?;
        if let Some(capture) = record.captured {
            let victim = self.man(capture.id).occupant();
            self.grid.place(victim, record.to.position())?;
            if let Some(index) = self.captured.iter().rposition(|&id| id == capture.id) {
                let _restored = self.captured.remove(index);
            }
            self.on_board.insert(capture.roster_index, capture.id);
        }
        Ok(())
    }

    fn man(&self, id: PieceId) -> &Man {
        &self.men[id.index()]
    }

    fn king(&self, color: Color) -> Result<Square, MatchError> {
        self.pieces_on_board()
            .find(|man| man.color() == color && man.kind() == PieceKind::King)
            .map(Man::square)
            .ok_or(MatchError::MissingKing(color))
    }

    fn ensure_in_progress(&self) -> Result<(), MatchError> {
        match self.winner {
            Some(winner) => Err(MatchError::GameOver { winner }),
            None => Ok(()),
        }
    }

    /// Checks, in this order, that the square is occupied, by a piece of the
    /// active color, that can move somewhere.
    fn validate_source(&self, source: Square) -> Result<PieceId, MatchError> {
        let Some(occupant) = self.grid.occupant(source.position()) else {
            return Err(MatchError::EmptySource(source));
        };
        if occupant.color != self.active {
            return Err(MatchError::WrongColor {
                square: source,
                active: self.active,
            });
        }
        if !self.man(occupant.id).has_any_legal_move(&self.grid) {
            return Err(MatchError::NoLegalMoves(source));
        }
        Ok(occupant.id)
    }

    fn validate_target(&self, id: PieceId, source: Square, target: Square) -> Result<(), MatchError> {
        if !self.man(id).can_move_to(&self.grid, target) {
            return Err(MatchError::IllegalDestination {
                from: source,
                to: target,
            });
        }
        Ok(())
    }

    fn next_turn(&mut self) {
        self.turn = self.turn.saturating_add(1);
        self.active = self.active.opponent();
    }
}

impl fmt::Debug for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.board_snapshot() {
            for (column, cell) in row.iter().enumerate() {
                if column != 0 {
                    write!(f, " ")?;
                }
                match cell {
                    Some(piece) => write!(f, "{piece}")?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "Turn: {}", self.turn)?;
        writeln!(f, "Active color: {}", self.active)?;
        writeln!(f, "Check: {}", self.check)?;
        writeln!(f, "Winner: {:?}", self.winner)?;
        writeln!(f, "Pieces on board: {:?}", self.on_board)?;
        writeln!(f, "Captured: {:?}", self.captured)?;
        Ok(())
    }
}
