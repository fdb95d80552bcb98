//! Square-centric ("mailbox") storage for the pieces: a fixed 8x8 array of
//! cells where each cell holds at most one occupant.
//!
//! [`Grid`] knows nothing about chess. It is addressed by
//! [`Position`] (zero-based row and column) and only validates bounds and
//! occupancy; legality, colors and turns are the business of
//! [`crate::chess::game::Match`], the grid's sole owner.

use std::fmt;

use thiserror::Error;

use crate::chess::core::{Position, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;

/// Grid misuse. These are engine bugs rather than player mistakes: the match
/// validates every square before touching the grid.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position {0} is not on the board")]
    OutOfBounds(Position),
    #[error("there is already a piece on position {0}")]
    Occupied(Position),
}

/// Fixed-size two-dimensional container with at most one occupant per cell.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: [[Option<T>; WIDTH]; WIDTH],
}

impl<T: Copy> Grid<T> {
    /// Creates a grid with every cell vacant.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [[None; WIDTH]; WIDTH],
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn rows(&self) -> usize {
        WIDTH
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn columns(&self) -> usize {
        WIDTH
    }

    /// Returns true if the position addresses one of the cells.
    #[must_use]
    pub const fn is_in_bounds(&self, position: Position) -> bool {
        position.is_on_board()
    }

    /// Returns the occupant of the cell, if there is one. Positions outside of
    /// the grid are never occupied.
    #[must_use]
    pub fn occupant(&self, position: Position) -> Option<T> {
        let (row, column) = self.index(position).ok()?;
        self.cells[row][column]
    }

    /// Returns true if the cell is occupied.
    #[must_use]
    pub fn has_piece(&self, position: Position) -> bool {
        self.occupant(position).is_some()
    }

    /// Puts the occupant into a vacant cell.
    ///
    /// # Errors
    ///
    /// Fails if the position is outside of the grid or the cell is already
    /// occupied. The grid is not modified in either case.
    pub fn place(&mut self, occupant: T, position: Position) -> Result<(), GridError> {
        let (row, column) = self.index(position)?;
        let cell = &mut self.cells[row][column];
        if cell.is_some() {
            return Err(GridError::Occupied(position));
        }
        *cell = Some(occupant);
        Ok(())
    }

    /// Vacates the cell and returns its previous occupant, if any.
    ///
    /// # Errors
    ///
    /// Fails if the position is outside of the grid.
    pub fn remove(&mut self, position: Position) -> Result<Option<T>, GridError> {
        let (row, column) = self.index(position)?;
        Ok(self.cells[row][column].take())
    }

    /// Iterates over occupied cells row by row, starting from row 0.
    pub fn iter(&self) -> impl Iterator<Item = (Position, T)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(column, cell)| {
                cell.map(|occupant| (position_at(row, column), occupant))
            })
        })
    }

    fn index(&self, position: Position) -> Result<(usize, usize), GridError> {
        if !self.is_in_bounds(position) {
            return Err(GridError::OutOfBounds(position));
        }
        match (usize::try_from(position.row), usize::try_from(position.column)) {
            (Ok(row), Ok(column)) => Ok((row, column)),
            _ => Err(GridError::OutOfBounds(position)),
        }
    }
}

impl<T: Copy> Default for Grid<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Indices come from enumerating the cell arrays, so they are below WIDTH.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn position_at(row: usize, column: usize) -> Position {
    Position::new(row as i8, column as i8)
}

impl<T: Copy + fmt::Display> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for (column, cell) in row.iter().enumerate() {
                if column != 0 {
                    write!(f, " ")?;
                }
                match cell {
                    Some(occupant) => write!(f, "{occupant}")?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
