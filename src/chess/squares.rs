//! Compact set of board squares used to report where a piece may go.
//!
//! [`SquareSet`] utilizes the fact that there are exactly 64 squares: each bit
//! of a [u64] corresponds to one [`Square`], so set operations (union,
//! difference, membership) are single integer instructions. For rendering the
//! set is converted to the row-major boolean matrix the presentation layer
//! expects, see [`SquareSet::to_matrix`].

use std::fmt;
use std::ops::{BitOr, Sub};

use itertools::Itertools;

use crate::chess::core::{Square, BOARD_SIZE, BOARD_WIDTH};

const SQUARE_SEPARATOR: &str = " ";
const LINE_SEPARATOR: &str = "\n";

/// Destination matrix as seen by the player: `matrix[row][column]` with row 0
/// being the eighth rank and column 0 being file 'a'.
pub type SquareMatrix = [[bool; BOARD_WIDTH as usize]; BOARD_WIDTH as usize];

/// Represents a set of squares and provides common operations over these
/// sets.
///
/// Mirroring [`Square`] semantics, the least significant bit corresponds to
/// A1, and the most significant bit - to H8.
#[derive(Copy, Clone, PartialEq, Eq, Default, Hash)]
pub struct SquareSet {
    bits: u64,
}

impl SquareSet {
    /// Constructs the set from pre-calculated bits.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Constructs a set without any squares.
    #[must_use]
    pub const fn empty() -> Self {
        Self::from_bits(0)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn from_squares(squares: &[Square]) -> Self {
        squares.iter().fold(Self::empty(), |set, square| set | Self::from(*square))
    }

    /// Returns true if this set contains given square.
    #[must_use]
    pub const fn contains(self, square: Square) -> bool {
        (self.bits & (1u64 << square as u8)) != 0
    }

    #[allow(missing_docs)]
    pub fn insert(&mut self, square: Square) {
        self.bits |= 1u64 << square as u8;
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn has_any(self) -> bool {
        !self.is_empty()
    }

    /// An efficient way to iterate over the set squares, from A1 to H8.
    #[must_use]
    pub const fn iter(self) -> SquareIterator {
        SquareIterator { bits: self.bits }
    }

    /// Expands the set into the row-major boolean matrix.
    ///
    /// ```
    /// use rookery::chess::core::Square;
    /// use rookery::chess::squares::SquareSet;
    ///
    /// let matrix = SquareSet::from_squares(&[Square::A8, Square::C2]).to_matrix();
    /// assert!(matrix[0][0]);
    /// assert!(matrix[6][2]);
    /// assert_eq!(matrix.iter().flatten().filter(|&&set| set).count(), 2);
    /// ```
    #[must_use]
    pub fn to_matrix(self) -> SquareMatrix {
        let mut matrix = [[false; BOARD_WIDTH as usize]; BOARD_WIDTH as usize];
        for square in self.iter() {
            let position = square.position();
            // Squares always map to on-board positions.
            if let (Ok(row), Ok(column)) =
                (usize::try_from(position.row), usize::try_from(position.column))
            {
                matrix[row][column] = true;
            }
        }
        matrix
    }
}

impl fmt::Debug for SquareSet {
    /// Dumps the set as a board: the eighth rank first, '1' for the squares in
    /// the set and '.' otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.to_matrix()
                .iter()
                .map(|row| row
                    .iter()
                    .map(|&set| if set { '1' } else { '.' })
                    .join(SQUARE_SEPARATOR))
                .join(LINE_SEPARATOR)
        )
    }
}

impl BitOr for SquareSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits | rhs.bits)
    }
}

impl Sub for SquareSet {
    type Output = Self;

    /// [Relative component], i.e. Result = LHS \ RHS.
    ///
    /// [Relative component]: https://en.wikipedia.org/wiki/Complement_%28set_theory%29#Relative_complement
    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits & !rhs.bits)
    }
}

impl From<Square> for SquareSet {
    fn from(square: Square) -> Self {
        Self::from_bits(1u64 << square as u8)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(squares: I) -> Self {
        squares.into_iter().fold(Self::empty(), |set, square| set | Self::from(square))
    }
}

impl IntoIterator for SquareSet {
    type IntoIter = SquareIterator;
    type Item = Square;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterates over set squares from the least significant 1 bit (LS1B) to the
/// most significant one through the [`BitScan`] forward operation.
///
/// [BitScan]: https://www.chessprogramming.org/BitScan
pub struct SquareIterator {
    bits: u64,
}

impl Iterator for SquareIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        // Get the LS1B and consume it from the iterator.
        let next_index = self.bits.trailing_zeros();
        self.bits ^= 1 << next_index;
        debug_assert!(next_index < u32::from(BOARD_SIZE));
        u8::try_from(next_index).ok().and_then(Square::from_repr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.bits.count_ones() as usize;
        (count, Some(count))
    }
}
