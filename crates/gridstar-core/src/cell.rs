//! The [`Cell`] type — a board coordinate.

use std::fmt;

/// A grid coordinate. Rows grow down, columns grow right.
///
/// Identity is the coordinate itself: two `Cell`s with the same row and
/// column are the same cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a cell shifted by (drow, dcol), saturating at the `i32` limits.
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row.saturating_add(drow),
            col: self.col.saturating_add(dcol),
        }
    }

    /// Row-major index of this cell on a `rows`×`rows` board, or `None` if it
    /// is off the board.
    #[inline]
    pub fn index_in(self, rows: i32) -> Option<usize> {
        if self.row < 0 || self.col < 0 || self.row >= rows || self.col >= rows {
            return None;
        }
        Some(self.row as usize * rows as usize + self.col as usize)
    }

    /// Inverse of [`index_in`](Self::index_in).
    #[inline]
    pub fn from_index(idx: usize, rows: i32) -> Self {
        let side = rows.max(1) as usize;
        Self::new((idx / side) as i32, (idx % side) as i32)
    }

    /// The four orthogonal neighbours, in the order up, down, left, right.
    ///
    /// No bounds check is applied.
    #[inline]
    pub const fn neighbors_4(self) -> [Cell; 4] {
        [
            self.shift(-1, 0),
            self.shift(1, 0),
            self.shift(0, -1),
            self.shift(0, 1),
        ]
    }

    /// Whether `other` is exactly one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        matches!(
            (self.row.abs_diff(other.row), self.col.abs_diff(other.col)),
            (0, 1) | (1, 0)
        )
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}
