//! The [`GridTopology`] type — which cells of a square board are passable.
//!
//! Cells are stored in a flat row-major buffer. A search never walks the
//! buffer directly: it takes an [`Adjacency`] snapshot once at start and
//! uses that for the whole run.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cell::Cell;
use crate::config::GridConfig;

// ---------------------------------------------------------------------------
// GridTopology
// ---------------------------------------------------------------------------

/// A square board of passable / blocked cells with 4-way, unit-cost edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTopology {
    rows: i32,
    blocked: Vec<bool>,
}

impl Default for GridTopology {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}

impl GridTopology {
    /// Create a `rows`×`rows` board with every cell passable.
    pub fn new(rows: i32) -> Self {
        let rows = rows.max(0);
        let side = rows as usize;
        Self {
            rows,
            blocked: vec![false; side * side],
        }
    }

    /// Alias for [`new`](GridTopology::new).
    #[inline]
    pub fn build(rows: i32) -> Self {
        Self::new(rows)
    }

    /// Create a board sized by `config`.
    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.rows)
    }

    /// Side length.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of cells on the board.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    /// Whether the board has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    /// Whether `cell` lies on the board.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.col >= 0 && cell.row < self.rows && cell.col < self.rows
    }

    /// Row-major index of `cell`, or `None` if it is off the board.
    #[inline]
    pub fn index(&self, cell: Cell) -> Option<usize> {
        cell.index_in(self.rows)
    }

    /// The cell at row-major index `idx`.
    #[inline]
    pub fn cell(&self, idx: usize) -> Cell {
        Cell::from_index(idx, self.rows)
    }

    /// Whether `cell` is impassable. Off-board cells read as blocked.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        match self.index(cell) {
            Some(i) => self.blocked[i],
            None => true,
        }
    }

    /// Mark `cell` blocked or passable. Returns `false` and does nothing if
    /// `cell` is off the board.
    ///
    /// Requires `&mut self`, so the board cannot change while a search
    /// borrows it.
    pub fn set_blocked(&mut self, cell: Cell, blocked: bool) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.blocked[i] = blocked;
                true
            }
            None => false,
        }
    }

    /// Make every cell passable again.
    pub fn clear(&mut self) {
        self.blocked.fill(false);
    }

    /// Row-major iterator over the blocked cells.
    pub fn blocked_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.blocked
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .map(|(i, _)| self.cell(i))
    }

    /// Append the passable orthogonal neighbours of `cell` into `buf`, in the
    /// order up, down, left, right. The caller clears `buf` before calling.
    ///
    /// Evaluated against the blocked set at call time.
    pub fn neighbors(&self, cell: Cell, buf: &mut Vec<Cell>) {
        for n in cell.neighbors_4() {
            if !self.is_blocked(n) {
                buf.push(n);
            }
        }
    }

    /// Snapshot every cell's neighbour list.
    pub fn adjacency(&self) -> Adjacency {
        let mut offsets = Vec::with_capacity(self.len() + 1);
        let mut targets = Vec::with_capacity(self.len() * 4);
        let mut nbuf = Vec::with_capacity(4);
        offsets.push(0);
        for i in 0..self.len() {
            if !self.blocked[i] {
                nbuf.clear();
                self.neighbors(self.cell(i), &mut nbuf);
                targets.extend(nbuf.iter().filter_map(|&n| self.index(n)));
            }
            offsets.push(targets.len());
        }
        Adjacency { offsets, targets }
    }
}

// ---------------------------------------------------------------------------
// Adjacency
// ---------------------------------------------------------------------------

/// Frozen neighbour lists for every cell of a [`GridTopology`], addressed by
/// row-major index.
///
/// Blocked cells have an empty list and never appear in another cell's list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl Adjacency {
    /// Neighbour indices of the cell at `idx`. Empty if `idx` is out of range.
    #[inline]
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        match (self.offsets.get(idx), self.offsets.get(idx + 1)) {
            (Some(&lo), Some(&hi)) => &self.targets[lo..hi],
            _ => &[],
        }
    }

    /// Number of cells covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Whether the snapshot covers no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of directed edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }
}

// ---------------------------------------------------------------------------
// Text form
// ---------------------------------------------------------------------------

/// Errors from parsing the text form of a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseGridError {
    #[error("board text has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    InvalidChar { ch: char, row: usize, col: usize },
}

impl FromStr for GridTopology {
    type Err = ParseGridError;

    /// Parse one line per row, `#` for blocked and `.` for passable.
    /// Surrounding whitespace and blank lines are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(ParseGridError::Empty);
        }
        let side = lines.len();
        let mut topo = GridTopology::new(side as i32);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != side {
                return Err(ParseGridError::NotSquare {
                    row,
                    expected: side,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let blocked = match ch {
                    '#' => true,
                    '.' => false,
                    _ => return Err(ParseGridError::InvalidChar { ch, row, col }),
                };
                topo.set_blocked(Cell::new(row as i32, col as i32), blocked);
            }
        }
        Ok(topo)
    }
}

impl fmt::Display for GridTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.rows {
                let ch = if self.is_blocked(Cell::new(row, col)) { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
