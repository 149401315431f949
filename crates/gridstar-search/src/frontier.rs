//! The open list: a min-heap of cells keyed by `(priority, sequence)`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridstar_core::Cell;

/// One queued cell.
///
/// Ordering looks only at `(priority, sequence)`. Sequences are unique within
/// a frontier, so no two live entries ever compare equal and cells never need
/// to be compared.
#[derive(Clone, Copy, Debug)]
pub struct FrontierEntry {
    pub priority: i32,
    pub sequence: u64,
    pub cell: Cell,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest priority first, and
        // the oldest entry among equal priorities.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue with FIFO tie-breaking.
///
/// Membership is not tracked: a cell may be pushed several times and older
/// entries are left for the caller to recognise as stale.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<FrontierEntry>,
    next_sequence: u64,
}

impl PriorityFrontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `cell` at `priority`. Returns the sequence number assigned.
    pub fn push(&mut self, cell: Cell, priority: i32) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(FrontierEntry {
            priority,
            sequence,
            cell,
        });
        sequence
    }

    /// Remove and return the entry with the smallest `(priority, sequence)`.
    pub fn pop_min(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    /// The entry [`pop_min`](Self::pop_min) would return next.
    pub fn peek_min(&self) -> Option<&FrontierEntry> {
        self.heap.peek()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every entry and restart sequence numbering at zero.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_sequence = 0;
    }
}
