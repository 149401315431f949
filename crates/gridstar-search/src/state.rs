//! Per-cell search bookkeeping (g, f, parent, open flag) in a flat array.
//!
//! The array is reused between runs. Every node carries the generation of
//! the run that last wrote it; a node from an older run reads as fresh, so
//! starting a run only has to bump the generation.

/// Sentinel score for cells no path has reached yet.
pub const UNREACHABLE: i32 = i32::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) f: i32,
    pub(crate) parent: Option<usize>,
    pub(crate) open: bool,
    generation: u32,
}

impl Node {
    const FRESH: Node = Node {
        g: UNREACHABLE,
        f: UNREACHABLE,
        parent: None,
        open: false,
        generation: 0,
    };
}

#[derive(Debug, Default)]
pub(crate) struct SearchState {
    nodes: Vec<Node>,
    generation: u32,
}

impl SearchState {
    /// Start a new run over `len` cells.
    pub(crate) fn reset(&mut self, len: usize) {
        if self.nodes.len() != len {
            self.nodes.clear();
            self.nodes.resize(len, Node::FRESH);
            self.generation = 0;
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: old stamps could alias the new generation.
            self.nodes.fill(Node::FRESH);
            self.generation = 1;
        }
    }

    /// Current view of node `idx`. Untouched or out-of-range nodes read as
    /// fresh.
    #[inline]
    pub(crate) fn node(&self, idx: usize) -> Node {
        match self.nodes.get(idx) {
            Some(n) if n.generation == self.generation => *n,
            _ => Node::FRESH,
        }
    }

    /// Mutable access to node `idx`, claiming it for the current run.
    ///
    /// Panics if `idx` is out of range.
    #[inline]
    pub(crate) fn node_mut(&mut self, idx: usize) -> &mut Node {
        let cur_gen = self.generation;
        let n = &mut self.nodes[idx];
        if n.generation != cur_gen {
            *n = Node {
                generation: cur_gen,
                ..Node::FRESH
            };
        }
        n
    }
}
