use gridstar_core::{Cell, GridTopology};

use crate::SearchEngine;
use crate::traits::{SearchObserver, StepRole};

impl SearchEngine {
    /// Walk parent pointers from `end_idx` back to `start_idx`.
    ///
    /// Returns the trail goal-first, both endpoints included. Every cell
    /// strictly between the endpoints is reported as [`StepRole::Path`] as it
    /// is reached.
    pub(crate) fn reconstruct_path<O: SearchObserver + ?Sized>(
        &self,
        topology: &GridTopology,
        start_idx: usize,
        end_idx: usize,
        observer: &mut O,
    ) -> Vec<Cell> {
        let mut trail = vec![topology.cell(end_idx)];
        let mut ci = end_idx;
        while let Some(pi) = self.state.node(ci).parent {
            let cell = topology.cell(pi);
            trail.push(cell);
            if pi == start_idx {
                return trail;
            }
            observer.on_step(cell, StepRole::Path);
            ci = pi;
        }
        log::warn!(
            "parent chain from {} stopped at {} before reaching {}",
            topology.cell(end_idx),
            topology.cell(ci),
            topology.cell(start_idx),
        );
        trail
    }
}
