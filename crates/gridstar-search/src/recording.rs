//! A recording observer, for replaying a run after it finishes.

use gridstar_core::Cell;

use crate::traits::{SearchObserver, StepRole};

/// A single recorded notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepEvent {
    pub cell: Cell,
    pub role: StepRole,
}

/// Records every step notification in order.
///
/// Optionally cancels the run once a given number of cancel polls have
/// answered `false`.
#[derive(Clone, Debug, Default)]
pub struct StepLog {
    events: Vec<StepEvent>,
    polls: usize,
    cancel_after: Option<usize>,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that lets `polls` expansions through, then cancels.
    pub fn cancel_after(polls: usize) -> Self {
        Self {
            cancel_after: Some(polls),
            ..Self::default()
        }
    }

    /// All events, oldest first.
    pub fn events(&self) -> &[StepEvent] {
        &self.events
    }

    /// Cells reported with `role`, in report order.
    pub fn cells(&self, role: StepRole) -> Vec<Cell> {
        self.events
            .iter()
            .filter(|e| e.role == role)
            .map(|e| e.cell)
            .collect()
    }

    /// How many times the engine polled for cancellation.
    pub fn polls(&self) -> usize {
        self.polls
    }

    /// Forget recorded events and polls, keeping the cancel threshold.
    pub fn clear(&mut self) {
        self.events.clear();
        self.polls = 0;
    }
}

impl SearchObserver for StepLog {
    fn on_step(&mut self, cell: Cell, role: StepRole) {
        self.events.push(StepEvent { cell, role });
    }

    fn should_cancel(&mut self) -> bool {
        let cancel = self.cancel_after.is_some_and(|n| self.polls >= n);
        self.polls += 1;
        cancel
    }
}
