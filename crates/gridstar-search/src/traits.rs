use gridstar_core::Cell;

/// What a step notification reports about a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepRole {
    /// The cell joined the open set. Never reported for the goal.
    Open,
    /// The cell was popped and expanded.
    Closed,
    /// The cell lies on the reconstructed path, strictly between the
    /// endpoints.
    Path,
}

/// Host side of a search run.
///
/// The engine polls [`should_cancel`](Self::should_cancel) once before every
/// expansion and reports progress through [`on_step`](Self::on_step). Both
/// calls are made on the search thread and should return promptly.
/// Implementations must not touch the topology being searched.
pub trait SearchObserver {
    /// Notification only; nothing is expected back.
    fn on_step(&mut self, cell: Cell, role: StepRole) {
        let _ = (cell, role);
    }

    /// Return `true` to stop the run as [`Canceled`](crate::SearchOutcome::Canceled).
    fn should_cancel(&mut self) -> bool {
        false
    }
}

/// Observes nothing and never cancels.
impl SearchObserver for () {}

impl<O: SearchObserver + ?Sized> SearchObserver for &mut O {
    fn on_step(&mut self, cell: Cell, role: StepRole) {
        (**self).on_step(cell, role);
    }

    fn should_cancel(&mut self) -> bool {
        (**self).should_cancel()
    }
}

/// Adapts a step closure and a cancel closure into a [`SearchObserver`].
pub struct Hooks<S, C> {
    pub step: S,
    pub cancel: C,
}

impl<S, C> Hooks<S, C>
where
    S: FnMut(Cell, StepRole),
    C: FnMut() -> bool,
{
    pub fn new(step: S, cancel: C) -> Self {
        Self { step, cancel }
    }
}

impl<S, C> SearchObserver for Hooks<S, C>
where
    S: FnMut(Cell, StepRole),
    C: FnMut() -> bool,
{
    fn on_step(&mut self, cell: Cell, role: StepRole) {
        (self.step)(cell, role);
    }

    fn should_cancel(&mut self) -> bool {
        (self.cancel)()
    }
}
