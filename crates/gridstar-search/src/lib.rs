//! Deterministic A* shortest-path search on square grids.
//!
//! The engine walks a [`GridTopology`](gridstar_core::GridTopology) from a
//! start cell to an end cell over 4-way, unit-cost edges, guided by the
//! Manhattan heuristic. Equal-priority cells leave the open list in the order
//! they entered it, so the same board and endpoints always give the same path
//! and the same sequence of step notifications.
//!
//! - [`run_search`] — one-shot search with closure hooks
//! - [`SearchEngine`] — reusable engine with post-run score inspection
//! - [`SearchObserver`] — the host side: step notifications and cancellation
//!
//! # Outcomes
//!
//! | Value | Meaning |
//! |---|---|
//! | `Ok(SearchOutcome::Found(path))` | shortest path, start to end inclusive |
//! | `Ok(SearchOutcome::NotFound)` | end is unreachable |
//! | `Ok(SearchOutcome::Canceled)` | the observer stopped the run |
//! | `Err(InvalidInput)` | bad endpoints; nothing was searched |

mod distance;
mod engine;
mod error;
mod frontier;
mod path;
mod recording;
mod state;
mod traits;

pub use distance::manhattan;
pub use engine::{SearchEngine, SearchOutcome, SearchResult, SearchStatus, run_search};
pub use error::{Endpoint, InvalidInput};
pub use frontier::{FrontierEntry, PriorityFrontier};
pub use recording::{StepEvent, StepLog};
pub use state::UNREACHABLE;
pub use traits::{Hooks, SearchObserver, StepRole};
