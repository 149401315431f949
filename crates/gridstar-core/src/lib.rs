//! **gridstar-core** — grid topology types shared by the search engine and
//! whatever shell edits the board.
//!
//! This crate provides the coordinate type [`Cell`], the passability model
//! [`GridTopology`] with its per-run [`Adjacency`] snapshot, and the
//! [`GridConfig`] used to size a board.

pub mod cell;
pub mod config;
pub mod topology;

pub use cell::Cell;
pub use config::{DEFAULT_ROWS, GridConfig};
pub use topology::{Adjacency, GridTopology, ParseGridError};
