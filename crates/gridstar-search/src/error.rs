use std::fmt;

use gridstar_core::Cell;
use thiserror::Error;

/// Which endpoint of a request an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::End => f.write_str("end"),
        }
    }
}

/// A malformed search request. Reported before any search state is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("start and end are both {0}")]
    SameEndpoints(Cell),

    #[error("{endpoint} cell {cell} is outside the {rows}x{rows} board")]
    OutOfBounds {
        endpoint: Endpoint,
        cell: Cell,
        rows: i32,
    },

    #[error("{endpoint} cell {cell} is blocked")]
    Blocked { endpoint: Endpoint, cell: Cell },
}
