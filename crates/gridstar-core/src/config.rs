//! Board sizing configuration.

/// Side length used when no configuration is given.
pub const DEFAULT_ROWS: i32 = 40;

/// Configuration for building a [`GridTopology`](crate::GridTopology).
///
/// Boards are always square: `rows` cells on each side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub rows: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { rows: DEFAULT_ROWS }
    }
}

impl GridConfig {
    /// Set the side length (builder).
    #[inline]
    pub const fn with_rows(mut self, rows: i32) -> Self {
        self.rows = rows;
        self
    }
}
