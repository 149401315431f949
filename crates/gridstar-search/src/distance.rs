use gridstar_core::Cell;

/// Manhattan (L1) distance between two cells.
///
/// Admissible and consistent on a 4-connected unit-cost board. Saturates at
/// `i32::MAX` for coordinates too far apart to represent.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> i32 {
    let d = a.row.abs_diff(b.row).saturating_add(a.col.abs_diff(b.col));
    i32::try_from(d).unwrap_or(i32::MAX)
}
