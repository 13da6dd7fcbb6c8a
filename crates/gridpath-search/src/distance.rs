use gridpath_core::Pos;

/// Manhattan (L1) distance between two positions.
///
/// Admissible and consistent for unit-cost 4-way movement, so it is the
/// heuristic used by the A* engine.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> u32 {
    (a.row - b.row).unsigned_abs() + (a.col - b.col).unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric_and_zero_on_self() {
        let a = Pos::new(1, 7);
        let b = Pos::new(4, 2);
        assert_eq!(manhattan(a, b), 8);
        assert_eq!(manhattan(b, a), 8);
        assert_eq!(manhattan(a, a), 0);
    }
}
