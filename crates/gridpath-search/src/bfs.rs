use std::collections::VecDeque;

use gridpath_core::{Grid, Pos};

use crate::astar::UNREACHABLE;

/// Breadth-first hop counts from `from` over the grid's computed adjacency.
///
/// Returns a row-major vector indexed like [`Grid::idx`]; cells not reached
/// hold [`UNREACHABLE`]. An out-of-bounds `from` reaches nothing.
pub fn hop_distances(grid: &Grid, from: Pos) -> Vec<u32> {
    let mut dist = vec![UNREACHABLE; grid.len()];
    let Some(si) = grid.idx(from) else {
        return dist;
    };
    dist[si] = 0;

    let mut queue: VecDeque<Pos> = VecDeque::new();
    queue.push_back(from);

    while let Some(cp) = queue.pop_front() {
        let Some(ci) = grid.idx(cp) else {
            continue;
        };
        let nd = dist[ci] + 1;
        for &np in grid.neighbors(cp) {
            let Some(ni) = grid.idx(np) else {
                continue;
            };
            if dist[ni] != UNREACHABLE {
                continue;
            }
            dist[ni] = nd;
            queue.push_back(np);
        }
    }

    dist
}

/// Every cell reachable from `from`, `from` included, in row-major order.
pub fn component(grid: &Grid, from: Pos) -> Vec<Pos> {
    hop_distances(grid, from)
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d != UNREACHABLE)
        .map(|(i, _)| grid.pos(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_core::Layout;

    #[test]
    fn distances_detour_around_wall() {
        // . . .
        // # # .
        // . . .
        let grid = Layout::open(3)
            .with_barriers([Pos::new(1, 0), Pos::new(1, 1)])
            .build()
            .unwrap();
        let dist = hop_distances(&grid, Pos::new(0, 0));
        let at = |r, c| dist[grid.idx(Pos::new(r, c)).unwrap()];
        assert_eq!(at(0, 2), 2);
        assert_eq!(at(2, 0), 6);
        assert_eq!(at(1, 0), UNREACHABLE);
    }

    #[test]
    fn component_of_isolated_cell() {
        let grid = Layout::open(3)
            .with_barriers([Pos::new(0, 1), Pos::new(1, 0)])
            .build()
            .unwrap();
        assert_eq!(component(&grid, Pos::new(0, 0)), vec![Pos::new(0, 0)]);
        assert_eq!(component(&grid, Pos::new(2, 2)).len(), 6);
        assert!(component(&grid, Pos::new(5, 5)).is_empty());
    }
}
