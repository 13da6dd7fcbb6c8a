//! Backtracking from the goal along the `came_from` chain.

use std::collections::HashMap;

use gridpath_core::{CellState, Grid, Pos};

/// A reconstructed path.
///
/// `cells` holds the intermediate cells in goal-to-start order, excluding
/// both endpoints. An empty list means the start is adjacent to, or equal
/// to, the goal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub start: Pos,
    pub goal: Pos,
    pub cells: Vec<Pos>,
}

impl Path {
    /// Number of moves from start to goal.
    pub fn hops(&self) -> usize {
        if self.start == self.goal {
            0
        } else {
            self.cells.len() + 1
        }
    }

    /// The whole route from start to goal, both endpoints included.
    pub fn start_to_goal(&self) -> Vec<Pos> {
        let mut route = Vec::with_capacity(self.cells.len() + 2);
        route.push(self.start);
        route.extend(self.cells.iter().rev());
        if self.goal != self.start {
            route.push(self.goal);
        }
        route
    }
}

/// Walk `came_from` from `goal`, returning every predecessor except the
/// root, in goal-to-start order, and mark each as `OnPath` in `grid`.
///
/// The walk stops at the first cell without a predecessor, which for a
/// successful search is the start.
pub fn reconstruct(came_from: &HashMap<Pos, Pos>, goal: Pos, grid: &mut Grid) -> Vec<Pos> {
    let mut cells = Vec::new();
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        current = prev;
        if !came_from.contains_key(&current) {
            break;
        }
        if grid.set_state(current, CellState::OnPath).is_err() {
            break;
        }
        cells.push(current);
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i32, col: i32) -> Pos {
        Pos::new(row, col)
    }

    #[test]
    fn walks_chain_excluding_endpoints() {
        let mut grid = Grid::new(4).unwrap();
        let came_from: HashMap<Pos, Pos> = [
            (p(0, 1), p(0, 0)),
            (p(0, 2), p(0, 1)),
            (p(1, 2), p(0, 2)),
        ]
        .into_iter()
        .collect();
        let cells = reconstruct(&came_from, p(1, 2), &mut grid);
        assert_eq!(cells, vec![p(0, 2), p(0, 1)]);
        assert_eq!(grid.state(p(0, 1)), Some(CellState::OnPath));
        assert_eq!(grid.state(p(0, 0)), Some(CellState::Unvisited));
        assert_eq!(grid.state(p(1, 2)), Some(CellState::Unvisited));
    }

    #[test]
    fn goal_without_predecessor_gives_empty_path() {
        let mut grid = Grid::new(2).unwrap();
        assert!(reconstruct(&HashMap::new(), p(1, 1), &mut grid).is_empty());
    }

    #[test]
    fn path_orderings() {
        let path = Path {
            start: p(0, 0),
            goal: p(1, 2),
            cells: vec![p(0, 2), p(0, 1)],
        };
        assert_eq!(path.hops(), 3);
        assert_eq!(
            path.start_to_goal(),
            vec![p(0, 0), p(0, 1), p(0, 2), p(1, 2)]
        );

        let trivial = Path {
            start: p(1, 1),
            goal: p(1, 1),
            cells: Vec::new(),
        };
        assert_eq!(trivial.hops(), 0);
        assert_eq!(trivial.start_to_goal(), vec![p(1, 1)]);
    }
}
