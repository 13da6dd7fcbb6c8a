//! The [`Grid`] type: an N×N owner of [`Cell`]s plus a derived 4-way
//! adjacency relation.
//!
//! Adjacency is not maintained incrementally. Any edit that changes barrier
//! membership marks it stale, and callers must call
//! [`compute_neighbors`](Grid::compute_neighbors) before searching again.

use crate::cell::{Cell, CellKind, CellState, Role};
use crate::error::{GridError, Result};
use crate::geom::{Pos, PosIter};

/// A square grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: i32,
    cells: Vec<Cell>,
    neighbors: Vec<Vec<Pos>>,
    adjacency_ready: bool,
    start: Option<Pos>,
    goal: Option<Pos>,
}

impl Grid {
    /// Create an `n`×`n` grid of `Normal`, `Unvisited` cells.
    pub fn new(n: i32) -> Result<Self> {
        if n <= 0 {
            return Err(GridError::EmptyGrid(n));
        }
        let len = (n as usize) * (n as usize);
        log::debug!("building {n}x{n} grid");
        Ok(Self {
            size: n,
            cells: vec![Cell::default(); len],
            neighbors: vec![Vec::new(); len],
            adjacency_ready: false,
            start: None,
            goal: None,
        })
    }

    /// Side length of the grid.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.in_square(self.size)
    }

    /// Flat row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn idx(&self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.row as usize) * (self.size as usize) + p.col as usize)
    }

    /// Position of a flat index. The index must come from [`idx`](Grid::idx).
    #[inline]
    pub fn pos(&self, idx: usize) -> Pos {
        let n = self.size as usize;
        Pos::new((idx / n) as i32, (idx % n) as i32)
    }

    fn checked_idx(&self, p: Pos) -> Result<usize> {
        self.idx(p).ok_or(GridError::OutOfBounds {
            pos: p,
            size: self.size,
        })
    }

    /// Validate that `p` lies inside the grid.
    pub fn check(&self, p: Pos) -> Result<()> {
        self.checked_idx(p).map(|_| ())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The cell at `p`, if inside the grid.
    pub fn cell(&self, p: Pos) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// The kind of the cell at `p`, if inside the grid.
    pub fn kind(&self, p: Pos) -> Option<&CellKind> {
        self.cell(p).map(|c| &c.kind)
    }

    /// The transient state of the cell at `p`, if inside the grid.
    pub fn state(&self, p: Pos) -> Option<CellState> {
        self.cell(p).map(|c| c.state)
    }

    /// Whether `p` is inside the grid and not a barrier.
    pub fn is_passable(&self, p: Pos) -> bool {
        self.cell(p).is_some_and(Cell::is_passable)
    }

    /// Row-major iterator over all positions.
    pub fn positions(&self) -> PosIter {
        PosIter::new(self.size)
    }

    /// Row-major iterator over `(Pos, &Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &Cell)> + '_ {
        self.positions().zip(self.cells.iter())
    }

    /// Number of cells currently in `state`.
    pub fn count_state(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }

    /// The most recently designated start cell, if it still holds that role.
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    /// The most recently designated goal cell, if it still holds that role.
    pub fn goal(&self) -> Option<Pos> {
        self.goal
    }

    /// The designated `(start, goal)` pair.
    pub fn endpoints(&self) -> Result<(Pos, Pos)> {
        let start = self.start.ok_or(GridError::MissingStart)?;
        let goal = self.goal.ok_or(GridError::MissingGoal)?;
        Ok((start, goal))
    }

    // -----------------------------------------------------------------------
    // Labelling
    // -----------------------------------------------------------------------

    /// Mark `p` impassable.
    pub fn mark_barrier(&mut self, p: Pos) -> Result<()> {
        self.set_kind(p, CellKind::Barrier)
    }

    /// Mark `p` as the start cell and remember it as the designated start.
    pub fn mark_start(&mut self, p: Pos) -> Result<()> {
        self.set_kind(p, CellKind::Start)?;
        self.start = Some(p);
        Ok(())
    }

    /// Mark `p` as the goal cell and remember it as the designated goal.
    pub fn mark_goal(&mut self, p: Pos) -> Result<()> {
        self.set_kind(p, CellKind::Goal)?;
        self.goal = Some(p);
        Ok(())
    }

    /// Tag `p` with an auxiliary role.
    pub fn mark_auxiliary(&mut self, p: Pos, role: impl Into<Role>) -> Result<()> {
        self.set_kind(p, CellKind::Auxiliary(role.into()))
    }

    /// Return `p` to a plain `Normal` cell.
    pub fn mark_normal(&mut self, p: Pos) -> Result<()> {
        self.set_kind(p, CellKind::Normal)
    }

    /// Overwrite the kind of `p` unconditionally.
    pub fn set_kind(&mut self, p: Pos, kind: CellKind) -> Result<()> {
        let i = self.checked_idx(p)?;
        let cell = &mut self.cells[i];
        if !cell.kind.is_normal() && cell.kind != kind {
            log::warn!("cell {p} relabelled from {:?} to {kind:?}", cell.kind);
        }
        if cell.kind.is_passable() != kind.is_passable() {
            self.adjacency_ready = false;
        }
        if self.start == Some(p) && kind != CellKind::Start {
            self.start = None;
        }
        if self.goal == Some(p) && kind != CellKind::Goal {
            self.goal = None;
        }
        cell.kind = kind;
        Ok(())
    }

    /// Set the transient state of `p`.
    pub fn set_state(&mut self, p: Pos, state: CellState) -> Result<()> {
        let i = self.checked_idx(p)?;
        self.cells[i].state = state;
        Ok(())
    }

    /// Return every cell to `Unvisited`, leaving kinds untouched.
    pub fn reset_transient_state(&mut self) {
        for c in &mut self.cells {
            c.state = CellState::Unvisited;
        }
    }

    /// Blank the grid to all-`Normal` cells, forgetting start, goal and
    /// adjacency. [`Layout::restore`](crate::Layout::restore) uses this to
    /// repaint a preset.
    pub fn clear(&mut self) {
        log::debug!("clearing {0}x{0} grid", self.size);
        self.cells.fill(Cell::default());
        for n in &mut self.neighbors {
            n.clear();
        }
        self.adjacency_ready = false;
        self.start = None;
        self.goal = None;
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// Recompute the neighbour list of every cell.
    ///
    /// Passable cells get their in-bounds, passable orthogonal neighbours in
    /// the order down, up, right, left. Barriers get no neighbours.
    pub fn compute_neighbors(&mut self) {
        for i in 0..self.cells.len() {
            let p = self.pos(i);
            let mut list = std::mem::take(&mut self.neighbors[i]);
            list.clear();
            if self.cells[i].is_passable() {
                list.extend(p.neighbors_4().into_iter().filter(|&n| self.is_passable(n)));
            }
            self.neighbors[i] = list;
        }
        self.adjacency_ready = true;
    }

    /// Neighbours of `p` as of the last [`compute_neighbors`](Grid::compute_neighbors).
    /// Empty for out-of-bounds positions.
    pub fn neighbors(&self, p: Pos) -> &[Pos] {
        match self.idx(p) {
            Some(i) => &self.neighbors[i],
            None => &[],
        }
    }

    /// Whether barrier membership changed since adjacency was last computed
    /// (or it was never computed).
    #[inline]
    pub fn is_adjacency_stale(&self) -> bool {
        !self.adjacency_ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i32, col: i32) -> Pos {
        Pos::new(row, col)
    }

    #[test]
    fn grid_new_and_query() {
        let g = Grid::new(4).unwrap();
        assert_eq!(g.size(), 4);
        assert_eq!(g.len(), 16);
        assert_eq!(g.kind(p(0, 0)), Some(&CellKind::Normal));
        assert_eq!(g.state(p(3, 3)), Some(CellState::Unvisited));
        assert_eq!(g.cell(p(4, 0)), None);
        assert!(g.is_adjacency_stale());
    }

    #[test]
    fn grid_rejects_non_positive_size() {
        assert_eq!(Grid::new(0), Err(GridError::EmptyGrid(0)));
        assert!(Grid::new(-2).is_err());
    }

    #[test]
    fn idx_and_pos_round_trip() {
        let g = Grid::new(5).unwrap();
        for q in g.positions() {
            let i = g.idx(q).unwrap();
            assert_eq!(g.pos(i), q);
        }
        assert_eq!(g.idx(p(-1, 0)), None);
    }

    #[test]
    fn marking_out_of_bounds_fails() {
        let mut g = Grid::new(3).unwrap();
        assert_eq!(
            g.mark_barrier(p(3, 1)),
            Err(GridError::OutOfBounds {
                pos: p(3, 1),
                size: 3
            })
        );
    }

    #[test]
    fn neighbors_in_priority_order() {
        let mut g = Grid::new(3).unwrap();
        g.compute_neighbors();
        assert_eq!(g.neighbors(p(1, 1)), &[p(2, 1), p(0, 1), p(1, 2), p(1, 0)]);
        assert_eq!(g.neighbors(p(0, 0)), &[p(1, 0), p(0, 1)]);
        assert_eq!(g.neighbors(p(2, 2)), &[p(1, 2), p(2, 1)]);
        assert!(g.neighbors(p(9, 9)).is_empty());
    }

    #[test]
    fn barriers_are_excluded_both_ways() {
        let mut g = Grid::new(3).unwrap();
        g.mark_barrier(p(1, 1)).unwrap();
        g.compute_neighbors();
        assert!(g.neighbors(p(1, 1)).is_empty());
        for q in g.positions() {
            assert!(!g.neighbors(q).contains(&p(1, 1)));
        }
        assert_eq!(g.neighbors(p(0, 1)), &[p(0, 2), p(0, 0)]);
    }

    #[test]
    fn barrier_edits_mark_adjacency_stale() {
        let mut g = Grid::new(3).unwrap();
        g.compute_neighbors();
        assert!(!g.is_adjacency_stale());
        g.mark_start(p(0, 0)).unwrap();
        g.mark_auxiliary(p(0, 1), "driver").unwrap();
        assert!(!g.is_adjacency_stale());
        g.mark_barrier(p(2, 2)).unwrap();
        assert!(g.is_adjacency_stale());
        g.compute_neighbors();
        g.mark_normal(p(2, 2)).unwrap();
        assert!(g.is_adjacency_stale());
    }

    #[test]
    fn endpoints_track_designation() {
        let mut g = Grid::new(4).unwrap();
        assert_eq!(g.endpoints(), Err(GridError::MissingStart));
        g.mark_start(p(0, 0)).unwrap();
        assert_eq!(g.endpoints(), Err(GridError::MissingGoal));
        g.mark_goal(p(3, 3)).unwrap();
        assert_eq!(g.endpoints(), Ok((p(0, 0), p(3, 3))));

        // Overwriting the start with another role drops the designation.
        g.mark_barrier(p(0, 0)).unwrap();
        assert_eq!(g.start(), None);
        assert_eq!(g.goal(), Some(p(3, 3)));
    }

    #[test]
    fn reset_keeps_kinds() {
        let mut g = Grid::new(2).unwrap();
        g.mark_barrier(p(0, 1)).unwrap();
        g.set_state(p(1, 1), CellState::Closed).unwrap();
        g.set_state(p(1, 0), CellState::OnPath).unwrap();
        g.reset_transient_state();
        assert_eq!(g.count_state(CellState::Unvisited), 4);
        assert_eq!(g.kind(p(0, 1)), Some(&CellKind::Barrier));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut g = Grid::new(3).unwrap();
        g.mark_barrier(p(1, 1)).unwrap();
        g.mark_start(p(0, 0)).unwrap();
        g.compute_neighbors();
        g.clear();
        assert!(g.iter().all(|(_, c)| *c == Cell::default()));
        assert_eq!(g.start(), None);
        assert!(g.is_adjacency_stale());
        assert!(g.neighbors(p(0, 0)).is_empty());
    }
}
