//! Declarative grid descriptions.
//!
//! A [`Layout`] lists barrier, start, goal and auxiliary coordinates
//! explicitly; [`Layout::build`] turns it into a [`Grid`] with adjacency
//! already computed.

use rand::{Rng, RngExt};

use crate::cell::Role;
use crate::error::Result;
use crate::geom::Pos;
use crate::grid::Grid;

/// An auxiliary cell and its role label.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuxCell {
    pub pos: Pos,
    pub role: Role,
}

/// Explicit coordinate lists describing an `size`×`size` grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Layout {
    pub size: i32,
    pub barriers: Vec<Pos>,
    pub starts: Vec<Pos>,
    pub goals: Vec<Pos>,
    pub auxiliaries: Vec<AuxCell>,
}

impl Layout {
    /// An open layout with no labelled cells.
    pub fn open(size: i32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Add a start cell (builder).
    pub fn with_start(mut self, p: Pos) -> Self {
        self.starts.push(p);
        self
    }

    /// Add a goal cell (builder).
    pub fn with_goal(mut self, p: Pos) -> Self {
        self.goals.push(p);
        self
    }

    /// Add barrier cells (builder).
    pub fn with_barriers(mut self, barriers: impl IntoIterator<Item = Pos>) -> Self {
        self.barriers.extend(barriers);
        self
    }

    /// Build the grid and compute its adjacency.
    ///
    /// Barriers are applied first. Roles are then applied in row-major
    /// order, start before goal before auxiliary when a cell is listed
    /// twice, so a role overrides a barrier at the same coordinate. The
    /// last start and goal in row-major order become the designated ones.
    pub fn build(&self) -> Result<Grid> {
        let mut grid = Grid::new(self.size)?;
        self.paint(&mut grid)?;
        Ok(grid)
    }

    /// Put `grid` back to exactly what [`build`](Layout::build) produces,
    /// discarding barrier edits, relabelled endpoints and search marks.
    ///
    /// A grid of a different size is replaced. On error `grid` is left
    /// blank.
    pub fn restore(&self, grid: &mut Grid) -> Result<()> {
        if grid.size() == self.size {
            grid.clear();
        } else {
            *grid = Grid::new(self.size)?;
        }
        self.paint(grid)
    }

    fn paint(&self, grid: &mut Grid) -> Result<()> {
        for &p in &self.barriers {
            grid.mark_barrier(p)?;
        }
        for &p in self.starts.iter().chain(&self.goals) {
            grid.check(p)?;
        }
        for aux in &self.auxiliaries {
            grid.check(aux.pos)?;
        }
        for p in grid.positions() {
            if self.starts.contains(&p) {
                grid.mark_start(p)?;
            } else if self.goals.contains(&p) {
                grid.mark_goal(p)?;
            } else if let Some(aux) = self.auxiliaries.iter().find(|a| a.pos == p) {
                grid.mark_auxiliary(p, aux.role.clone())?;
            }
        }
        grid.compute_neighbors();
        log::debug!(
            "built {0}x{0} layout: {1} barriers, {2} starts, {3} goals, {4} auxiliaries",
            self.size,
            self.barriers.len(),
            self.starts.len(),
            self.goals.len(),
            self.auxiliaries.len()
        );
        Ok(())
    }

    /// A random layout: each cell becomes a barrier with probability
    /// `density`, except the top-left start and bottom-right goal.
    pub fn scatter<R: Rng>(size: i32, density: f64, rng: &mut R) -> Self {
        let density = density.clamp(0.0, 1.0);
        let start = Pos::ZERO;
        let goal = Pos::new(size - 1, size - 1);
        let barriers = crate::geom::PosIter::new(size)
            .filter(|&p| p != start && p != goal)
            .filter(|_| rng.random_bool(density))
            .collect();
        Self {
            size,
            barriers,
            starts: vec![start],
            goals: vec![goal],
            auxiliaries: Vec::new(),
        }
    }

    /// The 16×16 delivery district: three homes as start candidates, three
    /// restaurants as goal candidates, three drivers as auxiliary cells.
    pub fn delivery_district() -> Self {
        let barriers = DISTRICT_BARRIERS.iter().map(|&rc| Pos::from(rc)).collect();
        let driver = Role::new("driver");
        Self {
            size: 16,
            barriers,
            starts: vec![Pos::new(0, 4), Pos::new(9, 7), Pos::new(2, 13)],
            goals: vec![Pos::new(0, 8), Pos::new(13, 0), Pos::new(15, 15)],
            auxiliaries: [(0, 14), (5, 15), (13, 7)]
                .into_iter()
                .map(|rc| AuxCell {
                    pos: Pos::from(rc),
                    role: driver.clone(),
                })
                .collect(),
        }
    }
}

#[rustfmt::skip]
const DISTRICT_BARRIERS: &[(i32, i32)] = &[
    (0, 0), (0, 1), (0, 2), (0, 3), (0, 5), (0, 6), (0, 7), (0, 9), (0, 10), (0, 11), (0, 15),
    (1, 0), (1, 1), (1, 2), (1, 3), (1, 5), (1, 6), (1, 9), (1, 10), (1, 11), (1, 15),
    (2, 0), (2, 1), (2, 5), (2, 9), (2, 10), (2, 11), (2, 14), (2, 15),
    (3, 13), (3, 14), (3, 15),
    (4, 1), (4, 5), (4, 10), (4, 11), (4, 12), (4, 13), (4, 14), (4, 15),
    (5, 1), (5, 5),
    (6, 1), (6, 2), (6, 3), (6, 5), (6, 6), (6, 7), (6, 8), (6, 10), (6, 11),
    (7, 5), (7, 6), (7, 7), (7, 8), (7, 10), (7, 11),
    (8, 5), (8, 6), (8, 7), (8, 8), (8, 10), (8, 11),
    (9, 15),
    (10, 3), (10, 7), (10, 8), (10, 10), (10, 11), (10, 15),
    (11, 0), (11, 3), (11, 7), (11, 8), (11, 10), (11, 11), (11, 15),
    (12, 3), (12, 7), (12, 8), (12, 10), (12, 11), (12, 15),
    (13, 8), (13, 10), (13, 11), (13, 15),
    (14, 0), (14, 1), (14, 2), (14, 3), (14, 5), (14, 6), (14, 7), (14, 8),
    (15, 0), (15, 1), (15, 2), (15, 3), (15, 4), (15, 5), (15, 6), (15, 7), (15, 8), (15, 10), (15, 11),
];
