//! The A* engine: a resumable state machine over one grid.

use std::collections::HashMap;
use std::ops::ControlFlow;

use gridpath_core::{CellState, Grid, Pos};

use crate::distance::manhattan;
use crate::error::{Result, SearchError};
use crate::frontier::Frontier;
use crate::observer::{Step, StepObserver};
use crate::reconstruct::{Path, reconstruct};

/// Sentinel value meaning "no known path" in score queries.
pub const UNREACHABLE: u32 = u32::MAX;

/// Lifecycle of a [`Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    Running,
    Succeeded,
    Failed,
}

/// How a completed run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The goal was reached.
    Succeeded(Path),
    /// The frontier emptied without reaching the goal.
    Failed,
    /// The observer stopped the run between two steps.
    Cancelled,
}

impl Outcome {
    /// The path, if the search succeeded.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Outcome::Succeeded(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }
}

/// Summary of a finished run. The score maps themselves are dropped with
/// the [`Search`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchReport {
    pub outcome: Outcome,
    /// Expanded cells in expansion order. The goal is popped but never
    /// expanded, so it does not appear here.
    pub expansions: Vec<Pos>,
    /// `g_score[goal]` on success.
    pub cost: Option<u32>,
    /// Number of frontier insertions, the start included.
    pub insertions: u64,
}

/// One A* search over a borrowed grid.
///
/// The search owns its score maps, predecessor links and frontier; they
/// are created in [`Search::new`] and discarded when the search is dropped.
/// Cell states in the grid are annotated in place (`Open`, `Closed`,
/// `OnPath`), so the grid is borrowed mutably for the lifetime of the
/// search.
pub struct Search<'g> {
    grid: &'g mut Grid,
    start: Pos,
    goal: Pos,
    g_score: HashMap<Pos, u32>,
    f_score: HashMap<Pos, u32>,
    came_from: HashMap<Pos, Pos>,
    frontier: Frontier,
    expansions: Vec<Pos>,
    status: SearchStatus,
    path: Option<Path>,
    // scratch buffer for neighbour lists
    nbuf: Vec<Pos>,
}

impl<'g> Search<'g> {
    /// Prepare a search from `start` to `goal`.
    ///
    /// Fails if either endpoint is out of bounds or a barrier, or if the
    /// grid's adjacency has not been recomputed since the last barrier edit.
    pub fn new(grid: &'g mut Grid, start: Pos, goal: Pos) -> Result<Self> {
        for p in [start, goal] {
            grid.check(p)?;
            if !grid.is_passable(p) {
                return Err(SearchError::BarrierEndpoint(p));
            }
        }
        if grid.is_adjacency_stale() {
            return Err(SearchError::StaleAdjacency);
        }

        let mut search = Self {
            grid,
            start,
            goal,
            g_score: HashMap::new(),
            f_score: HashMap::new(),
            came_from: HashMap::new(),
            frontier: Frontier::new(),
            expansions: Vec::new(),
            status: SearchStatus::Running,
            path: None,
            nbuf: Vec::with_capacity(4),
        };
        let h = manhattan(start, goal);
        search.g_score.insert(start, 0);
        search.f_score.insert(start, h);
        search.frontier.push(start, h);
        log::debug!("search {start} -> {goal} started, estimate {h}");
        Ok(search)
    }

    /// Current lifecycle state.
    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// The grid being searched.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    /// Best known hop count from the start, or [`UNREACHABLE`].
    pub fn g_score(&self, p: Pos) -> u32 {
        self.g_score.get(&p).copied().unwrap_or(UNREACHABLE)
    }

    /// `g_score + heuristic` as last recorded, or [`UNREACHABLE`].
    pub fn f_score(&self, p: Pos) -> u32 {
        self.f_score.get(&p).copied().unwrap_or(UNREACHABLE)
    }

    /// Predecessor of `p` on its best known route.
    pub fn came_from(&self, p: Pos) -> Option<Pos> {
        self.came_from.get(&p).copied()
    }

    /// Whether `p` is currently in the frontier.
    pub fn in_frontier(&self, p: Pos) -> bool {
        self.frontier.contains(p)
    }

    /// Expanded cells so far, in order.
    pub fn expansions(&self) -> &[Pos] {
        &self.expansions
    }

    /// The reconstructed path once the search has succeeded.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Advance by one expansion without observation.
    ///
    /// Returns the step taken, or `None` once the search has terminated
    /// (check [`status`](Search::status) for which way).
    pub fn step(&mut self) -> Option<Step> {
        let step = self.expand()?;
        self.close(step.expanded);
        Some(step)
    }

    /// Run to completion, calling `observer` after every expansion.
    pub fn run<O>(mut self, observer: &mut O) -> SearchReport
    where
        O: StepObserver + ?Sized,
    {
        let mut cancelled = false;
        while let Some(step) = self.expand() {
            let flow = observer.on_step(&step, &*self.grid);
            self.close(step.expanded);
            if let ControlFlow::Break(()) = flow {
                log::debug!("search cancelled after {} expansions", step.index + 1);
                cancelled = true;
                break;
            }
        }
        self.into_report(cancelled)
    }

    /// Pop the next cell and relax its neighbours. The caller closes it.
    fn expand(&mut self) -> Option<Step> {
        if self.status != SearchStatus::Running {
            return None;
        }

        let Some(current) = self.frontier.pop_min() else {
            self.status = SearchStatus::Failed;
            log::debug!(
                "search {} -> {} failed after {} expansions",
                self.start,
                self.goal,
                self.expansions.len()
            );
            return None;
        };

        if current == self.goal {
            self.finish();
            return None;
        }

        let tentative_g = self.g_score(current) + 1;
        let mut opened = Vec::new();
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        nbuf.extend_from_slice(self.grid.neighbors(current));

        for &n in &nbuf {
            if tentative_g >= self.g_score(n) {
                continue;
            }
            self.came_from.insert(n, current);
            self.g_score.insert(n, tentative_g);
            let f = tentative_g + manhattan(n, self.goal);
            self.f_score.insert(n, f);
            if !self.frontier.contains(n) {
                self.frontier.push(n, f);
                self.annotate(n, CellState::Open);
                opened.push(n);
            }
        }
        self.nbuf = nbuf;

        let step = Step {
            index: self.expansions.len(),
            expanded: current,
            opened,
            frontier_len: self.frontier.len(),
        };
        self.expansions.push(current);
        log::trace!(
            "expanded {current} (g={}), opened {:?}, frontier {}",
            tentative_g - 1,
            step.opened,
            step.frontier_len
        );
        Some(step)
    }

    fn close(&mut self, p: Pos) {
        if p != self.start {
            self.annotate(p, CellState::Closed);
        }
    }

    /// Set the state of a cell taken from the grid's own adjacency, which
    /// is always in bounds.
    fn annotate(&mut self, p: Pos, state: CellState) {
        if let Err(e) = self.grid.set_state(p, state) {
            debug_assert!(false, "search touched a cell outside the grid: {e}");
            log::error!("cannot mark {p} {state:?}: {e}");
        }
    }

    fn finish(&mut self) {
        self.status = SearchStatus::Succeeded;
        let cells = reconstruct(&self.came_from, self.goal, self.grid);
        log::debug!(
            "search {} -> {} succeeded: {} hops, {} expansions",
            self.start,
            self.goal,
            self.g_score(self.goal),
            self.expansions.len()
        );
        self.path = Some(Path {
            start: self.start,
            goal: self.goal,
            cells,
        });
    }

    fn into_report(self, cancelled: bool) -> SearchReport {
        let outcome = match (self.status, self.path) {
            (SearchStatus::Succeeded, Some(path)) => Outcome::Succeeded(path),
            (SearchStatus::Failed, _) => Outcome::Failed,
            _ if cancelled => Outcome::Cancelled,
            _ => Outcome::Failed,
        };
        let cost = outcome
            .is_success()
            .then(|| self.g_score.get(&self.goal).copied())
            .flatten();
        SearchReport {
            outcome,
            expansions: self.expansions,
            cost,
            insertions: self.frontier.insertions(),
        }
    }
}

/// Run a complete search from `start` to `goal`, observing every step.
pub fn run_search<O>(grid: &mut Grid, start: Pos, goal: Pos, observer: &mut O) -> Result<SearchReport>
where
    O: StepObserver + ?Sized,
{
    Ok(Search::new(grid, start, goal)?.run(observer))
}

/// Run a complete search between the grid's designated start and goal.
pub fn run_designated<O>(grid: &mut Grid, observer: &mut O) -> Result<SearchReport>
where
    O: StepObserver + ?Sized,
{
    let (start, goal) = grid.endpoints()?;
    run_search(grid, start, goal, observer)
}

/// Return every cell to `Unvisited` so the same layout can be searched
/// again.
pub fn reset(grid: &mut Grid) {
    grid.reset_transient_state();
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::observer::NoObserver;
    use gridpath_core::Layout;

    #[test]
    fn report_round_trip() {
        let mut g = Layout::open(5).build().unwrap();
        let report = run_search(&mut g, Pos::new(0, 0), Pos::new(4, 4), &mut NoObserver).unwrap();
        assert!(report.outcome.is_success());
        let json = serde_json::to_string(&report).unwrap();
        let back: SearchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);

        let mut walled = Layout::open(4)
            .with_barriers((0..4).map(|c| Pos::new(1, c)))
            .build()
            .unwrap();
        let failed =
            run_search(&mut walled, Pos::new(0, 0), Pos::new(3, 3), &mut NoObserver).unwrap();
        let json = serde_json::to_string(&failed).unwrap();
        let back: SearchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.outcome, Outcome::Failed);
        assert_eq!(back, failed);
    }

    #[test]
    fn step_and_status_round_trip() {
        let mut g = Layout::open(3).build().unwrap();
        let mut search = Search::new(&mut g, Pos::new(1, 1), Pos::new(2, 2)).unwrap();
        let step = search.step().unwrap();
        let json = serde_json::to_string(&step).unwrap();
        let back: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(step, back);

        let json = serde_json::to_string(&search.status()).unwrap();
        assert_eq!(json, r#""Running""#);
        let back: SearchStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SearchStatus::Running);
    }
}
