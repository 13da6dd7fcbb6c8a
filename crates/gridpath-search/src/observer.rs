use std::ops::ControlFlow;

use gridpath_core::{Grid, Pos};

/// What happened during one expansion of the search loop.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// Zero-based expansion counter.
    pub index: usize,
    /// The cell whose neighbours were just relaxed.
    pub expanded: Pos,
    /// Neighbours newly pushed onto the frontier by this expansion.
    pub opened: Vec<Pos>,
    /// Live frontier size after the expansion.
    pub frontier_len: usize,
}

/// Synchronous hook called after each expansion, before the expanded cell
/// is marked closed.
///
/// Returning [`ControlFlow::Break`] stops the search at this step boundary.
pub trait StepObserver {
    fn on_step(&mut self, step: &Step, grid: &Grid) -> ControlFlow<()>;
}

impl<F> StepObserver for F
where
    F: FnMut(&Step, &Grid) -> ControlFlow<()>,
{
    fn on_step(&mut self, step: &Step, grid: &Grid) -> ControlFlow<()> {
        self(step, grid)
    }
}

/// An observer that watches nothing and never interrupts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoObserver;

impl StepObserver for NoObserver {
    fn on_step(&mut self, _step: &Step, _grid: &Grid) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}
