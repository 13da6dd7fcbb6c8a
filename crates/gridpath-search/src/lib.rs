//! A* hop-count search over [`gridpath_core::Grid`].
//!
//! The pieces, leaf to root:
//!
//! - [`manhattan`]: the admissible, consistent heuristic
//! - [`Frontier`]: open set keyed by `(f_score, insertion_order)` with O(1)
//!   membership
//! - [`Search`]: the expansion loop, score maps and termination
//! - [`reconstruct`]: backtracking along `came_from`
//!
//! [`run_search`] ties them together and reports every expansion to a
//! [`StepObserver`], which is how a renderer samples the grid mid-search.
//!
//! ```
//! use gridpath_core::{Layout, Pos};
//! use gridpath_search::{NoObserver, run_search};
//!
//! let mut grid = Layout::open(5).build().unwrap();
//! let report = run_search(&mut grid, Pos::new(0, 0), Pos::new(4, 4), &mut NoObserver).unwrap();
//! assert_eq!(report.cost, Some(8));
//! ```

mod astar;
mod bfs;
mod distance;
mod error;
mod frontier;
mod observer;
mod reconstruct;

pub use astar::{
    Outcome, Search, SearchReport, SearchStatus, UNREACHABLE, reset, run_designated, run_search,
};
pub use bfs::{component, hop_distances};
pub use distance::manhattan;
pub use error::{Result, SearchError};
pub use frontier::Frontier;
pub use observer::{NoObserver, Step, StepObserver};
pub use reconstruct::{Path, reconstruct};
