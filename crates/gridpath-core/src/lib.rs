//! **gridpath-core**: the grid model for hop-count shortest-path search.
//!
//! This crate provides the foundational types shared by the *gridpath*
//! workspace: coordinates, cells with a fixed role and a transient search
//! annotation, a square grid with a derived 4-way adjacency relation, and
//! declarative layouts.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod layout;

pub use cell::{Cell, CellKind, CellState, Role};
pub use error::{GridError, Result};
pub use geom::{Pos, PosIter};
pub use grid::Grid;
pub use layout::{AuxCell, Layout};
