//! The [`Cell`] type: a fixed role ([`CellKind`]) plus a transient search
//! annotation ([`CellState`]).

use std::fmt;

/// An opaque label carried by auxiliary cells (e.g. `"driver"`).
///
/// Roles have no effect on traversal; they exist for whoever renders or
/// post-processes the grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Role(String);

impl Role {
    /// Create a role from any string-like label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The structural role of a cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Normal,
    Barrier,
    Start,
    Goal,
    Auxiliary(Role),
}

impl CellKind {
    /// Whether a search may enter this cell. Only barriers block movement.
    #[inline]
    pub fn is_passable(&self) -> bool {
        !matches!(self, CellKind::Barrier)
    }

    /// Whether the kind is `Normal`.
    #[inline]
    pub fn is_normal(&self) -> bool {
        matches!(self, CellKind::Normal)
    }
}

/// Per-search annotation, reset to `Unvisited` between searches.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Unvisited,
    /// Enqueued in the frontier.
    Open,
    /// Expanded.
    Closed,
    /// Part of the reconstructed path.
    OnPath,
}

/// A single grid cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub kind: CellKind,
    pub state: CellState,
}

impl Cell {
    /// Set the kind (builder).
    #[inline]
    pub fn with_kind(mut self, kind: CellKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the state (builder).
    #[inline]
    pub fn with_state(mut self, state: CellState) -> Self {
        self.state = state;
        self
    }

    /// Shorthand for `self.kind.is_passable()`.
    #[inline]
    pub fn is_passable(&self) -> bool {
        self.kind.is_passable()
    }
}
