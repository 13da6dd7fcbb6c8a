use thiserror::Error;

use crate::geom::Pos;

/// Convenient result alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Caller contract violations on the grid model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A coordinate lies outside the `size`×`size` grid.
    #[error("position {pos} is outside the {size}x{size} grid")]
    OutOfBounds { pos: Pos, size: i32 },

    /// A grid must have at least one cell.
    #[error("grid size must be positive, got {0}")]
    EmptyGrid(i32),

    /// A coordinate string could not be parsed as `row,col`.
    #[error("invalid position {0:?}, expected \"row,col\"")]
    InvalidPos(String),

    /// No start cell has been designated.
    #[error("no start cell has been designated")]
    MissingStart,

    /// No goal cell has been designated.
    #[error("no goal cell has been designated")]
    MissingGoal,
}
