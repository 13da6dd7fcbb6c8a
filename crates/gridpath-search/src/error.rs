use gridpath_core::{GridError, Pos};
use thiserror::Error;

/// Convenient result alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Precondition failures when starting a search.
///
/// An unreachable goal is not an error; it is reported as
/// [`Outcome::Failed`](crate::Outcome::Failed).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The start or goal cell is a barrier.
    #[error("endpoint {0} is a barrier")]
    BarrierEndpoint(Pos),

    /// Barriers changed since adjacency was last computed.
    #[error("adjacency is stale; call compute_neighbors after editing barriers")]
    StaleAdjacency,

    /// An endpoint is out of bounds or not designated.
    #[error(transparent)]
    Grid(#[from] GridError),
}
