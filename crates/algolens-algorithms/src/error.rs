//! Error types for the algorithm suite.

use algolens_core::NodeId;
use thiserror::Error;

/// Result type alias for algorithm runs.
pub type AlgorithmResult<T> = Result<T, AlgorithmError>;

/// Invalid-input errors, raised before any step is emitted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlgorithmError {
    /// The requested start node does not exist in the graph.
    #[error("node {0} is not in the graph")]
    UnknownNode(NodeId),

    /// Sorting requires at least one element.
    #[error("input array must not be empty")]
    EmptyInput,

    /// A grid coordinate lies outside the grid.
    #[error("cell ({row}, {col}) is outside the grid")]
    CellOutOfBounds { row: usize, col: usize },
}
