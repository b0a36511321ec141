use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the pathfinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when the raw cave grid text does not follow the
    /// `N,x1,y1,...,c11,...,cNN` layout.
    #[error("malformed cave grid: {reason}")]
    MalformedInput { reason: String },

    /// Raised when a start or goal identifier falls outside `1..=node_count`.
    #[error("cave {id} is out of range; grid has {node_count} caves")]
    InvalidNodeId { id: usize, node_count: usize },

    /// Raised when a bounded search expands more caves than allowed.
    #[error("search exceeded the limit of {limit} expanded caves")]
    SearchLimitExceeded { limit: usize },

    /// Raised when a cave grid file could not be located.
    #[error("cave grid not found at {path}")]
    GridNotFound { path: PathBuf },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            reason: reason.into(),
        }
    }
}
