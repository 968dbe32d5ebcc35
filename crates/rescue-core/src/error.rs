use thiserror::Error;

use crate::Cell;

/// Errors surfaced by the rescue agent stack.
#[derive(Debug, Error)]
pub enum RescueError {
    /// The connectivity model disconnected two cells that must stay connected.
    ///
    /// Fatal for the episode: the model is inconsistent and retrying cannot help.
    #[error("no path from {from} to {to}: connectivity model is inconsistent")]
    PathNotFound { from: Cell, to: Cell },

    #[error("cell {cell} is outside the {width}x{height} grid")]
    OutOfBounds { cell: Cell, width: u32, height: u32 },

    #[error("malformed observation: {0}")]
    MalformedObservation(String),

    #[error("plan step {from} -> {to} is not a single grid move")]
    NonAdjacentStep { from: Cell, to: Cell },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[cfg(feature = "serde")]
    #[error("configuration parse error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("environment error: {0}")]
    Environment(String),
}

pub type Result<T> = std::result::Result<T, RescueError>;
