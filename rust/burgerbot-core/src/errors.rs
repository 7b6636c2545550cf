use thiserror::Error;

/// Failures raised while building or querying a [`crate::Board`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("malformed board: size must be positive")]
    ZeroSize,
    #[error("malformed board: expected {expected} tiles, got {actual}")]
    MalformedBoard { expected: usize, actual: usize },
    #[error("malformed board: unknown tile {token:?} at index {index}")]
    UnknownTile { token: String, index: usize },
    #[error("location ({row}, {col}) is outside a board of size {size}")]
    OutOfBounds { row: usize, col: usize, size: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("hazard cost {cost} is negative")]
    NegativeCost { cost: i64 },
    #[error("path step ({dr}, {dc}) does not match any direction")]
    NoMatchingDirection { dr: i64, dc: i64 },
}
