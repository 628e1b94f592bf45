//! Error types shared by every maze operation.

use num_bigint::{BigInt, BigUint};
use thiserror::Error;

/// Why an edge set is not a perfect maze of its grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeDefect {
    /// The bit vector does not have one entry per candidate edge.
    #[error("expected {expected} edge bits, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// A spanning tree of `n` cells has exactly `n - 1` edges.
    #[error("expected {expected} open passages, found {found}")]
    WrongEdgeCount { expected: usize, found: usize },

    #[error("open passages form a cycle")]
    Cycle,

    #[error("some cells are unreachable")]
    Disconnected,

    /// Bit strings may only contain `0` and `1`.
    #[error("invalid edge bit {0:?}")]
    InvalidBit(char),

    /// The maze was built for a different grid than the one requested.
    #[error("maze belongs to a different grid")]
    GridMismatch,
}

/// Errors reported by counting, ranking and unranking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// A zero side, or a grid too large to number its cells and edges.
    #[error("invalid dimensions {width}x{height}: width and height must be positive and the grid addressable")]
    InvalidDimensions { width: usize, height: usize },

    /// The index was negative or not below the maze count.
    #[error("index {index} out of range [0, {count})")]
    OutOfRangeIndex { index: BigInt, count: BigUint },

    #[error("invalid maze: {0}")]
    InvalidMaze(#[from] MazeDefect),

    /// Capacity limit, not a property of the input: the transfer table for
    /// this grid would need more frontier states than the configured span
    /// allows. `count` still answers through the determinant counter.
    #[error("grid span {span} exceeds the supported maximum of {max}")]
    SpanTooWide { span: usize, max: usize },
}
