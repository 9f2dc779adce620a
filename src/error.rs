use thiserror::Error;

/// Recoverable errors returned by [`AvlTree`] queries.
///
/// [`AvlTree`]: crate::AvlTree
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The queried key does not exist in the tree.
    #[error("key not found")]
    KeyNotFound,

    /// The requested 1-based rank lies outside of `1..=len`.
    #[error("rank {rank} out of bounds for tree of {len} entries")]
    RankOutOfBounds { rank: usize, len: usize },
}

/// A broken structural contract of the tree.
///
/// These indicate a bug in the code mutating the tree, never a user error.
/// Rotations panic with [`InvariantViolation::MissingPivot`], and
/// [`AvlTree::check_invariants()`] reports the remaining variants.
///
/// [`AvlTree::check_invariants()`]: crate::AvlTree::check_invariants
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A rotation was requested for a node without the child that must be
    /// promoted.
    #[error("cannot rotate {0}: node has no {1} child")]
    MissingPivot(Direction, Direction),

    /// A child holds a key that is not strictly ordered relative to its
    /// parent.
    #[error("binary search order violated at depth {depth}")]
    Unordered { depth: usize },

    /// The child subtree heights differ by more than 1.
    #[error("balance factor {balance} out of range at depth {depth}")]
    Unbalanced { depth: usize, balance: i16 },

    /// The cached height does not match the height of the children.
    #[error("stale height at depth {depth}: cached {cached}, computed {computed}")]
    StaleHeight {
        depth: usize,
        cached: u8,
        computed: i16,
    },

    /// The cached subtree weight does not match the number of nodes.
    #[error("stale weight at depth {depth}: cached {cached}, computed {computed}")]
    StaleWeight {
        depth: usize,
        cached: usize,
        computed: usize,
    },
}

/// A rotation direction / child side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}
