use thiserror::Error;

/// The error surface for every fallible operation in this crate.
///
/// Every kind here corresponds to a distinguishable failure mode a caller
/// can branch on; nothing is collapsed into a generic "invalid operation"
/// bucket.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// `at(key)` was called on a unique map that does not contain `key`.
    #[error("key not found")]
    KeyNotFound,

    /// A cursor was dereferenced, advanced, or erased past either end of
    /// its container, or a range-erase was given `first > last`.
    #[error("cursor out of bounds")]
    OutOfBounds,

    /// The cursor's tree is no longer reachable (the container was
    /// dropped), or the cursor's last-observed version no longer matches
    /// the tree's current version.
    #[error("cursor is stale")]
    StaleCursor,

    /// Two cursors that do not share a tree were compared, or a detached
    /// node was inserted into a container with an incompatible allocator.
    #[error("cursors belong to different containers")]
    CrossContainerCompare,

    /// `emplace_ascending`/bulk construction was given a sequence that was
    /// not monotonically ordered (strictly, for unique containers;
    /// non-strictly, for multi containers).
    #[error("input sequence was not monotonically ordered")]
    OrderViolation,
}

pub type Result<T> = std::result::Result<T, Error>;
