use thiserror::Error;

/// Errors reported by [`ProbingTable`](crate::ProbingTable) and
/// [`ProbingSet`](crate::ProbingSet).
///
/// Every error is raised before the operation touches the table, so a failed
/// call never leaves partial changes behind.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An argument was rejected: an absent key, or a zero capacity.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

pub(crate) const ABSENT_KEY: Error = Error::InvalidArgument("the key cannot be absent");

pub(crate) const ZERO_CAPACITY: Error =
    Error::InvalidArgument("capacity must be greater than zero");
