#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

/// Errors returned by table and set operations.
pub mod error;

/// The hashing capability required of keys.
///
/// Keys hash through their own [`Hash`](core::hash::Hash) impl fed into the
/// crate's [`HashCode`](key::HashCode) hasher, which yields a signed hash
/// code. There is no way to plug in a different hasher.
pub mod key;

pub mod probing_table;

/// A hash set built on the probing table.
pub mod probing_set;

cfg_if::cfg_if! {
    if #[cfg(any(test, feature = "stats"))] {
        /// Low-level occupancy and probe-length statistics.
        pub mod stats;

        pub use stats::DebugStats;
    }
}

pub use error::Error;
pub use error::Result;
pub use key::Key;
pub use probing_set::ProbingSet;
pub use probing_table::DEFAULT_CAPACITY;
pub use probing_table::ProbingTable;
pub use probing_table::SlotDescription;
pub use probing_table::SlotState;
