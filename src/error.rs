//! Error types for the cuckoo filter

use thiserror::Error;

/// Possible errors for the Cuckoo Filter
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum FilterError {
    /// A filter must be able to hold at least one item
    #[error("requested capacity must be greater than zero")]
    ZeroCapacity,

    /// Requested capacity at initialization exceeds item limit
    #[error("requested capacity {requested} exceeds item limit {limit}")]
    CapacityExceedsItemLimit { requested: u64, limit: u64 },

    /// The eviction chain needs at least one kick
    #[error("max kicks must be greater than zero")]
    InvalidMaxKicks,

    /// A larger kick budget would let one failing insertion run for too long
    #[error("max kicks {requested} exceeds limit {limit}")]
    MaxKicksExceedsLimit { requested: usize, limit: usize },

    /// Too many collisions, the filter ran out of effective space
    #[error("filter is full: no free slot found after {kicks} kicks")]
    OutOfSpace { kicks: usize },

    /// For `insert_unique`, when the item (probably) already exists
    #[error("item already exists in the filter")]
    ItemAlreadyExists,
}
