//! Filter configuration and validation
//!
//! ```
//! use cuckoo_guard::FilterConfig;
//!
//! let config = FilterConfig::default()
//!     .with_capacity(10_000)
//!     .with_max_kicks(250)
//!     .with_seed(42);
//! assert!(config.validate().is_ok());
//! ```

use crate::bucket::BUCKET_SIZE;
use crate::error::FilterError;
use crate::eviction::DEFAULT_MAX_KICKS;

use serde::{Deserialize, Serialize};

/// Default number of expected entries
pub const DEFAULT_CAPACITY: usize = 1_000_000;
/// Largest number of buckets a filter may allocate
pub const MAX_BUCKETS: u64 = 1 << 32;
/// The item limit needs to respect the POW(2) rounding we do
pub const ITEM_LIMIT: u64 = MAX_BUCKETS * BUCKET_SIZE as u64;
/// Largest kick budget accepted by `validate`, keeps a failing insertion cheap
pub const MAX_KICKS_LIMIT: usize = 1 << 16;
/// A filter always has at least two buckets, so the index mask has at least one bit
pub const MIN_BUCKETS: usize = 2;

/// Cuckoo filter configuration
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Expected number of entries, rounded up to a power of two
    pub capacity: usize,
    /// Swaps an insertion may perform before the filter reports itself full
    pub max_kicks: usize,
    /// Seed for the eviction RNG, random when absent
    pub seed: Option<u64>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_kicks: DEFAULT_MAX_KICKS,
            seed: None,
        }
    }
}

impl FilterConfig {
    /// Configuration for `capacity` entries with default settings otherwise
    pub fn new(capacity: usize) -> Self {
        Self::default().with_capacity(capacity)
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if self.capacity == 0 {
            return Err(FilterError::ZeroCapacity);
        }
        if self.capacity as u64 > ITEM_LIMIT {
            return Err(FilterError::CapacityExceedsItemLimit {
                requested: self.capacity as u64,
                limit: ITEM_LIMIT,
            });
        }
        if self.max_kicks == 0 {
            return Err(FilterError::InvalidMaxKicks);
        }
        if self.max_kicks > MAX_KICKS_LIMIT {
            return Err(FilterError::MaxKicksExceedsLimit {
                requested: self.max_kicks,
                limit: MAX_KICKS_LIMIT,
            });
        }
        self.bucket_count()?;
        Ok(())
    }

    /// Number of buckets a filter built from this configuration allocates
    ///
    /// The capacity is rounded up to the next power of two and split into buckets of four, keeping at least `MIN_BUCKETS`. Fails if the rounded capacity does not fit in a `usize`.
    pub fn bucket_count(&self) -> Result<usize, FilterError> {
        let slots = self
            .capacity
            .max(1)
            .checked_next_power_of_two()
            .ok_or(FilterError::CapacityExceedsItemLimit {
                requested: self.capacity as u64,
                limit: ITEM_LIMIT,
            })?;
        Ok((slots / BUCKET_SIZE).max(MIN_BUCKETS))
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_max_kicks(mut self, max_kicks: usize) -> Self {
        self.max_kicks = max_kicks;
        self
    }

    /// Make eviction choices repeatable
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/* -------------------- Unit Tests -------------------- */
