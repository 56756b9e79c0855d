//! # Cuckoo Filter implementation
//!
//! A Cuckoo Filter is an efficient data structure for determining "set membership" (i.e. 'have I seen this thing before?'). It is similar to a Bloom Filter, but unlike a Bloom Filter, Cuckoo Filters support item deletion. A typical use is a cheap pre-check in front of an expensive lookup, such as a disk read.
//!
//! Lookups may return false positives (about 0.01% with the 16 bit fingerprints used here) but never false negatives for items that were inserted and not deleted.
//!
//! ```
//! use cuckoo_guard::CuckooFilter;
//!
//! let mut cf = CuckooFilter::new(1024).unwrap();
//! assert!(cf.insert(b"key"));
//! assert!(cf.lookup(b"key"));
//! assert!(cf.delete(b"key"));
//! assert!(!cf.lookup(b"key"));
//! ```

mod alt_index;
mod bucket;
mod config;
mod error;
mod eviction;
mod filter;
mod hash;
mod rng;

pub use alt_index::{AltHashTable, ALT_HASH_TABLE_LEN};
pub use bucket::{Bucket, BUCKET_SIZE};
pub use config::{
    FilterConfig, DEFAULT_CAPACITY, ITEM_LIMIT, MAX_BUCKETS, MAX_KICKS_LIMIT, MIN_BUCKETS,
};
pub use error::FilterError;
pub use eviction::{EvictionEngine, Placement, DEFAULT_MAX_KICKS};
pub use filter::CuckooFilter;
pub use hash::{
    fingerprint_of, hash_key, index_and_fingerprint, Fingerprint, FINGERPRINT_SIZE_BITS,
    MAX_FINGERPRINT, NULL_FINGERPRINT,
};
pub use rng::EvictionRng;
