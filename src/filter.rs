//! # Cuckoo Filter
//!
//! This implementation is based on the paper _Cuckoo Filter: Practically Better Than Bloom_, by Fan et. al.
//!
//! The paper recommends a (2, 4) CF (2 possible buckets for each item, and 4 fingerprints in each bucket) because it's space optimal for practical false positive rates. We use 16 bit fingerprints, which keeps the false positive rate around 0.01% at a 95% load factor.
//!
//! The number of buckets is fixed when the filter is created. Alternate indices are computed against the bucket mask, so resizing would strand every relocated fingerprint.

use crate::alt_index::AltHashTable;
use crate::bucket::{Bucket, BUCKET_SIZE};
use crate::config::FilterConfig;
use crate::error::FilterError;
use crate::eviction::EvictionEngine;
use crate::hash::{self, Fingerprint};
use crate::rng::EvictionRng;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

type Input = [u8];

/// A Cuckoo Filter over byte string keys
///
/// ### Notes
///
/// - `insert`, `lookup` and `delete` take `&[u8]`, anything else must be encoded by the caller first
/// - Mutation needs `&mut self`; callers sharing a filter between threads must serialize writers themselves
/// - The RNG only breaks ties during eviction. Seed it (see [`FilterConfig::with_seed`]) for reproducible behavior
#[derive(Debug, Clone)]
pub struct CuckooFilter<R = ChaCha8Rng> {
    buckets: Vec<Bucket>,
    count: usize,
    bucket_index_mask: usize,
    alt_hashes: &'static AltHashTable,
    engine: EvictionEngine,
    rng: R,
}

impl CuckooFilter<ChaCha8Rng> {
    /// Try to create a new Cuckoo Filter for `capacity` items with default settings
    ///
    /// ### Caveats
    ///
    /// - We round the capacity up to a power of two so bucket indices can be reduced with a bitwise AND instead of a modulo.
    pub fn new(capacity: usize) -> Result<Self, FilterError> {
        Self::with_config(FilterConfig::new(capacity))
    }

    /// Create a filter from a configuration. The RNG is seeded from `config.seed`, or from entropy if unset
    pub fn with_config(config: FilterConfig) -> Result<Self, FilterError> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: EvictionRng> CuckooFilter<R> {
    /// Create a filter that draws its eviction choices from `rng`. `config.seed` is ignored
    pub fn with_rng(config: FilterConfig, rng: R) -> Result<Self, FilterError> {
        config.validate()?;
        let bucket_count = config.bucket_count()?;
        debug!(
            capacity = config.capacity,
            bucket_count,
            max_kicks = config.max_kicks,
            "creating cuckoo filter"
        );
        Ok(CuckooFilter {
            buckets: vec![Bucket::new(); bucket_count],
            count: 0,
            bucket_index_mask: bucket_count - 1,
            alt_hashes: AltHashTable::global(),
            engine: EvictionEngine::new(config.max_kicks),
            rng,
        })
    }

    /// Both candidate buckets and the fingerprint of an item
    fn buckets_from_item(&self, item: &Input) -> (usize, usize, Fingerprint) {
        let (primary, fingerprint) = hash::index_and_fingerprint(item, self.bucket_index_mask);
        let alternate = self
            .alt_hashes
            .alternate_index(fingerprint, primary, self.bucket_index_mask);
        (primary, alternate, fingerprint)
    }

    /// Add item to filter. Returns `Err(FilterError::OutOfSpace)` if the filter is full
    ///
    /// A failed insertion changes nothing: everything inserted before is still found.
    pub fn try_insert(&mut self, item: &Input) -> Result<(), FilterError> {
        let (primary, fingerprint) = hash::index_and_fingerprint(item, self.bucket_index_mask);
        match self.engine.place(
            &mut self.buckets,
            self.alt_hashes,
            self.bucket_index_mask,
            primary,
            fingerprint,
            &mut self.rng,
        ) {
            Ok(_) => {
                self.count += 1;
                Ok(())
            }
            Err(e) => {
                warn!(
                    count = self.count,
                    load_factor = self.load_factor(),
                    "cuckoo filter insertion rejected: {}",
                    e
                );
                Err(e)
            }
        }
    }

    /// Add item to filter. False means the filter is full and the item was not added
    pub fn insert(&mut self, item: &Input) -> bool {
        self.try_insert(item).is_ok()
    }

    /// Add item to filter unless it (probably) exists already
    pub fn try_insert_unique(&mut self, item: &Input) -> Result<(), FilterError> {
        if self.lookup(item) {
            return Err(FilterError::ItemAlreadyExists);
        }
        self.try_insert(item)
    }

    /// Add item to filter unless it (probably) exists already. False if it exists or the filter is full
    pub fn insert_unique(&mut self, item: &Input) -> bool {
        self.try_insert_unique(item).is_ok()
    }

    /// Check if item is in filter
    ///
    /// False positives are possible, false negatives are not.
    pub fn lookup(&self, item: &Input) -> bool {
        let (primary, alternate, fingerprint) = self.buckets_from_item(item);
        self.buckets[primary].contains(fingerprint) || self.buckets[alternate].contains(fingerprint)
    }

    /// Delete one occurrence of an item from the filter. False if it was not found
    ///
    /// Only delete items that were inserted: deleting a false positive removes some other item's fingerprint.
    pub fn delete(&mut self, item: &Input) -> bool {
        let (primary, alternate, fingerprint) = self.buckets_from_item(item);
        if self.buckets[primary].delete(fingerprint) || self.buckets[alternate].delete(fingerprint) {
            self.count -= 1;
            return true;
        }
        false
    }

    /// Remove every item
    pub fn reset(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.reset();
        }
        self.count = 0;
        debug!(bucket_count = self.buckets.len(), "cuckoo filter reset");
    }

    /// Number of items in the filter
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of fingerprint slots
    pub fn capacity(&self) -> usize {
        self.buckets.len() * BUCKET_SIZE
    }

    /// Fraction of slots in use
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity() as f64
    }

    /// Approximately how many bytes is this CF using?
    pub fn estimate_size(&self) -> usize {
        self.buckets.len() * core::mem::size_of::<Bucket>()
    }

    pub fn max_kicks(&self) -> usize {
        self.engine.max_kicks()
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }
}

/* -------------------- Unit Tests -------------------- */
