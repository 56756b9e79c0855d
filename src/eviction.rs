//! Insertion with bounded cuckoo eviction
//!
//! When both candidate buckets of a fingerprint are full, a random resident of one of them is kicked out and moved to its own alternate bucket, possibly kicking out another resident, and so on. The chain is cut off after `max_kicks` swaps.
//!
//! A chain that runs out of kicks is undone swap by swap, so a failed insertion leaves every bucket exactly as it found it and no previously inserted fingerprint is lost.

use crate::alt_index::AltHashTable;
use crate::bucket::Bucket;
use crate::error::FilterError;
use crate::hash::Fingerprint;
use crate::rng::EvictionRng;

use tracing::trace;

/// Kick budget recommended by the paper and used by the reference implementation
pub const DEFAULT_MAX_KICKS: usize = 500;

/// Where an inserted fingerprint (or the last one it displaced) ended up
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Placement {
    /// Free slot in the primary bucket
    Primary(usize),
    /// Free slot in the alternate bucket
    Alternate(usize),
    /// An eviction chain of `kicks` swaps ended with a displaced fingerprint homed in bucket `index`
    Relocated { index: usize, kicks: usize },
}

/// Runs the insertion algorithm against a bucket array it does not own
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EvictionEngine {
    max_kicks: usize,
}

impl EvictionEngine {
    pub fn new(max_kicks: usize) -> EvictionEngine {
        EvictionEngine { max_kicks }
    }

    pub fn max_kicks(&self) -> usize {
        self.max_kicks
    }

    /// Place `fingerprint`, whose primary bucket is `index`, into `buckets`
    ///
    /// `buckets.len()` must be `bucket_index_mask + 1`. On `Err(FilterError::OutOfSpace)` the buckets are unchanged.
    pub fn place<R: EvictionRng + ?Sized>(
        &self,
        buckets: &mut [Bucket],
        alt_hashes: &AltHashTable,
        bucket_index_mask: usize,
        index: usize,
        fingerprint: Fingerprint,
        rng: &mut R,
    ) -> Result<Placement, FilterError> {
        debug_assert_eq!(buckets.len(), bucket_index_mask + 1);

        let alternate = alt_hashes.alternate_index(fingerprint, index, bucket_index_mask);
        if buckets[index].insert(fingerprint) {
            return Ok(Placement::Primary(index));
        }
        if buckets[alternate].insert(fingerprint) {
            return Ok(Placement::Alternate(alternate));
        }

        // Both buckets are full, begin eviction process
        let mut target = if rng.next_bit() { index } else { alternate };
        let mut homeless = fingerprint;
        // Every (bucket, slot) we swapped, so a failed chain can be undone
        let mut trail: Vec<(usize, usize)> = Vec::new();

        for kick in 1..=self.max_kicks {
            let slot = rng.next_slot();
            homeless = buckets[target].swap(slot, homeless);
            trail.push((target, slot));

            target = alt_hashes.alternate_index(homeless, target, bucket_index_mask);
            if buckets[target].insert(homeless) {
                trace!(kicks = kick, bucket = target, "eviction chain found a free slot");
                return Ok(Placement::Relocated {
                    index: target,
                    kicks: kick,
                });
            }
        }

        for &(bucket, slot) in trail.iter().rev() {
            homeless = buckets[bucket].swap(slot, homeless);
        }
        debug_assert_eq!(homeless, fingerprint);
        trace!(kicks = self.max_kicks, "eviction chain exhausted, swaps rolled back");

        Err(FilterError::OutOfSpace {
            kicks: self.max_kicks,
        })
    }
}

impl Default for EvictionEngine {
    fn default() -> Self {
        EvictionEngine::new(DEFAULT_MAX_KICKS)
    }
}

/* -------------------- Unit Tests -------------------- */
