//! Source of the random choices made while evicting

use crate::bucket::BUCKET_SIZE;

use rand::{Rng, RngCore};

/// Random choices the eviction chain needs
///
/// Implemented for every `rand::RngCore`, so a seeded `ChaCha8Rng` gives repeatable eviction traces.
pub trait EvictionRng {
    /// One unbiased bit, used to pick the bucket the chain starts from
    fn next_bit(&mut self) -> bool;

    /// A uniformly chosen slot in `[0, BUCKET_SIZE)`
    fn next_slot(&mut self) -> usize;
}

impl<R: RngCore> EvictionRng for R {
    #[inline]
    fn next_bit(&mut self) -> bool {
        self.next_u64() & 1 == 0
    }

    #[inline]
    fn next_slot(&mut self) -> usize {
        self.gen_range(0..BUCKET_SIZE)
    }
}

/* -------------------- Unit Tests -------------------- */
