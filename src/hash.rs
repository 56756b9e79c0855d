//! Key hashing and fingerprint derivation
//!
//! One 64-bit xxh3 digest of the key feeds both the fingerprint (most significant bits) and the primary bucket index (least significant bits), so the two never draw from the same bits.

use xxhash_rust::xxh3::xxh3_64;

/// A fingerprint is the 16 bit proxy we store instead of the key
pub type Fingerprint = u16;

/// Slot value reserved for "empty"
pub const NULL_FINGERPRINT: Fingerprint = 0;
/// Width of a fingerprint in bits
pub const FINGERPRINT_SIZE_BITS: u32 = 16;
/// Largest value representable in a fingerprint
pub const MAX_FINGERPRINT: u64 = (1 << FINGERPRINT_SIZE_BITS) - 1;

/// Hash raw key bytes with xxh3
#[inline]
pub fn hash_key(key: &[u8]) -> u64 {
    xxh3_64(key)
}

/// Compute a fingerprint from the most significant bits of a hash digest
///
/// The fingerprint cannot be zero, because zero marks an empty slot. Valid fingerprints lie in `[1, MAX_FINGERPRINT - 1]`.
#[inline]
pub fn fingerprint_of(hash: u64) -> Fingerprint {
    let shifted = hash >> (64 - FINGERPRINT_SIZE_BITS);
    (shifted % (MAX_FINGERPRINT - 1) + 1) as Fingerprint
}

/// Compute the primary bucket index and fingerprint for a key
///
/// `bucket_index_mask` must be `bucket_count - 1` for a power of two bucket count.
#[inline]
pub fn index_and_fingerprint(key: &[u8], bucket_index_mask: usize) -> (usize, Fingerprint) {
    let hash = hash_key(key);
    let fingerprint = fingerprint_of(hash);
    // Truncating to usize keeps the low bits, which is all the mask needs
    let index = (hash as usize) & bucket_index_mask;
    (index, fingerprint)
}

/* -------------------- Unit Tests -------------------- */
