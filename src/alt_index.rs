//! Alternate bucket index derivation
//!
//! An evicted fingerprint must be moved to its other candidate bucket without access to the original key. We get there by XORing the current index with a hash of the fingerprint itself, which is its own inverse under a fixed mask.
//!
//! Hashing every fingerprint on every kick is wasteful, so the hashes of all 2^16 possible fingerprints are computed once and shared for the rest of the process.

use crate::hash::{Fingerprint, MAX_FINGERPRINT};

use core::fmt;
use std::sync::OnceLock;
use xxhash_rust::xxh3::xxh3_64;

/// Number of entries in a complete table, one per possible fingerprint value
pub const ALT_HASH_TABLE_LEN: usize = MAX_FINGERPRINT as usize + 1;

static GLOBAL_TABLE: OnceLock<AltHashTable> = OnceLock::new();

/// Precomputed fingerprint hashes, read-only once built
pub struct AltHashTable {
    hashes: Box<[u64]>,
}

impl AltHashTable {
    /// Build the complete table: entry `n` is the xxh3 hash of `n` as two little-endian bytes
    pub fn new() -> AltHashTable {
        let hashes = (0..ALT_HASH_TABLE_LEN)
            .map(|n| xxh3_64(&(n as u16).to_le_bytes()))
            .collect();
        AltHashTable { hashes }
    }

    /// Build a table from explicit hash values, entry `n` belonging to fingerprint `n`
    ///
    /// Only useful for tests that want readable index arithmetic. Fingerprints beyond the end of the table cannot be looked up.
    pub fn from_hashes(hashes: Vec<u64>) -> AltHashTable {
        AltHashTable {
            hashes: hashes.into_boxed_slice(),
        }
    }

    /// The process-wide complete table, built on first use
    pub fn global() -> &'static AltHashTable {
        GLOBAL_TABLE.get_or_init(AltHashTable::new)
    }

    /// Hash of a fingerprint
    ///
    /// # Panics
    ///
    /// If the table is a synthetic one shorter than `fingerprint + 1` entries.
    #[inline]
    pub fn hash_of(&self, fingerprint: Fingerprint) -> u64 {
        self.hashes[fingerprint as usize]
    }

    /// Number of fingerprints covered by the table
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Compute the other candidate bucket of `fingerprint` given one of its buckets
    ///
    /// This is Equation 2 in Section 3.1 of the paper, using a precomputed hash of the fingerprint. Applying it twice returns the index we started from.
    #[inline]
    pub fn alternate_index(
        &self,
        fingerprint: Fingerprint,
        index: usize,
        bucket_index_mask: usize,
    ) -> usize {
        (index ^ self.hash_of(fingerprint) as usize) & bucket_index_mask
    }
}

impl Default for AltHashTable {
    fn default() -> Self {
        AltHashTable::new()
    }
}

// The full table is 64k entries, nobody wants that in a debug print
impl fmt::Debug for AltHashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AltHashTable")
            .field("len", &self.hashes.len())
            .finish()
    }
}

/* -------------------- Unit Tests -------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_table_covers_every_fingerprint() {
        let table = AltHashTable::global();
        assert_eq!(table.len(), 65536);
        assert_eq!(table.hash_of(0), xxh3_64(&[0, 0]));
        assert_eq!(table.hash_of(0x0102), xxh3_64(&[0x02, 0x01]));
        assert_eq!(table.hash_of(u16::MAX), xxh3_64(&[0xFF, 0xFF]));
    }

    #[test]
    fn global_table_is_built_once() {
        let a = AltHashTable::global() as *const AltHashTable;
        let b = AltHashTable::global() as *const AltHashTable;
        assert_eq!(a, b);
    }

    #[test]
    fn synthetic_table_alternate_index() {
        let table = AltHashTable::from_hashes(vec![0, 0b01, 0b10, 0b1111_0111]);
        let mask = 0b11;
        assert_eq!(table.alternate_index(1, 0, mask), 1);
        assert_eq!(table.alternate_index(2, 1, mask), 3);
        // High bits of the hash are masked away
        assert_eq!(table.alternate_index(3, 2, mask), 1);
        // A fingerprint hashing to zero maps a bucket onto itself
        assert_eq!(table.alternate_index(0, 2, mask), 2);
    }

    #[test]
    fn alternate_index_is_an_involution() {
        let table = AltHashTable::global();
        for mask in [0b1usize, 0b11, 0xFFF, (1 << 24) - 1] {
            for fp in (1..=u16::MAX).step_by(97) {
                for index in [0usize, 1, 2, 3, 1234, 99_999] {
                    let index = index & mask;
                    let alt = table.alternate_index(fp, index, mask);
                    assert!(alt <= mask);
                    assert_eq!(table.alternate_index(fp, alt, mask), index);
                }
            }
        }
    }

    #[test]
    fn debug_does_not_dump_entries() {
        let table = AltHashTable::from_hashes(vec![1, 2, 3]);
        assert_eq!(format!("{:?}", table), "AltHashTable { len: 3 }");
    }
}
