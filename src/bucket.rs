//! Fixed capacity bucket of fingerprints

use crate::hash::{Fingerprint, NULL_FINGERPRINT};

use core::fmt;

/// Each bucket holds 4 fingerprints
pub const BUCKET_SIZE: usize = 4;

/// Fingerprints that hashed to the same index
///
/// Slots are unordered and an empty slot holds `NULL_FINGERPRINT`. The same fingerprint may sit in several slots, since distinct keys can collide and `insert` does not check for duplicates.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct Bucket {
    slots: [Fingerprint; BUCKET_SIZE],
}

impl Bucket {
    pub fn new() -> Bucket {
        Bucket::default()
    }

    /// Write `fingerprint` into the first empty slot
    ///
    /// True means success, false means the bucket was full
    #[inline]
    pub fn insert(&mut self, fingerprint: Fingerprint) -> bool {
        match self.position(NULL_FINGERPRINT) {
            Some(slot) => {
                self.slots[slot] = fingerprint;
                true
            }
            None => false,
        }
    }

    /// Clear the first slot holding `fingerprint`
    ///
    /// Only one occurrence is removed per call, matching one prior insert
    #[inline]
    pub fn delete(&mut self, fingerprint: Fingerprint) -> bool {
        match self.position(fingerprint) {
            Some(slot) => {
                self.slots[slot] = NULL_FINGERPRINT;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, fingerprint: Fingerprint) -> bool {
        self.position(fingerprint).is_some()
    }

    /// Swap an existing fingerprint for a new one (the Cuckoo mechanism), returning the evicted one
    ///
    /// # Panics
    ///
    /// If `slot >= BUCKET_SIZE`
    #[inline]
    pub fn swap(&mut self, slot: usize, fingerprint: Fingerprint) -> Fingerprint {
        core::mem::replace(&mut self.slots[slot], fingerprint)
    }

    /// Delete all fingerprints in the bucket
    pub fn reset(&mut self) {
        self.slots = [NULL_FINGERPRINT; BUCKET_SIZE];
    }

    pub fn is_full(&self) -> bool {
        self.position(NULL_FINGERPRINT).is_none()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|&&slot| slot != NULL_FINGERPRINT)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw slot values, empty slots included
    pub fn slots(&self) -> &[Fingerprint; BUCKET_SIZE] {
        &self.slots
    }

    #[inline]
    fn position(&self, needle: Fingerprint) -> Option<usize> {
        self.slots.iter().position(|&slot| slot == needle)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for slot in &self.slots {
            write!(f, "{:5} ", slot)?;
        }
        write!(f, "]")
    }
}

/* -------------------- Unit Tests -------------------- */
