//! Property-based tests using proptest.
//!
//! Invariants of the filter that must hold for any key set and any eviction choices.

use cuckoo_guard::{
    fingerprint_of, index_and_fingerprint, AltHashTable, CuckooFilter, FilterConfig,
    FilterError, MAX_FINGERPRINT, NULL_FINGERPRINT,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn arb_key() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..32)
}

fn arb_keys(max: usize) -> impl Strategy<Value = HashSet<Vec<u8>>> {
    prop::collection::hash_set(arb_key(), 1..max)
}

fn seeded(capacity: usize, seed: u64) -> CuckooFilter {
    CuckooFilter::with_config(FilterConfig::new(capacity).with_seed(seed)).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_fingerprint_never_zero(hash in any::<u64>()) {
        let fp = fingerprint_of(hash);
        prop_assert_ne!(fp, NULL_FINGERPRINT);
        prop_assert!((fp as u64) < MAX_FINGERPRINT);
    }

    #[test]
    fn prop_alternate_index_involution(fp in any::<u16>(), index in any::<usize>(), bits in 1u32..40) {
        let mask = (1usize << bits) - 1;
        let table = AltHashTable::global();
        let index = index & mask;
        let alt = table.alternate_index(fp, index, mask);
        prop_assert!(alt <= mask);
        prop_assert_eq!(table.alternate_index(fp, alt, mask), index);
    }

    #[test]
    fn prop_index_within_mask(key in arb_key(), bits in 1u32..32) {
        let mask = (1usize << bits) - 1;
        let (index, fp) = index_and_fingerprint(&key, mask);
        prop_assert!(index <= mask);
        prop_assert_ne!(fp, NULL_FINGERPRINT);
    }

    // Well below capacity every insertion succeeds and nothing is forgotten
    #[test]
    fn prop_no_false_negatives(keys in arb_keys(200), seed in any::<u64>()) {
        let mut cf = seeded(1024, seed);
        for key in &keys {
            prop_assert!(cf.insert(key));
        }
        prop_assert_eq!(cf.count(), keys.len());
        for key in &keys {
            prop_assert!(cf.lookup(key));
        }
    }

    // Past capacity, insertions fail in bounded time and accepted keys stay visible
    #[test]
    fn prop_overfill_keeps_accepted_keys(keys in arb_keys(400), seed in any::<u64>()) {
        let mut cf = CuckooFilter::with_config(
            FilterConfig::new(64).with_max_kicks(50).with_seed(seed),
        ).unwrap();
        let mut accepted = Vec::new();
        for key in &keys {
            match cf.try_insert(key) {
                Ok(()) => accepted.push(key),
                Err(e) => {
                    prop_assert_eq!(e, FilterError::OutOfSpace { kicks: 50 });
                }
            }
        }
        prop_assert!(accepted.len() <= cf.capacity());
        prop_assert_eq!(cf.count(), accepted.len());
        for key in accepted {
            prop_assert!(cf.lookup(key));
        }
    }

    #[test]
    fn prop_slots_are_empty_or_fingerprints(
        ops in prop::collection::vec((arb_key(), any::<bool>()), 1..300),
        seed in any::<u64>(),
    ) {
        let mut cf = seeded(128, seed);
        for (key, insert) in &ops {
            if *insert {
                cf.insert(key);
            } else {
                cf.delete(key);
            }
        }
        let mut occupied = 0;
        for bucket in cf.buckets() {
            for &slot in bucket.slots() {
                prop_assert!(slot == NULL_FINGERPRINT || (slot as u64) < MAX_FINGERPRINT);
                if slot != NULL_FINGERPRINT {
                    occupied += 1;
                }
            }
        }
        prop_assert_eq!(occupied, cf.count());
    }

    #[test]
    fn prop_delete_absent_is_noop(keys in arb_keys(50), probe in arb_key(), seed in any::<u64>()) {
        let mut cf = seeded(1024, seed);
        for key in &keys {
            cf.insert(key);
        }
        prop_assume!(!cf.lookup(&probe));
        let before = cf.buckets().to_vec();
        prop_assert!(!cf.delete(&probe));
        prop_assert_eq!(cf.buckets(), &before[..]);
        prop_assert_eq!(cf.count(), keys.len());
    }

    #[test]
    fn prop_delete_removes_inserted(keys in arb_keys(100), seed in any::<u64>()) {
        let mut cf = seeded(1024, seed);
        for key in &keys {
            prop_assert!(cf.insert(key));
        }
        for key in &keys {
            prop_assert!(cf.delete(key));
        }
        prop_assert!(cf.is_empty());
        prop_assert!(cf.buckets().iter().all(|b| b.is_empty()));
    }
}
