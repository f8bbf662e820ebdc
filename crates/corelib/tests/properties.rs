//! Property tests for digests and ring membership.

use std::collections::BTreeSet;

use proptest::prelude::*;
use ringstore_core::{hash, hash_in_range, Error, HashRing, Node};

fn node_ids() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[a-z0-9]{1,8}", 1..8)
}

proptest! {
    #[test]
    fn hash_is_deterministic_and_non_negative(input in ".*") {
        let h = hash(&input);
        prop_assert_eq!(h, hash(&input));
        prop_assert!(h <= i32::MAX as u32);
    }

    #[test]
    fn hash_in_range_stays_in_range(input in ".*", range in 1i64..=i64::from(i32::MAX)) {
        let v = hash_in_range(&input, range).unwrap();
        prop_assert!(i64::from(v) < range);
    }

    #[test]
    fn hash_in_range_rejects_non_positive(input in ".*", range in i64::MIN..=0) {
        prop_assert!(matches!(hash_in_range(&input, range), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn every_key_resolves_to_one_member(ids in node_ids(), keys in prop::collection::vec(".*", 1..50)) {
        let ring = HashRing::new();
        for id in &ids {
            ring.add_node(Node::new(id.as_str())).unwrap();
        }
        for key in &keys {
            let owner = ring.resolve(key).unwrap();
            prop_assert!(ids.contains(owner.id()));
            let again = ring.resolve(key).unwrap();
            prop_assert_eq!(owner.id(), again.id());
        }
    }

    #[test]
    fn add_then_remove_restores_state(ids in node_ids(), extra in "[A-Z]{1,8}") {
        // Upper-case ids never clash with the lower-case members.
        let ring = HashRing::new();
        for id in &ids {
            ring.add_node(Node::new(id.as_str())).unwrap();
        }
        let (count, entries) = (ring.node_count(), ring.entries());

        ring.add_node(Node::new(extra.as_str())).unwrap();
        ring.remove_node(&extra).unwrap();

        prop_assert_eq!(ring.node_count(), count);
        prop_assert_eq!(ring.entries(), entries);
    }
}

#[test]
fn empty_ring_never_resolves() {
    let ring = HashRing::new();
    for key in ["", "a", "report.txt"] {
        assert!(matches!(ring.resolve(key), Err(Error::EmptyRing)));
    }
}
