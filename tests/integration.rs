use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

use ordtree::{
    Error, OrderedMap, OrderedMultiSet, OrderedSet, PositionedMultiSet, PositionedSet,
};

const ITEMS: usize = 2000;

/// Grounded on the teacher's `simulate`-against-`BTreeMap` pattern
/// (`examples/Ellipsis-Labs-sokoban/tests/test.rs`): insert a random batch
/// into both this crate's container and a `BTreeMap`/`BTreeSet` oracle,
/// then check every query agrees, then remove everything in a random order
/// and check agreement drains to empty together.
#[test]
fn random_insert_and_remove_matches_btreemap_oracle() {
    let mut rng = thread_rng();
    let container: OrderedMap<u64, u64> = OrderedMap::default();
    let mut oracle: BTreeMap<u64, u64> = BTreeMap::new();

    let mut keys = Vec::with_capacity(ITEMS);
    while keys.len() < ITEMS {
        let k: u64 = rng.gen_range(0..ITEMS as u64 * 4);
        if oracle.contains_key(&k) {
            continue;
        }
        let v: u64 = rng.gen();
        container.insert(k, v);
        oracle.insert(k, v);
        keys.push(k);
    }

    assert_eq!(container.len(), oracle.len());
    for (k, v) in &oracle {
        assert_eq!(container.get(k), Some(*v));
    }

    let mut order = keys.clone();
    order.shuffle(&mut rng);
    for k in order {
        assert!(container.contains(&k));
        let erased = container.erase_key(&k);
        assert_eq!(erased, 1);
        oracle.remove(&k);
        assert_eq!(container.len(), oracle.len());
    }
    assert!(container.is_empty());
}

/// Scenario 1 (spec.md §8): duplicate insert into a unique set is rejected,
/// not silently ignored with the wrong size.
#[test]
fn unique_set_rejects_duplicate_and_stays_sorted() {
    let set: OrderedSet<u64> = OrderedSet::default();
    assert!(set.insert(5).inserted);
    assert!(set.insert(3).inserted);
    assert!(set.insert(7).inserted);
    assert!(!set.insert(3).inserted);

    assert_eq!(set.len(), 3);
    let mut cursor = set.begin();
    let mut seen = Vec::new();
    while !cursor.is_null() {
        seen.push(cursor.key().unwrap());
        cursor.next().unwrap();
    }
    assert_eq!(seen, vec![3, 5, 7]);
}

/// Scenario 2 (spec.md §8): a multiset keeps every duplicate and answers
/// `count`/bound queries about them correctly.
#[test]
fn multiset_keeps_duplicates_and_answers_bounds() {
    let set: OrderedMultiSet<u64> = OrderedMultiSet::default();
    for _ in 0..5 {
        set.insert(1);
    }
    assert_eq!(set.len(), 5);
    assert_eq!(set.count(&1), 5);
    assert_eq!(set.lower_bound(&1).index().unwrap(), 0);
    assert_eq!(set.upper_bound(&1).index().unwrap(), 5);
}

/// Scenario 3 (spec.md §8): positioned set supports `O(log N)` rank/select
/// via cursor arithmetic.
#[test]
fn positioned_set_supports_rank_and_select() {
    let set: PositionedSet<u64> = PositionedSet::default();
    let mut values: Vec<u64> = (0..100).collect();
    values.shuffle(&mut thread_rng());
    set.insert_range(values);

    let mut cursor = set.begin();
    cursor.advance(37).unwrap();
    assert_eq!(cursor.key().unwrap(), 37);
    assert_eq!(set.find(&42).index().unwrap(), 42);

    let begin = set.begin();
    let end = set.end();
    let distance = ordtree::cursor::distance(&end, &begin).unwrap();
    assert_eq!(distance, 100);
}

/// Scenario 4 (spec.md §8): erasing by cursor returns a cursor to the
/// following element, and the indexed variant keeps its ranks consistent.
#[test]
fn erase_by_cursor_returns_successor_cursor() {
    let set: PositionedSet<u64> = PositionedSet::default();
    set.insert_range([10, 20, 30, 40, 50]);

    let target = set.find(&30);
    assert_eq!(target.index().unwrap(), 2);
    let next = set.erase_cursor(&target).unwrap();

    assert_eq!(set.len(), 4);
    assert_eq!(next.key().unwrap(), 40);
    assert_eq!(set.find(&40).index().unwrap(), 2);
    let mut remaining = Vec::new();
    let mut c = set.begin();
    while !c.is_null() {
        remaining.push(c.key().unwrap());
        c.next().unwrap();
    }
    assert_eq!(remaining, vec![10, 20, 40, 50]);
}

/// Scenario 5/6 (spec.md §8): bulk ascending construction succeeds on
/// sorted input and rejects unsorted input, leaving the container empty.
#[test]
fn bulk_ascending_build_succeeds_sorted_fails_unsorted() {
    let set: PositionedSet<u64> = PositionedSet::default();
    set.emplace_ascending(1..=8u64).unwrap();
    assert_eq!(set.len(), 8);

    let bad: OrderedSet<u64> = OrderedSet::default();
    let err = bad.emplace_ascending([1u64, 3, 2]).unwrap_err();
    assert_eq!(err, Error::OrderViolation);
    assert!(bad.is_empty());
}

/// Round-trip law (spec.md §8): `insert(x); erase(x)` restores size and
/// structure.
#[test]
fn insert_then_erase_restores_size() {
    let set: OrderedSet<u64> = OrderedSet::default();
    set.insert_range([1, 2, 3, 4, 5]);
    let before = set.len();
    set.insert(100);
    assert_eq!(set.erase_key(&100), 1);
    assert_eq!(set.len(), before);
}

/// Round-trip law (spec.md §8): `extract(cursor).and_then(insert)` restores
/// the tree to an element-equal state.
#[test]
fn extract_then_insert_node_restores_tree() {
    let set: OrderedSet<u64> = OrderedSet::default();
    set.insert_range([1, 2, 3, 4, 5]);
    let before = set.clone();

    let cursor = set.find(&3);
    let handle = set.extract_cursor(&cursor).unwrap();
    assert_eq!(set.len(), 4);
    let result = set.insert_node(handle);
    assert!(result.inserted);
    assert_eq!(set, before);
}

/// Round-trip law (spec.md §8): clearing a clone does not affect the
/// original.
#[test]
fn clone_then_clear_does_not_affect_original() {
    let set: OrderedSet<u64> = OrderedSet::default();
    set.insert_range([1, 2, 3]);
    let clone = set.clone();
    clone.clear();
    assert!(clone.is_empty());
    assert_eq!(set.len(), 3);
}

/// Quantified invariant 6 (spec.md §8): permutations of the same insert
/// sequence produce element-equal containers with identical root
/// subtree-sizes.
#[test]
fn insertion_order_does_not_affect_final_equality_or_root_size() {
    let mut rng = thread_rng();
    let base: Vec<u64> = (0..64).collect();

    let a: PositionedSet<u64> = PositionedSet::default();
    a.insert_range(base.clone());

    let mut shuffled = base.clone();
    shuffled.shuffle(&mut rng);
    let b: PositionedSet<u64> = PositionedSet::default();
    b.insert_range(shuffled);

    assert_eq!(a, b);
    assert_eq!(a.find(&0).index().unwrap(), b.find(&0).index().unwrap());
}

/// Cursors outlive their container's drop, and report staleness instead of
/// dangling (spec.md §4.2, "Cursors hold no ownership").
#[test]
fn cursor_reports_stale_after_container_drop() {
    let cursor;
    {
        let set: OrderedSet<u64> = OrderedSet::default();
        set.insert_range([1, 2, 3]);
        cursor = set.find(&2);
    }
    assert_eq!(cursor.key().unwrap_err(), Error::StaleCursor);
}

/// Cursors from two different containers cannot be compared (spec.md §7,
/// `CrossContainerCompare`).
#[test]
fn cross_container_cursor_comparison_fails() {
    let a: OrderedSet<u64> = OrderedSet::default();
    a.insert_range([1, 2, 3]);
    let b: OrderedSet<u64> = OrderedSet::default();
    b.insert_range([1, 2, 3]);

    let err = ordtree::cursor::distance(&a.begin(), &b.begin()).unwrap_err();
    assert_eq!(err, Error::CrossContainerCompare);
}

/// `at` on a unique map fails cleanly on a missing key (spec.md §4.4).
#[test]
fn map_at_reports_key_not_found() {
    let map: OrderedMap<u64, u64> = OrderedMap::default();
    map.insert(1, 10);
    assert_eq!(map.at(&1).unwrap(), 10);
    assert_eq!(map.at(&2).unwrap_err(), Error::KeyNotFound);
}

/// `insert_node` on a unique container with a colliding key must reject the
/// insertion outright: the existing element is untouched, and the caller's
/// own payload comes back in `node`, not overwritten (spec.md §4.4).
#[test]
fn insert_node_rejects_duplicate_without_overwriting_and_returns_payload() {
    let map: OrderedMap<u64, u64> = OrderedMap::default();
    map.insert(1, 100);

    let other: OrderedMap<u64, u64> = OrderedMap::default();
    other.insert(1, 999);
    let handle = other.extract_key(&1).unwrap();

    let result = map.insert_node(handle);
    assert!(!result.inserted);
    assert!(!result.node.is_empty());
    assert_eq!(map.get(&1), Some(100));
    assert_eq!(map.len(), 1);
}

/// `swap` bumps both sides' version counters: every cursor into either
/// container was observing the tree that is no longer there (spec.md §4.2).
#[test]
fn swap_bumps_both_versions_invalidating_existing_cursors() {
    let mut a: OrderedSet<u64> = OrderedSet::default();
    a.insert_range([1, 2, 3]);
    let mut b: OrderedSet<u64> = OrderedSet::default();
    b.insert_range([10, 20]);

    let cursor_a = a.begin();
    let cursor_b = b.begin();

    a.swap(&mut b);

    assert_eq!(cursor_a.key().unwrap_err(), Error::StaleCursor);
    assert_eq!(cursor_b.key().unwrap_err(), Error::StaleCursor);
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 3);
}

/// `rebalance` rebuilds the tree to minimum height without losing or
/// duplicating any element (spec.md §1, "rebalance-from-flat-list").
#[test]
fn rebalance_preserves_every_element() {
    let set: OrderedSet<u64> = OrderedSet::default();
    set.insert_range(0..100u64);

    set.rebalance();

    assert_eq!(set.len(), 100);
    for key in 0..100u64 {
        assert!(set.contains(&key));
    }
}
