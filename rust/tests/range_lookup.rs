//! Integration tests for range-tree lookups: the fixed probe matrix for
//! every key type, plus randomized consistency checks against a
//! `BTreeMap` range oracle.

use paste::paste;
use rand::prelude::*;
use rangedelta::{BalancedBinaryTree, KeyType, ReadOnlyBinaryRangeTree, TwoColumnKey};
use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

/// The shared fixture: keys 10, 20, ..., 100 mapping to themselves.
fn decades() -> BTreeMap<i32, i32> {
    (1..=10).map(|i| (i * 10, i * 10)).collect()
}

macro_rules! lookup_matrix_tests {
    ($($name:ident: $key_type:expr => [$(($probe:expr, $expected:expr)),+ $(,)?];)+) => {
        $(paste! {
            #[test]
            fn [<lookup_matrix_ $name>]() {
                let tree = ReadOnlyBinaryRangeTree::new(decades(), $key_type).unwrap();
                $(
                    assert_eq!(
                        tree.get(&$probe).copied(),
                        $expected,
                        "{:?} lookup of {}",
                        $key_type,
                        $probe,
                    );
                )+
            }
        })+
    };
}

lookup_matrix_tests! {
    lower_bound: KeyType::LowerBound => [
        (10, None),
        (11, Some(10)),
        (30, Some(20)),
        (35, Some(30)),
        (5, None),
        (100, Some(90)),
        (1000, Some(100)),
    ];
    lower_bound_equal: KeyType::LowerBoundEqual => [
        (35, Some(30)),
        (10, Some(10)),
        (5, None),
        (100, Some(100)),
        (101, Some(100)),
    ];
    upper_bound: KeyType::UpperBound => [
        (26, Some(30)),
        (30, Some(40)),
        (100, None),
        (99, Some(100)),
        (5, Some(10)),
    ];
    upper_bound_equal: KeyType::UpperBoundEqual => [
        (26, Some(30)),
        (100, Some(100)),
        (101, None),
        (10, Some(10)),
        (5, Some(10)),
    ];
}

#[test]
fn two_column_matrix_with_gap() {
    let entries = BTreeMap::from([(TwoColumnKey::new(0, 2), 1), (TwoColumnKey::new(4, 6), 5)]);
    let tree = ReadOnlyBinaryRangeTree::with_two_column_keys(entries).unwrap();

    for (probe, expected) in [
        (0, Some(1)),
        (1, Some(1)),
        (2, Some(1)),
        (3, None),
        (4, Some(5)),
        (6, Some(5)),
        (7, None),
        (-5, None),
    ] {
        assert_eq!(tree.get(&probe).copied(), expected, "probe {}", probe);
    }
}

#[test]
fn single_bound_lookups_agree_with_btreemap_oracle() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..20 {
        let keys: BTreeMap<i64, i64> = (0..200)
            .map(|_| rng.gen_range(-10_000..10_000))
            .map(|k| (k, k))
            .collect();

        let trees: Vec<_> = [
            KeyType::LowerBound,
            KeyType::LowerBoundEqual,
            KeyType::UpperBound,
            KeyType::UpperBoundEqual,
        ]
        .into_iter()
        .map(|kt| ReadOnlyBinaryRangeTree::new(keys.clone(), kt).unwrap())
        .collect();

        for _ in 0..500 {
            let probe = rng.gen_range(-11_000..11_000);
            let expected = [
                keys.range(..probe).next_back(),
                keys.range(..=probe).next_back(),
                keys.range((Excluded(probe), Unbounded)).next(),
                keys.range(probe..).next(),
            ];
            for (tree, oracle) in trees.iter().zip(expected) {
                assert_eq!(
                    tree.get(&probe),
                    oracle.map(|(_, v)| v),
                    "{:?} lookup of {} disagrees with oracle",
                    tree.key_type(),
                    probe,
                );
            }
        }
    }
}

#[test]
fn two_column_lookups_agree_with_interval_scan() {
    let mut rng = StdRng::seed_from_u64(0xbee);

    for _ in 0..20 {
        // Disjoint intervals from a sorted pool of distinct boundaries.
        let boundaries: Vec<i64> = {
            let pool: std::collections::BTreeSet<i64> =
                (0..120).map(|_| rng.gen_range(-5_000..5_000)).collect();
            pool.into_iter().collect()
        };
        let intervals: Vec<(i64, i64)> = boundaries
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1] - 1))
            .filter(|(lower, upper)| lower <= upper)
            .collect();

        let entries: BTreeMap<TwoColumnKey<i64>, usize> = intervals
            .iter()
            .enumerate()
            .map(|(index, &(lower, upper))| (TwoColumnKey::new(lower, upper), index))
            .collect();
        let tree = ReadOnlyBinaryRangeTree::with_two_column_keys(entries).unwrap();

        for _ in 0..500 {
            let probe = rng.gen_range(-5_500..5_500);
            let expected = intervals
                .iter()
                .position(|&(lower, upper)| probe >= lower && probe <= upper);
            assert_eq!(tree.get(&probe).copied(), expected, "probe {}", probe);
        }
    }
}

#[test]
fn balanced_tree_matches_btreemap_contents() {
    let mut rng = StdRng::seed_from_u64(42);
    let entries: BTreeMap<u32, String> = (0..5_000)
        .map(|_| rng.gen::<u32>())
        .map(|k| (k, format!("value_{}", k)))
        .collect();

    let tree = BalancedBinaryTree::from_map(entries.clone());
    assert_eq!(tree.len(), entries.len());
    assert!(tree.check_invariants());

    // Every key resolves, in-order traversal matches the map.
    for (key, value) in &entries {
        assert_eq!(tree.get(key), Some(value));
    }
    assert!(tree.items().map(|(k, _)| *k).eq(entries.keys().copied()));
}

#[test]
fn range_tree_is_shareable_across_threads() {
    let tree = std::sync::Arc::new(
        ReadOnlyBinaryRangeTree::new(decades(), KeyType::LowerBoundEqual).unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let tree = std::sync::Arc::clone(&tree);
            std::thread::spawn(move || {
                for probe in 0..200 {
                    let expected = (probe >= 10).then(|| ((probe / 10) * 10).min(100));
                    assert_eq!(tree.get(&probe).copied(), expected, "worker {}", worker);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
