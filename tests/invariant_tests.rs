// Black-box invariant checks: ordering, the AVL height bound, and a
// randomized stress run. Structural internals (stored heights, per-node
// balance) are covered by the in-crate property tests.

use avl_index::AvlIndex;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// AVL worst-case height bound for n nodes.
fn height_bound(n: usize) -> f64 {
    1.44 * ((n + 2) as f64).log2()
}

fn assert_strictly_ascending(index: &AvlIndex) {
    let keys: Vec<_> = index.iter().map(|(k, _)| k.to_owned()).collect();
    for pair in keys.windows(2) {
        assert!(pair[0] < pair[1], "keys out of order: {pair:?}");
    }
    assert_eq!(keys.len(), index.len());
}

// =============================================================================
// Test 1: Sorted-ascending insert stays within the AVL height bound
// =============================================================================
#[test]
fn sorted_insert_respects_height_bound() {
    let n = 1000;
    let mut index = AvlIndex::new();
    for i in 0..n {
        index.insert(format!("key_{i:05}"), String::new());
    }

    assert_eq!(index.len(), n);
    assert!(
        (index.height() as f64) <= height_bound(n),
        "height {} exceeds AVL bound {:.2} for n = {n}",
        index.height(),
        height_bound(n)
    );
    assert_strictly_ascending(&index);
}

// =============================================================================
// Test 2: Sorted-descending insert, same bound
// =============================================================================
#[test]
fn reverse_sorted_insert_respects_height_bound() {
    let n = 1000;
    let mut index = AvlIndex::new();
    for i in (0..n).rev() {
        index.insert(format!("key_{i:05}"), String::new());
    }

    assert!((index.height() as f64) <= height_bound(n));
    assert_strictly_ascending(&index);
}

// =============================================================================
// Test 3: Randomized stress — shuffled inserts, then delete half
// =============================================================================
#[test]
fn random_insert_delete_stress() {
    let mut rng = StdRng::seed_from_u64(42);

    let mut keys: Vec<String> = (0..500).map(|i| format!("key_{i:04}")).collect();
    keys.shuffle(&mut rng);

    let mut index = AvlIndex::new();
    for key in &keys {
        index.insert(key.clone(), format!("val_{key}"));
    }
    assert_eq!(index.len(), 500);
    assert_strictly_ascending(&index);

    let (gone, kept) = keys.split_at(250);
    for key in gone {
        assert!(index.delete(key));
    }

    assert_eq!(index.len(), 250);
    assert!((index.height() as f64) <= height_bound(index.len()));
    assert_strictly_ascending(&index);

    for key in gone {
        assert_eq!(index.get(key), None);
    }
    for key in kept {
        assert_eq!(index.get(key), Some(format!("val_{key}").as_str()));
    }
}

// =============================================================================
// Test 4: Height bound survives interleaved insert/delete churn
// =============================================================================
#[test]
fn churn_keeps_tree_shallow() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut index = AvlIndex::new();

    for round in 0..10 {
        let mut keys: Vec<String> = (0..200).map(|i| format!("r{round}_k{i:03}")).collect();
        keys.shuffle(&mut rng);
        for key in &keys {
            index.insert(key.clone(), String::new());
        }
        // Drop most of this round again to churn the structure.
        for key in keys.iter().take(150) {
            assert!(index.delete(key));
        }
        assert!((index.height() as f64) <= height_bound(index.len()));
        assert_strictly_ascending(&index);
    }

    assert_eq!(index.len(), 10 * 50);
}
