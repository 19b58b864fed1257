use super::*;
use super::node::{Link, height};

use std::collections::BTreeMap;

use proptest::prelude::*;

/// Walk the whole tree asserting every structural invariant.
fn validate(index: &AvlIndex) {
    let reachable = validate_node(&index.root, None, None);
    assert_eq!(
        reachable, index.len,
        "maintained len must match reachable node count"
    );
}

/// Returns the subtree's node count; `min`/`max` are the exclusive key
/// bounds inherited from the ancestors.
fn validate_node(link: &Link, min: Option<&str>, max: Option<&str>) -> usize {
    let Some(node) = link.as_deref() else {
        return 0;
    };

    if let Some(min) = min {
        assert!(
            node.key.as_str() > min,
            "BST order violated: {:?} under a {:?} lower bound",
            node.key,
            min
        );
    }
    if let Some(max) = max {
        assert!(
            node.key.as_str() < max,
            "BST order violated: {:?} under a {:?} upper bound",
            node.key,
            max
        );
    }

    let left = validate_node(&node.left, min, Some(node.key.as_str()));
    let right = validate_node(&node.right, Some(node.key.as_str()), max);

    let expected = 1 + height(&node.left).max(height(&node.right));
    assert_eq!(
        node.height, expected,
        "stored height of {:?} must match its children",
        node.key
    );
    let bf = node.balance_factor();
    assert!((-1..=1).contains(&bf), "balance factor out of range: {bf}");

    1 + left + right
}

#[derive(Clone, Debug)]
enum Op {
    Insert(String, String),
    Delete(String),
    Get(String),
    Clear,
}

// Tiny alphabet so inserts, deletes and lookups hit the same keys often.
fn key_strategy() -> impl Strategy<Value = String> + Clone {
    "[a-e]{0,3}"
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (key_strategy(), "[0-9]{3}").prop_map(|(k, v)| Op::Insert(k, v)),
        2 => key_strategy().prop_map(Op::Delete),
        2 => key_strategy().prop_map(Op::Get),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    /// Any op sequence behaves like a `BTreeMap` and never breaks the
    /// structural invariants.
    #[test]
    fn ops_match_btreemap_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut index = AvlIndex::new();
        let mut model: BTreeMap<String, String> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    model.insert(k.clone(), v.clone());
                    index.insert(k, v);
                }
                Op::Delete(k) => {
                    let expected = model.remove(&k).is_some();
                    prop_assert_eq!(index.delete(&k), expected);
                }
                Op::Get(k) => {
                    prop_assert_eq!(index.get(&k), model.get(&k).map(String::as_str));
                }
                Op::Clear => {
                    model.clear();
                    index.clear();
                    prop_assert_eq!(index.rotation_count(), 0);
                }
            }
            validate(&index);
            prop_assert_eq!(index.len(), model.len());
        }

        let entries: Vec<_> = index.iter().collect();
        let expected: Vec<_> = model.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        prop_assert_eq!(entries, expected);
    }

    /// Serialize-then-deserialize preserves contents for any tree.
    #[test]
    fn round_trip_preserves_contents(
        entries in prop::collection::btree_map("[a-z]{1,6}", "[0-9]{1,8}", 0..50),
    ) {
        let mut index = AvlIndex::new();
        for (k, v) in &entries {
            index.insert(k.clone(), v.clone());
        }

        let mut buf = Vec::new();
        index.serialize_into(&mut buf).unwrap();

        let mut restored = AvlIndex::new();
        let applied = restored
            .deserialize_from(buf.as_slice(), MalformedPolicy::Fail)
            .unwrap();

        prop_assert_eq!(applied, entries.len());
        validate(&restored);

        let restored_entries: Vec<(String, String)> = restored
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        let expected: Vec<(String, String)> = entries.into_iter().collect();
        prop_assert_eq!(restored_entries, expected);
    }
}
