//! Property-based tests for burrow's traversal engine
//!
//! Uses proptest to verify invariants across randomly generated trees and
//! paths: planted leaves are found, reads never mutate, writes round-trip,
//! path creation builds what it promises and the two error contracts agree.
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use serde_json::{json, Map, Value};

use burrow::{dig, get, try_dig, DigError, DigOptions, Path};

// ============================================================================
// Test Strategies
// ============================================================================

/// Strategy for a chain of plain lowercase keys
fn keys_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}", 1..6)
}

/// Strategy for scalar leaf values
fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z0-9]{0,12}".prop_map(Value::from),
    ]
}

/// Strategy for arbitrary JSON trees a few levels deep
fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Strategy for one path segment: a key, a wildcard or an array branch
fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,4}".prop_map(String::from),
        Just("*".to_string()),
        "[a-z]{1,4}".prop_map(|k| format!("{k}[]")),
    ]
}

/// Strategy for dotted paths mixing all token kinds
fn any_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 0..4).prop_map(|segments| segments.join("."))
}

/// Builds the single-branch tree `keys[0] -> keys[1] -> ... -> leaf`.
fn chain(keys: &[String], leaf: &Value) -> Value {
    let mut node = leaf.clone();
    for key in keys.iter().rev() {
        let mut map = Map::new();
        map.insert(key.clone(), node);
        node = Value::Object(map);
    }
    node
}

// ============================================================================
// Resolution Properties
// ============================================================================

proptest! {
    /// A leaf planted along a key chain is found, with the full trace
    #[test]
    fn prop_literal_digs_find_planted_leaves(
        keys in keys_strategy(),
        leaf in leaf_strategy()
    ) {
        let mut tree = chain(&keys, &leaf);
        let path = Path::from(keys.clone());

        let result = dig(&mut tree, path.clone(), DigOptions::new());
        prop_assert_eq!(result.err, None);
        prop_assert_eq!(result.value, Some(leaf.clone()));
        prop_assert_eq!(result.key.as_deref(), keys.last().map(|k| k.as_str()));
        prop_assert_eq!(result.path.len(), keys.len());

        prop_assert_eq!(get(&tree, path), Some(&leaf));
    }

    /// An unknown key at the root is a NoSuchKey with a one-node trace
    #[test]
    fn prop_unknown_key_is_no_such_key(
        keys in keys_strategy(),
        leaf in leaf_strategy()
    ) {
        let mut tree = chain(&keys, &leaf);
        let mut wrong = keys.clone();
        wrong[0] = "ZZZ".to_string();

        let result = dig(&mut tree, Path::from(wrong), DigOptions::new());
        match result.err {
            Some(DigError::NoSuchKey { key, path }) => {
                prop_assert_eq!(key, "ZZZ");
                prop_assert_eq!(path.len(), 1);
            }
            other => prop_assert!(false, "expected NoSuchKey, got {:?}", other),
        }
    }

    /// Descending through a scalar leaf is a TypeMismatch naming the leaf
    #[test]
    fn prop_scalar_leaf_blocks_descent(
        keys in keys_strategy(),
        leaf in leaf_strategy()
    ) {
        let mut tree = chain(&keys, &leaf);
        let mut extended = keys.clone();
        extended.push("deeper".to_string());

        let result = dig(&mut tree, Path::from(extended), DigOptions::new());
        match result.err {
            Some(DigError::TypeMismatch { key, value, .. }) => {
                prop_assert_eq!(&key, keys.last().unwrap());
                prop_assert_eq!(value, leaf);
            }
            other => prop_assert!(false, "expected TypeMismatch, got {:?}", other),
        }
    }

    /// A wildcard visits every key of the node it branches over
    #[test]
    fn prop_wildcard_visits_every_key(
        entries in prop::collection::btree_map("[a-z]{1,6}", any::<i64>(), 1..8)
    ) {
        let mut tree = Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), json!({"score": v})))
                .collect(),
        );

        let result = dig(&mut tree, "*.score", DigOptions::new());
        let found = result.found.unwrap();
        prop_assert_eq!(found.len(), entries.len());
        for (key, score) in &entries {
            prop_assert_eq!(
                found.get(key.as_str()).and_then(|b| b.value()),
                Some(&json!(*score))
            );
        }
    }
}

// ============================================================================
// Write Properties
// ============================================================================

proptest! {
    /// set at an existing destination is read back by the next dig
    #[test]
    fn prop_set_round_trips(
        keys in keys_strategy(),
        leaf in leaf_strategy(),
        replacement in leaf_strategy()
    ) {
        let mut tree = chain(&keys, &leaf);
        let path = Path::from(keys);

        let written = dig(
            &mut tree,
            path.clone(),
            DigOptions::new().set(replacement.clone()),
        );
        prop_assert_eq!(written.value, Some(replacement.clone()));

        let read = dig(&mut tree, path, DigOptions::new());
        prop_assert_eq!(read.value, Some(replacement));
    }

    /// Path creation materializes the whole chain with objects in between
    #[test]
    fn prop_creation_builds_the_chain(
        keys in keys_strategy(),
        leaf in leaf_strategy()
    ) {
        let mut tree = json!({});
        let path = Path::from(keys.clone());

        let result = dig(
            &mut tree,
            path.clone(),
            DigOptions::new().make_path().set(leaf.clone()),
        );
        prop_assert_eq!(result.err, None);
        prop_assert_eq!(get(&tree, path), Some(&leaf));

        for end in 1..keys.len() {
            let prefix = Path::from(keys[..end].to_vec());
            let node = get(&tree, prefix);
            prop_assert!(node.is_some_and(Value::is_object));
        }
    }

    /// Option-free digs never change the tree, whatever the path does
    #[test]
    fn prop_reads_never_mutate(
        tree in value_strategy(),
        path in any_path_strategy()
    ) {
        let mut subject = tree.clone();
        dig(&mut subject, path.as_str(), DigOptions::new());
        prop_assert_eq!(subject, tree);
    }
}

// ============================================================================
// Contract Properties
// ============================================================================

proptest! {
    /// dig's embedded error and try_dig's raised error always agree
    #[test]
    fn prop_error_contracts_agree(
        tree in value_strategy(),
        path in any_path_strategy()
    ) {
        let mut a = tree.clone();
        let mut b = tree;
        let embedded = dig(&mut a, path.as_str(), DigOptions::new()).err;
        let raised = try_dig(&mut b, path.as_str(), DigOptions::new()).err();
        prop_assert_eq!(embedded, raised);
    }

    /// The stack, when present, mirrors the path and links both ways
    #[test]
    fn prop_stack_mirrors_path(
        tree in value_strategy(),
        path in any_path_strategy()
    ) {
        let mut subject = tree.clone();
        let result = dig(&mut subject, path.as_str(), DigOptions::new().stack());

        if let Some(stack) = &result.stack {
            prop_assert_eq!(stack.len(), result.path.len());
            for (index, frame) in stack.iter().enumerate() {
                prop_assert_eq!(&frame.value, &result.path[index]);
                prop_assert_eq!(frame.prev, index.checked_sub(1));
                let next = if index + 1 < stack.len() {
                    Some(index + 1)
                } else {
                    None
                };
                prop_assert_eq!(frame.next, next);
            }
            if !stack.is_empty() {
                prop_assert_eq!(&stack[0].key, &None);
            }
        }
    }

    /// Canonical dotted paths survive a parse/display round trip
    #[test]
    fn prop_canonical_paths_round_trip(
        segments in prop::collection::vec(segment_strategy(), 0..5)
    ) {
        let joined = segments.join(".");
        prop_assert_eq!(Path::from(joined.as_str()).to_string(), joined);
    }
}
