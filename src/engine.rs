//! Traversal engine
//!
//! The descent over a [`serde_json::Value`] tree. A token loop drives the
//! walk: literal keys descend in place, wildcard and array tokens fan out
//! into independent sub-digs, absent keys either fail the call or switch it
//! into path creation. All writes go through the same walk, so a single
//! call can navigate, create and mutate at once.

use serde_json::{map::Entry, Map, Value};
use tracing::trace;

use crate::error::{DigError, ExpectedType};
use crate::options::{DigOptions, MakePath};
use crate::path::{Path, Token};
use crate::result::{Branch, DigResult, Found, Trace};

/// Whether a value can own child slots.
///
/// Objects and arrays are diggable; null, booleans, numbers and strings are
/// not.
pub fn is_diggable(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Digs into `root` along `path`.
///
/// Always returns a [`DigResult`]; resolution failures are embedded in its
/// `err` field instead of unwinding, so one record describes both outcomes.
///
/// ```
/// use burrow::{dig, DigOptions};
/// use serde_json::json;
///
/// let mut data = json!({"users": {"ada": {"age": 36}}});
///
/// let found = dig(&mut data, "users.ada.age", DigOptions::new());
/// assert_eq!(found.key.as_deref(), Some("age"));
/// assert_eq!(found.value, Some(json!(36)));
///
/// let missing = dig(&mut data, "users.bob.age", DigOptions::new());
/// assert!(missing.is_err());
/// ```
pub fn dig(root: &mut Value, path: impl Into<Path>, opts: DigOptions) -> DigResult {
    let path = path.into();
    let mut opts = opts;
    dig_with(root, &path, &mut opts)
}

/// Digs into `root` along `path`, promoting failure to `Err`.
///
/// The error is exactly the value [`dig`] would have embedded in
/// [`DigResult::err`]; the `Ok` half is the same record with `err` cleared.
///
/// ```
/// use burrow::{try_dig, DigError, DigOptions};
/// use serde_json::json;
///
/// let mut data = json!({"users": {}});
/// let err = try_dig(&mut data, "users.ada", DigOptions::new()).unwrap_err();
/// assert!(matches!(err, DigError::NoSuchKey { .. }));
/// ```
pub fn try_dig(
    root: &mut Value,
    path: impl Into<Path>,
    opts: DigOptions,
) -> Result<DigResult, DigError> {
    dig(root, path, opts).into_result()
}

/// Borrowed read along literal keys only.
///
/// A cheap companion to [`dig`] for when no options, trace or branching are
/// needed. Array nodes accept canonical decimal index keys. Returns `None`
/// on any miss and on wildcard or array tokens.
pub fn get<'a>(root: &'a Value, path: impl Into<Path>) -> Option<&'a Value> {
    let path = path.into();
    let mut current = root;
    for token in &path.tokens {
        let Token::Key(key) = token else {
            return None;
        };
        current = match current {
            Value::Object(map) => map.get(key)?,
            Value::Array(items) => items.get(parse_index(key)?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Mutable companion to [`get`].
pub fn get_mut<'a>(root: &'a mut Value, path: impl Into<Path>) -> Option<&'a mut Value> {
    let path = path.into();
    let mut current = root;
    for token in &path.tokens {
        let Token::Key(key) = token else {
            return None;
        };
        current = fetch_mut(current, key)?;
    }
    Some(current)
}

fn dig_with(root: &mut Value, path: &Path, opts: &mut DigOptions) -> DigResult {
    if !is_diggable(root) {
        return DigResult::invalid(root.clone());
    }
    if path.is_empty() {
        return DigResult::root_only(root.clone());
    }
    let trace = Trace::root(root);
    walk(root, &path.tokens, opts, trace)
}

/// The token loop. `trace` already holds the node `tokens[0]` will be
/// resolved against.
fn walk(root: &mut Value, tokens: &[Token], opts: &mut DigOptions, mut trace: Trace) -> DigResult {
    let mut current = root;
    let mut index = 0;
    loop {
        let last = index + 1 == tokens.len();
        match &tokens[index] {
            Token::Wildcard => {
                return branch_over_keys(current, &tokens[index + 1..], opts, trace);
            }
            Token::Array(key) => {
                return branch_over_array(current, key, &tokens[index + 1..], opts, trace);
            }
            Token::Key(key) => {
                if !exists(current, key, opts) {
                    if opts.make_path.is_some() {
                        if let Value::Object(map) = current {
                            return create_rest(map, key, &tokens[index + 1..], opts, trace);
                        }
                        // Creation only extends objects; a missing array
                        // index stays missing.
                    }
                    let err = DigError::NoSuchKey {
                        key: key.clone(),
                        path: trace.values(),
                    };
                    return DigResult::fail(trace, opts.stack, err);
                }
                // Existence was just verified, so the lookup cannot miss;
                // the fallback mirrors the absent case.
                let slot = match fetch_mut(current, key) {
                    Some(slot) => slot,
                    None => {
                        let err = DigError::NoSuchKey {
                            key: key.clone(),
                            path: trace.values(),
                        };
                        return DigResult::fail(trace, opts.stack, err);
                    }
                };
                if last {
                    apply_writes(slot, opts);
                    let value = slot.clone();
                    return DigResult::destination(trace, opts.stack, key.clone(), value);
                }
                if !is_diggable(slot) {
                    let err = DigError::TypeMismatch {
                        key: key.clone(),
                        value: slot.clone(),
                        expected_type: ExpectedType::Object,
                        path: trace.values(),
                    };
                    return DigResult::fail(trace, opts.stack, err);
                }
                trace.push(key, slot.clone());
                current = slot;
                index += 1;
            }
        }
    }
}

/// Wildcard fan-out over every key of `current`.
///
/// With nothing left to walk, every slot becomes a leaf branch. Otherwise
/// each diggable child gets its own sub-dig and children whose sub-dig
/// failed are dropped. Arrays branch by position, keyed by the decimal
/// index.
fn branch_over_keys(
    current: &mut Value,
    rest: &[Token],
    opts: &mut DigOptions,
    trace: Trace,
) -> DigResult {
    let mut entries: Vec<(String, Branch)> = Vec::new();
    match current {
        Value::Object(map) => {
            if rest.is_empty() {
                for (key, slot) in map.iter_mut() {
                    apply_writes(slot, opts);
                    entries.push((key.clone(), Branch::Leaf(slot.clone())));
                }
            } else {
                for (key, child) in map.iter_mut() {
                    if let Some(sub) = branch_into(child, rest, opts) {
                        entries.push((key.clone(), Branch::Dug(Box::new(sub))));
                    }
                }
            }
        }
        Value::Array(items) => {
            if rest.is_empty() {
                for (position, slot) in items.iter_mut().enumerate() {
                    apply_writes(slot, opts);
                    entries.push((position.to_string(), Branch::Leaf(slot.clone())));
                }
            } else {
                for (position, child) in items.iter_mut().enumerate() {
                    if let Some(sub) = branch_into(child, rest, opts) {
                        entries.push((position.to_string(), Branch::Dug(Box::new(sub))));
                    }
                }
            }
        }
        _ => {}
    }
    trace!(branches = entries.len(), "wildcard fan-out");
    DigResult::fan_out(trace, opts.stack, Found::Entries(entries))
}

/// Array fan-out: resolves `key`, requires an array, then branches over its
/// elements. The resolved array joins the trace before its elements are
/// visited.
fn branch_over_array(
    current: &mut Value,
    key: &str,
    rest: &[Token],
    opts: &mut DigOptions,
    mut trace: Trace,
) -> DigResult {
    if !exists(current, key, opts) {
        let err = DigError::NoSuchKey {
            key: key.to_string(),
            path: trace.values(),
        };
        return DigResult::fail(trace, opts.stack, err);
    }
    let slot = match fetch_mut(current, key) {
        Some(slot) => slot,
        None => {
            let err = DigError::NoSuchKey {
                key: key.to_string(),
                path: trace.values(),
            };
            return DigResult::fail(trace, opts.stack, err);
        }
    };
    let snapshot = slot.clone();
    let items = match slot {
        Value::Array(items) => items,
        _ => {
            let err = DigError::TypeMismatch {
                key: key.to_string(),
                value: snapshot,
                expected_type: ExpectedType::Array,
                path: trace.values(),
            };
            return DigResult::fail(trace, opts.stack, err);
        }
    };
    trace.push(key, snapshot);

    let mut branches: Vec<Branch> = Vec::new();
    if rest.is_empty() {
        for slot in items.iter_mut() {
            apply_writes(slot, opts);
            branches.push(Branch::Leaf(slot.clone()));
        }
    } else {
        for child in items.iter_mut() {
            if let Some(sub) = branch_into(child, rest, opts) {
                branches.push(Branch::Dug(Box::new(sub)));
            }
        }
    }
    trace!(key, branches = branches.len(), "array fan-out");
    DigResult::fan_out(trace, opts.stack, Found::Items(branches))
}

/// One branch of a fan-out: a fresh sub-dig rooted at the branch node.
/// Non-diggable children and failed sub-digs produce no branch.
fn branch_into(child: &mut Value, rest: &[Token], opts: &mut DigOptions) -> Option<DigResult> {
    if !is_diggable(child) {
        return None;
    }
    let sub_trace = Trace::root(child);
    let sub = walk(child, rest, opts, sub_trace);
    if sub.is_err() {
        return None;
    }
    Some(sub)
}

/// Path creation. `key` was found absent in `map`; every remaining level is
/// fabricated and the destination slot is seeded from `set`, then `default`,
/// then null.
///
/// Only plain keys can be fabricated. A fabricated node that is not an
/// object (a factory is free to return anything) stays installed but stops
/// the walk with a type mismatch.
fn create_rest(
    mut map: &mut Map<String, Value>,
    first: &str,
    rest: &[Token],
    opts: &mut DigOptions,
    mut trace: Trace,
) -> DigResult {
    let mut key = first;
    let mut remaining = rest;
    let mut depth = 0usize;
    loop {
        if remaining.is_empty() {
            let seeded = match (&opts.set, &opts.default) {
                (Some(value), _) => value.clone(),
                (None, Some(value)) => value.clone(),
                (None, None) => Value::Null,
            };
            let value = match opts.mutate.as_mut() {
                Some(mutate) => mutate(seeded),
                None => seeded,
            };
            map.insert(key.to_string(), value.clone());
            return DigResult::destination(trace, opts.stack, key.to_string(), value);
        }
        depth += 1;
        let node = match opts.make_path.as_mut() {
            Some(MakePath::Factory(factory)) => factory(map, key, depth),
            _ => Value::Object(Map::new()),
        };
        trace!(key, depth, "fabricating path node");
        let child = match map.entry(key.to_string()) {
            Entry::Vacant(entry) => entry.insert(node),
            Entry::Occupied(mut entry) => {
                entry.insert(node);
                entry.into_mut()
            }
        };
        map = match child {
            Value::Object(inner) => inner,
            other => {
                let err = DigError::TypeMismatch {
                    key: key.to_string(),
                    value: other.clone(),
                    expected_type: ExpectedType::Object,
                    path: trace.values(),
                };
                return DigResult::fail(trace, opts.stack, err);
            }
        };
        trace.push(key, Value::Object(map.clone()));
        key = match &remaining[0] {
            Token::Key(next) => next,
            other => {
                // Branch tokens have no meaning in a subtree that is being
                // fabricated.
                let err = DigError::InvalidArgument {
                    value: Value::String(other.to_string()),
                };
                return DigResult::fail(trace, opts.stack, err);
            }
        };
        remaining = &remaining[1..];
    }
}

/// Parses an array index key. Only the canonical decimal form counts:
/// `"01"` and `"+1"` are not indices.
fn parse_index(key: &str) -> Option<usize> {
    if key.starts_with('+') || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    key.parse().ok()
}

fn exists(node: &Value, key: &str, opts: &mut DigOptions) -> bool {
    let physically = match node {
        Value::Object(map) => map.contains_key(key),
        Value::Array(items) => parse_index(key).is_some_and(|index| index < items.len()),
        _ => false,
    };
    match opts.has.as_mut() {
        Some(has) => has(node, key) && physically,
        None => physically,
    }
}

fn fetch_mut<'a>(node: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => map.get_mut(key),
        Value::Array(items) => items.get_mut(parse_index(key)?),
        _ => None,
    }
}

/// Destination writes: `set` replaces the slot, then `mutate` transforms it.
fn apply_writes(slot: &mut Value, opts: &mut DigOptions) {
    if let Some(value) = &opts.set {
        *slot = value.clone();
    }
    if let Some(mutate) = opts.mutate.as_mut() {
        let taken = slot.take();
        *slot = mutate(taken);
    }
}
