//! Result records for dig calls
//!
//! Every dig produces a [`DigResult`]. Which fields are populated depends on
//! how the traversal ended: a literal destination fills `key`/`value`, a
//! wildcard or array branch point fills `found`, a failed step fills `err`.
//! `path` (and `stack`, on request) snapshot the nodes visited on the way.
//! Serialization is sparse: unpopulated fields are omitted.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::ops::Index;

use crate::error::DigError;

/// Outcome of one branch of a wildcard or array fan-out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Branch {
    /// The branch token was the destination: the raw slot value.
    Leaf(Value),
    /// Traversal continued below the branch point: the branch's own full
    /// result record.
    Dug(Box<DigResult>),
}

impl Branch {
    /// The branch's resolved value, if its traversal ended on one.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Branch::Leaf(value) => Some(value),
            Branch::Dug(result) => result.value.as_ref(),
        }
    }

    /// The branch's sub-result, when traversal continued below the branch
    /// point.
    pub fn as_result(&self) -> Option<&DigResult> {
        match self {
            Branch::Leaf(_) => None,
            Branch::Dug(result) => Some(result),
        }
    }
}

/// Aggregate produced by a branching step.
///
/// Wildcards fan out over a node's keys and keep them; array branches fan
/// out over elements and keep positions. Branches whose sub-traversal failed
/// are omitted, so a fan-out can be shorter than the node it branched over,
/// or empty.
#[derive(Debug, Clone, PartialEq)]
pub enum Found {
    /// Wildcard outcome per key, in the node's own key order.
    Entries(Vec<(String, Branch)>),
    /// Array outcome per element, in element order.
    Items(Vec<Branch>),
}

impl Found {
    /// Looks up a wildcard branch by key. `None` on array fan-outs.
    pub fn get(&self, key: &str) -> Option<&Branch> {
        match self {
            Found::Entries(pairs) => {
                pairs.iter().find(|(k, _)| k.as_str() == key).map(|(_, b)| b)
            }
            Found::Items(_) => None,
        }
    }

    /// Looks up a branch by position.
    pub fn at(&self, index: usize) -> Option<&Branch> {
        match self {
            Found::Entries(pairs) => pairs.get(index).map(|(_, b)| b),
            Found::Items(items) => items.get(index),
        }
    }

    /// The keyed branches of a wildcard fan-out.
    pub fn entries(&self) -> Option<&[(String, Branch)]> {
        match self {
            Found::Entries(pairs) => Some(pairs),
            Found::Items(_) => None,
        }
    }

    /// The positional branches of an array fan-out.
    pub fn items(&self) -> Option<&[Branch]> {
        match self {
            Found::Entries(_) => None,
            Found::Items(items) => Some(items),
        }
    }

    /// Number of surviving branches.
    pub fn len(&self) -> usize {
        match self {
            Found::Entries(pairs) => pairs.len(),
            Found::Items(items) => items.len(),
        }
    }

    /// Whether every branch failed or the node was empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for Found {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Found::Entries(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (key, branch) in pairs {
                    map.serialize_entry(key, branch)?;
                }
                map.end()
            }
            Found::Items(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for branch in items {
                    seq.serialize_element(branch)?;
                }
                seq.end()
            }
        }
    }
}

/// One visited node in a [`Stack`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackFrame {
    /// Key under which this node was reached. `None` for the root frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Snapshot of the node as it was visited.
    pub value: Value,
    /// Index of the frame above, towards the root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<usize>,
    /// Index of the frame below, towards the destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<usize>,
}

/// Doubly linked trace of the nodes a dig visited, root first.
///
/// Frames link to their neighbors by index, so a frame found by position can
/// be walked in either direction. The destination itself is not a frame; the
/// last frame is the node the final token was resolved against.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Stack {
    frames: Vec<StackFrame>,
}

impl Stack {
    /// All frames, root first.
    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    /// Frame at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&StackFrame> {
        self.frames.get(index)
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the stack holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterates frames from the root towards the destination.
    pub fn iter(&self) -> std::slice::Iter<'_, StackFrame> {
        self.frames.iter()
    }
}

impl Index<usize> for Stack {
    type Output = StackFrame;

    fn index(&self, index: usize) -> &StackFrame {
        &self.frames[index]
    }
}

impl<'a> IntoIterator for &'a Stack {
    type Item = &'a StackFrame;
    type IntoIter = std::slice::Iter<'a, StackFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Uniform record produced by every dig call.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DigResult {
    /// Final key, when the traversal ended on a literal destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Resolved destination value, after any writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Per-branch outcomes, when the traversal ended in a fan-out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<Found>,
    /// Snapshots of the nodes visited, root first. The destination value is
    /// not part of the trace.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,
    /// Linked form of `path`, present when requested via
    /// [`DigOptions::stack`](crate::options::DigOptions).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<Stack>,
    /// The failure that stopped the traversal, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<DigError>,
}

impl DigResult {
    /// Whether the traversal failed.
    pub fn is_err(&self) -> bool {
        self.err.is_some()
    }

    /// Splits the record into `Err` when a failure is embedded.
    ///
    /// The success half keeps the whole record, the error half is exactly
    /// the value that sat in [`DigResult::err`].
    pub fn into_result(mut self) -> Result<DigResult, DigError> {
        match self.err.take() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    /// Former name of the [`found`](DigResult::found) field.
    #[deprecated(note = "use the `found` field")]
    pub fn results(&self) -> Option<&Found> {
        self.found.as_ref()
    }

    pub(crate) fn root_only(value: Value) -> Self {
        DigResult {
            value: Some(value),
            ..Default::default()
        }
    }

    pub(crate) fn invalid(value: Value) -> Self {
        DigResult {
            err: Some(DigError::InvalidArgument { value }),
            ..Default::default()
        }
    }

    pub(crate) fn destination(trace: Trace, with_stack: bool, key: String, value: Value) -> Self {
        let (path, stack) = trace.into_parts(with_stack);
        DigResult {
            key: Some(key),
            value: Some(value),
            path,
            stack,
            ..Default::default()
        }
    }

    pub(crate) fn fan_out(trace: Trace, with_stack: bool, found: Found) -> Self {
        let (path, stack) = trace.into_parts(with_stack);
        DigResult {
            found: Some(found),
            path,
            stack,
            ..Default::default()
        }
    }

    pub(crate) fn fail(trace: Trace, with_stack: bool, err: DigError) -> Self {
        let (path, stack) = trace.into_parts(with_stack);
        DigResult {
            err: Some(err),
            path,
            stack,
            ..Default::default()
        }
    }
}

/// Accumulator for visited nodes, shared by `path`, `stack` and error
/// records.
#[derive(Debug)]
pub(crate) struct Trace {
    nodes: Vec<(Option<String>, Value)>,
}

impl Trace {
    /// Starts a trace at the root node.
    pub(crate) fn root(value: &Value) -> Self {
        Trace {
            nodes: vec![(None, value.clone())],
        }
    }

    /// Records a node reached under `key`.
    pub(crate) fn push(&mut self, key: &str, value: Value) {
        self.nodes.push((Some(key.to_string()), value));
    }

    /// Snapshots of the visited values, for embedding in error records.
    pub(crate) fn values(&self) -> Vec<Value> {
        self.nodes.iter().map(|(_, value)| value.clone()).collect()
    }

    /// Finalizes into the `path` vector and, on request, the linked stack.
    pub(crate) fn into_parts(self, with_stack: bool) -> (Vec<Value>, Option<Stack>) {
        if !with_stack {
            let path = self.nodes.into_iter().map(|(_, value)| value).collect();
            return (path, None);
        }
        let len = self.nodes.len();
        let mut path = Vec::with_capacity(len);
        let mut frames = Vec::with_capacity(len);
        for (index, (key, value)) in self.nodes.into_iter().enumerate() {
            path.push(value.clone());
            frames.push(StackFrame {
                key,
                value,
                prev: index.checked_sub(1),
                next: if index + 1 < len { Some(index + 1) } else { None },
            });
        }
        (path, Some(Stack { frames }))
    }
}
