//! Per-call traversal options
//!
//! [`DigOptions`] bundles everything that modulates a dig: write values,
//! a mutation callback, path creation, a custom existence predicate and the
//! stack trace switch. All fields default to off; a default options value
//! makes [`dig`](crate::engine::dig) a pure read.

use serde_json::{Map, Value};
use std::fmt;

/// Mutation callback. Receives the current slot value by move and returns
/// its replacement.
pub type MutateFn = Box<dyn FnMut(Value) -> Value>;

/// Existence predicate. Receives the node being examined and the key about
/// to be resolved.
pub type HasFn = Box<dyn FnMut(&Value, &str) -> bool>;

/// Node factory for path creation. Receives the object the new node will be
/// inserted into, the missing key and the 1-based count of nodes fabricated
/// so far in this call.
pub type MakePathFn = Box<dyn FnMut(&Map<String, Value>, &str, usize) -> Value>;

/// How missing intermediate nodes are fabricated when path creation is on.
pub enum MakePath {
    /// Insert an empty object at every missing level.
    Auto,
    /// Ask a factory for every missing intermediate node.
    Factory(MakePathFn),
}

impl fmt::Debug for MakePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MakePath::Auto => f.write_str("Auto"),
            MakePath::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// Options for a single dig call.
///
/// Fields are public and the struct is `Default`, so it can be built
/// literally, but the chained setters read better for callbacks:
///
/// ```
/// use burrow::DigOptions;
///
/// let opts = DigOptions::new()
///     .set("done")
///     .stack();
/// assert!(opts.stack);
/// ```
#[derive(Default)]
pub struct DigOptions {
    /// Value written into the destination slot before it is read back.
    pub set: Option<Value>,
    /// Value written into a destination slot fabricated by path creation
    /// when `set` is absent.
    pub default: Option<Value>,
    /// Transform applied to the destination value after `set`/`default`.
    pub mutate: Option<MutateFn>,
    /// Path creation mode. `None` leaves missing keys as errors.
    pub make_path: Option<MakePath>,
    /// Replaces the built-in existence check. A key counts as present only
    /// if the predicate accepts it and the slot physically exists.
    pub has: Option<HasFn>,
    /// Record the visited nodes as a linked [`Stack`](crate::result::Stack)
    /// on the result.
    pub stack: bool,
}

impl DigOptions {
    /// Fresh options with every feature off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `value` into the destination slot.
    pub fn set(mut self, value: impl Into<Value>) -> Self {
        self.set = Some(value.into());
        self
    }

    /// Seeds destination slots fabricated by path creation when no `set`
    /// value is given.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Transforms the destination value in place.
    pub fn mutate(mut self, f: impl FnMut(Value) -> Value + 'static) -> Self {
        self.mutate = Some(Box::new(f));
        self
    }

    /// Fabricates missing path levels as empty objects.
    pub fn make_path(mut self) -> Self {
        self.make_path = Some(MakePath::Auto);
        self
    }

    /// Fabricates missing path levels by calling `f(parent, key, depth)`.
    pub fn make_path_with(
        mut self,
        f: impl FnMut(&Map<String, Value>, &str, usize) -> Value + 'static,
    ) -> Self {
        self.make_path = Some(MakePath::Factory(Box::new(f)));
        self
    }

    /// Replaces the existence check with `f(node, key)`.
    pub fn has(mut self, f: impl FnMut(&Value, &str) -> bool + 'static) -> Self {
        self.has = Some(Box::new(f));
        self
    }

    /// Records the visited-node stack on the result.
    pub fn stack(mut self) -> Self {
        self.stack = true;
        self
    }
}

impl fmt::Debug for DigOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigOptions")
            .field("set", &self.set)
            .field("default", &self.default)
            .field("mutate", &self.mutate.as_ref().map(|_| "<fn>"))
            .field("make_path", &self.make_path)
            .field("has", &self.has.as_ref().map(|_| "<fn>"))
            .field("stack", &self.stack)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_are_off() {
        let opts = DigOptions::new();
        assert!(opts.set.is_none());
        assert!(opts.default.is_none());
        assert!(opts.mutate.is_none());
        assert!(opts.make_path.is_none());
        assert!(opts.has.is_none());
        assert!(!opts.stack);
    }

    #[test]
    fn test_setters_chain() {
        let opts = DigOptions::new()
            .set(21)
            .default_value(json!([1, 2]))
            .mutate(|v| v)
            .make_path()
            .has(|_, _| true)
            .stack();
        assert_eq!(opts.set, Some(json!(21)));
        assert_eq!(opts.default, Some(json!([1, 2])));
        assert!(opts.mutate.is_some());
        assert!(matches!(opts.make_path, Some(MakePath::Auto)));
        assert!(opts.has.is_some());
        assert!(opts.stack);
    }

    #[test]
    fn test_debug_elides_callbacks() {
        let opts = DigOptions::new().mutate(|v| v);
        let rendered = format!("{opts:?}");
        assert!(rendered.contains("mutate: Some(\"<fn>\")"));
        assert!(rendered.contains("has: None"));
    }
}
