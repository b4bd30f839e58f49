//! Error types for burrow
//!
//! The traversal engine fails in exactly three ways. Errors are plain data:
//! they carry the offending key and value plus the trace of nodes visited
//! before the failure, and they compare by value so the embedded form
//! ([`DigResult::err`](crate::result::DigResult)) and the returned form
//! ([`try_dig`](crate::engine::try_dig)) can be asserted identical.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The container shape a failed traversal step required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExpectedType {
    /// A key-value mapping (`Value::Object`).
    #[serde(rename = "object")]
    Object,
    /// An ordered sequence (`Value::Array`).
    #[serde(rename = "Array")]
    Array,
}

impl ExpectedType {
    /// The type name as it appears in error records.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpectedType::Object => "object",
            ExpectedType::Array => "Array",
        }
    }
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced when a traversal step cannot resolve.
///
/// Constructed at the exact step that discovers the failure and never
/// recovered internally: it either lands in
/// [`DigResult::err`](crate::result::DigResult) or is returned as the `Err`
/// of [`try_dig`](crate::engine::try_dig). Inside wildcard and array
/// fan-outs a branch's error is swallowed and the branch omitted instead.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum DigError {
    /// The root value cannot own child slots (scalar or null).
    #[error("argument is not diggable")]
    InvalidArgument {
        /// Snapshot of the offending value.
        value: Value,
    },

    /// A key was absent and path creation was not requested.
    #[error("property '{key}' is not found")]
    NoSuchKey {
        /// The missing key.
        key: String,
        /// Snapshots of the nodes visited before the failure, root first.
        path: Vec<Value>,
    },

    /// A resolved value had the wrong shape for the step that read it.
    #[error("unexpected type of value")]
    TypeMismatch {
        /// The key whose value had the wrong shape.
        key: String,
        /// Snapshot of the value actually found.
        value: Value,
        /// The container shape the step required.
        expected_type: ExpectedType,
        /// Snapshots of the nodes visited before the failure, root first.
        path: Vec<Value>,
    },
}
