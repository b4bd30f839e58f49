//! Safe navigation for deeply nested [`serde_json::Value`] trees.
//!
//! A dig walks a dotted path through dynamic data without panicking and
//! without `if let` staircases. One call can read, branch, write and create
//! in a single pass:
//!
//! - `"users.ada.age"` descends literal keys (numeric keys index arrays)
//! - `"users.*.age"` branches over every key of a node
//! - `"users.ada.cards[].rank"` branches over the elements of an array
//! - path creation fabricates missing levels on the way to a write
//!
//! Failures never unwind. Every call produces a [`DigResult`] describing
//! where the walk ended, what it found and, if it stopped short, a
//! [`DigError`] naming the step that failed. [`try_dig`] is the same walk
//! with the error promoted to `Err` for `?` chains.
//!
//! # Examples
//!
//! ```
//! use burrow::{dig, DigOptions};
//! use serde_json::json;
//!
//! let mut data = json!({
//!     "users": {
//!         "ada": {"age": 36, "cards": [{"rank": "A"}, {"rank": "K"}]},
//!         "bob": {"age": 28, "cards": [{"rank": "Q"}]}
//!     }
//! });
//!
//! // Plain read.
//! let found = dig(&mut data, "users.ada.age", DigOptions::new());
//! assert_eq!(found.value, Some(json!(36)));
//!
//! // Branch over every user, then over each user's cards.
//! let found = dig(&mut data, "users.*.cards[].rank", DigOptions::new());
//! let users = found.found.unwrap();
//! let ada = users.get("ada").unwrap().as_result().unwrap();
//! let ranks = ada.found.as_ref().unwrap();
//! assert_eq!(ranks.at(0).unwrap().value(), Some(&json!("A")));
//!
//! // Write through a path that does not exist yet.
//! let mut config = json!({});
//! dig(
//!     &mut config,
//!     "server.retries",
//!     DigOptions::new().make_path().set(3),
//! );
//! assert_eq!(config, json!({"server": {"retries": 3}}));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod options;
pub mod path;
pub mod result;

pub use engine::{dig, get, get_mut, is_diggable, try_dig};
pub use error::{DigError, ExpectedType};
pub use options::{DigOptions, HasFn, MakePath, MakePathFn, MutateFn};
pub use path::{Path, Token};
pub use result::{Branch, DigResult, Found, Stack, StackFrame};
