//! # AVL Index
//!
//! A keyed record store built on a self-balancing binary search tree.
//!
//! ## Core idea
//! A plain binary search tree degenerates into a linked list under sorted
//! input — exactly the pattern a record store sees when data arrives
//! alphabetically. The AVL tree rebalances itself with local rotations on
//! every insert and delete, so lookups stay logarithmic no matter the
//! insertion order.
//!
//! Records are persisted as a line-oriented text snapshot (`key|value` per
//! line, written in pre-order) and rebuilt by re-insertion on load: contents
//! round-trip exactly, tree shape intentionally does not.

pub mod error;
pub mod snapshot;
pub mod tree;
pub mod types;

// Public re-exports for the top-level API
pub use error::{Error, Result};
pub use snapshot::MalformedPolicy;
pub use tree::AvlIndex;
