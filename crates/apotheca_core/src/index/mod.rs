//! In-memory secondary indexes over the record store.
//!
//! Each entity kind gets a pair of trees:
//!
//! - [`AvlIndex`]: height-balanced, keyed by the unique id, O(log n) lookup
//! - [`BstIndex`]: plain BST, keyed by the case-insensitive display name
//!
//! The pair is owned by an [`EntityIndexSet`] and kept consistent with the
//! record store by whole-set rebuild after every mutation, not by
//! incremental maintenance. Neither tree supports deletion.
//!
//! Indexes hold record keys, not records. Callers re-fetch the authoritative
//! entity from the store after a successful search.

mod avl;
mod bst;
mod key;
mod set;

pub use avl::AvlIndex;
pub use bst::BstIndex;
pub use key::NameKey;
pub use set::{EntityIndexSet, IndexedRecord};
