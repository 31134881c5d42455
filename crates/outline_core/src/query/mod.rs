//! Read-only structural queries over one store snapshot.
//!
//! # Responsibility
//! - Answer parent/ancestor questions for the engine and external dispatchers.
//! - Enumerate the visible items a user can see and tab through.
//!
//! # Invariants
//! - Queries never mutate and never panic on unknown ids.
//! - Parent and ancestor lookups are O(depth) through the parent index.

mod tree_query;

pub use tree_query::{
    depth_of, document_order, find_parent, is_ancestor, next_visible, previous_visible,
    subtree_ids, visible_flat_list,
};
