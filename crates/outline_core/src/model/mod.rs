//! Outline document model.
//!
//! # Responsibility
//! - Define the item node shape and the immutable store snapshot.
//! - Expose invariant checks for externally supplied snapshots.
//!
//! # Invariants
//! - Every item is identified by a stable `ItemId`.
//! - Deletion is a hard removal from the current snapshot; earlier
//!   snapshots keep their items.

pub mod item;
pub mod store;
