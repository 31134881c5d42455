//! Undo/redo history over store snapshots.
//!
//! # Responsibility
//! - Route actions through the engine and keep past/present/future snapshots.
//! - Coalesce consecutive text edits of one item into a single undo step.
//!
//! # Invariants
//! - Rejected actions never touch the stacks.
//! - Any applied action clears the redo stack.
//! - Undo, redo and load always start a fresh coalescing burst.
//! - `load_state` is not undoable and clears both stacks.

mod undo_history;

pub use undo_history::{History, HistoryCommand};
