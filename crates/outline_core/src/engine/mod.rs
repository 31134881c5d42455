//! Mutation engine: `apply(store, action) -> store`.
//!
//! # Responsibility
//! - Implement every structural and content operation as a pure
//!   snapshot-to-snapshot transformation.
//! - Reject illegal actions silently by returning the input snapshot.
//!
//! # Invariants
//! - Handlers never produce dangling children, second parents or cycles.
//! - The root is never deleted, merged or moved.
//! - A rejected action performs no partial mutation.
//! - Item text never appears in log events.

mod action;
mod move_items;
mod mutation;

pub use action::{Action, DropPosition};
pub use mutation::apply;
