//! Core document tree engine for the outline editor.
//! This crate is the single source of truth for outline invariants.

pub mod engine;
pub mod history;
pub mod interchange;
pub mod logging;
pub mod model;
pub mod query;

pub use engine::{apply, Action, DropPosition};
pub use history::{History, HistoryCommand};
pub use interchange::{export_outline, import_outline, plain_text};
pub use logging::{
    default_log_level, init_logging, init_logging_with, logging_status, LoggingConfig,
};
pub use model::item::{Item, ItemId, TextStyle, ROOT_ID};
pub use model::store::{InvariantViolation, Store, StoreSnapshot};
pub use query::{
    depth_of, document_order, find_parent, is_ancestor, next_visible, previous_visible,
    subtree_ids, visible_flat_list,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
