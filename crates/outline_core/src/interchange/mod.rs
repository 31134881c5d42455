//! Text interchange formats for outlines.
//!
//! # Responsibility
//! - Build fresh stores from hyphen-depth outline text.
//! - Export the visible outline back to the same format.
//!
//! # Invariants
//! - Imported stores satisfy every store invariant.
//! - Export is one-way: rich text is flattened to plain text.

mod outline_text;

pub use outline_text::{export_outline, import_outline, plain_text};
