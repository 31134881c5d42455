//! Outline item domain model.
//!
//! # Responsibility
//! - Define the single node shape shared by every outline projection.
//! - Keep display attributes next to structure without giving them meaning.
//!
//! # Invariants
//! - `id` is stable for the item lifetime and never reused for another item.
//! - `children` order is display order.
//! - Display attributes (`is_task`, `font_size`, styles) have no structural effect.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one outline item.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ItemId = Uuid;

/// Root sentinel used by [`crate::Store::default`].
pub const ROOT_ID: ItemId = Uuid::nil();

/// Inline style flags that can be toggled on one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    Bold,
    Italic,
    Underline,
}

/// One outline node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable id, immutable for the item lifetime.
    pub id: ItemId,
    /// Rich content payload. Opaque to the core; markup belongs to rendering.
    pub text: String,
    /// Ordered child ids.
    #[serde(default)]
    pub children: Vec<ItemId>,
    /// Hides descendants from visible enumeration while keeping them stored.
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_task: bool,
    /// `None` means the renderer default size.
    #[serde(default)]
    pub font_size: Option<u16>,
    #[serde(default)]
    pub is_bold: bool,
    #[serde(default)]
    pub is_italic: bool,
    #[serde(default)]
    pub is_underlined: bool,
}

impl Item {
    /// Creates an empty, expanded, unstyled item with the given id.
    pub fn new(id: ItemId) -> Self {
        Self::with_text(id, String::new())
    }

    /// Creates an item carrying initial text.
    pub fn with_text(id: ItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            children: Vec::new(),
            collapsed: false,
            is_completed: false,
            is_task: false,
            font_size: None,
            is_bold: false,
            is_italic: false,
            is_underlined: false,
        }
    }

    /// Returns whether the given style flag is set.
    pub fn has_style(&self, style: TextStyle) -> bool {
        match style {
            TextStyle::Bold => self.is_bold,
            TextStyle::Italic => self.is_italic,
            TextStyle::Underline => self.is_underlined,
        }
    }

    /// Flips one style flag.
    pub fn toggle_style(&mut self, style: TextStyle) {
        let flag = match style {
            TextStyle::Bold => &mut self.is_bold,
            TextStyle::Italic => &mut self.is_italic,
            TextStyle::Underline => &mut self.is_underlined,
        };
        *flag = !*flag;
    }

    /// Returns the position of `child` in this item's child list.
    pub fn child_index(&self, child: ItemId) -> Option<usize> {
        self.children.iter().position(|id| *id == child)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
