//! Closed action vocabulary accepted by the mutation engine.

use crate::model::item::{ItemId, TextStyle};
use serde::{Deserialize, Serialize};

/// Drop position relative to a move target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPosition {
    Before,
    After,
    Inside,
}

/// One structural or content operation on a store.
///
/// Serialized with a `type` tag so UI collaborators can send actions as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// New empty item under `parent_id`, after `after_id` or first when absent.
    Insert {
        after_id: Option<ItemId>,
        parent_id: ItemId,
        new_id: ItemId,
    },
    SetText {
        id: ItemId,
        text: String,
    },
    /// Removes `id` from `parent_id` and drops its whole subtree.
    Delete {
        id: ItemId,
        parent_id: ItemId,
    },
    /// Folds `id` into `previous_id`: text is concatenated and children move.
    MergeUp {
        id: ItemId,
        parent_id: ItemId,
        previous_id: ItemId,
    },
    /// Moves `id` under its preceding sibling.
    Indent {
        id: ItemId,
        parent_id: ItemId,
    },
    /// Moves `id` next to `parent_id` in the grandparent.
    Outdent {
        id: ItemId,
        parent_id: ItemId,
    },
    ToggleCollapse {
        id: ItemId,
    },
    /// Relocates a selection as one unit.
    MoveItems {
        drag_ids: Vec<ItemId>,
        target_id: ItemId,
        position: DropPosition,
    },
    ChangeFontSize {
        id: ItemId,
        font_size: Option<u16>,
    },
    SetIsTask {
        id: ItemId,
        is_task: bool,
    },
    ToggleStyle {
        id: ItemId,
        style: TextStyle,
    },
    SetCompleted {
        id: ItemId,
        is_completed: bool,
    },
}

impl Action {
    /// Stable snake_case name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Insert { .. } => "insert",
            Self::SetText { .. } => "set_text",
            Self::Delete { .. } => "delete",
            Self::MergeUp { .. } => "merge_up",
            Self::Indent { .. } => "indent",
            Self::Outdent { .. } => "outdent",
            Self::ToggleCollapse { .. } => "toggle_collapse",
            Self::MoveItems { .. } => "move_items",
            Self::ChangeFontSize { .. } => "change_font_size",
            Self::SetIsTask { .. } => "set_is_task",
            Self::ToggleStyle { .. } => "toggle_style",
            Self::SetCompleted { .. } => "set_completed",
        }
    }

    /// Key under which consecutive actions collapse into one undo step.
    ///
    /// Only text edits coalesce, and only while they target the same item.
    pub fn coalesce_key(&self) -> Option<ItemId> {
        match self {
            Self::SetText { id, .. } => Some(*id),
            _ => None,
        }
    }
}
