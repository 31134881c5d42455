//! Multi-item relocation (drag and drop).
//!
//! # Invariants
//! - Only the topmost subset of a selection moves; descendants ride along.
//! - A subtree is never moved into itself or one of its descendants.
//! - Moved ids keep their document order at the destination.

use crate::engine::action::DropPosition;
use crate::engine::mutation::Outcome;
use crate::model::item::ItemId;
use crate::model::store::Store;
use crate::query::{document_order, is_ancestor};
use std::collections::HashSet;

pub(super) fn move_items(
    store: &Store,
    drag_ids: &[ItemId],
    target_id: ItemId,
    position: DropPosition,
) -> Outcome {
    let reduced = topmost_subset(store, drag_ids);
    if reduced.is_empty() {
        return Err("empty_selection");
    }
    if !store.contains(target_id) {
        return Err("target_missing");
    }
    if reduced.iter().any(|id| is_ancestor(store, *id, target_id)) {
        return Err("target_inside_selection");
    }
    let destination = match position {
        DropPosition::Inside => target_id,
        DropPosition::Before | DropPosition::After => {
            store.parent_of(target_id).ok_or("target_is_root")?
        }
    };

    let mut touched: Vec<ItemId> = reduced
        .iter()
        .filter_map(|id| store.parent_of(*id))
        .collect();
    touched.push(destination);

    let mut draft = store.edit();
    for id in &reduced {
        draft.unlink(*id);
    }
    match position {
        DropPosition::Inside => {
            draft.append(target_id, &reduced);
            draft.item_mut(target_id).ok_or("target_missing")?.collapsed = false;
        }
        DropPosition::Before | DropPosition::After => {
            let index = draft
                .get(destination)
                .and_then(|parent| parent.child_index(target_id))
                .ok_or("target_detached")?;
            let at = match position {
                DropPosition::After => index + 1,
                _ => index,
            };
            draft.link(destination, at, &reduced);
        }
    }
    let next = draft.finish();

    if touched.iter().all(|id| next.get(*id) == store.get(*id)) {
        return Err("unchanged");
    }
    Ok(next)
}

/// Selection reduced to existing non-root ids with no selected ancestor,
/// in document order.
pub(crate) fn topmost_subset(store: &Store, drag_ids: &[ItemId]) -> Vec<ItemId> {
    let root_id = store.root_id();
    let selected: HashSet<ItemId> = drag_ids
        .iter()
        .copied()
        .filter(|id| *id != root_id && store.contains(*id))
        .collect();
    if selected.is_empty() {
        return Vec::new();
    }

    document_order(store)
        .into_iter()
        .filter(|id| selected.contains(id))
        .filter(|id| !has_selected_ancestor(store, *id, &selected))
        .collect()
}

fn has_selected_ancestor(store: &Store, id: ItemId, selected: &HashSet<ItemId>) -> bool {
    let mut cursor = store.parent_of(id);
    while let Some(current) = cursor {
        if selected.contains(&current) {
            return true;
        }
        cursor = store.parent_of(current);
    }
    false
}
