//! Action dispatch and the single-item handlers.
//!
//! # Responsibility
//! - Route every [`Action`] to its handler and return the next snapshot.
//! - Log applied and rejected actions at `debug` level.
//!
//! # Invariants
//! - `apply` is total; a rejected action yields the input snapshot itself.
//! - Accepted actions keep the single-parent and acyclic tree shape.

use crate::engine::action::Action;
use crate::engine::move_items::move_items;
use crate::model::item::{Item, ItemId};
use crate::model::store::Store;
use crate::query::is_ancestor;
use log::debug;

/// Reason code for a rejected action. Only ever logged.
pub(super) type Rejection = &'static str;

pub(super) type Outcome = Result<Store, Rejection>;

/// Applies one action and returns the resulting snapshot.
///
/// Total: when a precondition fails, or the action would not change
/// anything, the returned store is the input snapshot itself
/// (`Store::ptr_eq(&input, &output)` holds).
pub fn apply(store: &Store, action: &Action) -> Store {
    match dispatch(store, action) {
        Ok(next) => {
            debug!(
                "event=action_applied module=engine action={} items={}",
                action.name(),
                next.len()
            );
            next
        }
        Err(reason) => {
            debug!(
                "event=action_rejected module=engine action={} reason={}",
                action.name(),
                reason
            );
            store.clone()
        }
    }
}

fn dispatch(store: &Store, action: &Action) -> Outcome {
    match action {
        Action::Insert {
            after_id,
            parent_id,
            new_id,
        } => insert(store, *after_id, *parent_id, *new_id),
        Action::SetText { id, text } => update_item(store, *id, |item| {
            if item.text != *text {
                item.text.clone_from(text);
            }
        }),
        Action::Delete { id, parent_id } => delete(store, *id, *parent_id),
        Action::MergeUp {
            id,
            parent_id,
            previous_id,
        } => merge_up(store, *id, *parent_id, *previous_id),
        Action::Indent { id, parent_id } => indent(store, *id, *parent_id),
        Action::Outdent { id, parent_id } => outdent(store, *id, *parent_id),
        Action::ToggleCollapse { id } => {
            update_item(store, *id, |item| item.collapsed = !item.collapsed)
        }
        Action::MoveItems {
            drag_ids,
            target_id,
            position,
        } => move_items(store, drag_ids, *target_id, *position),
        Action::ChangeFontSize { id, font_size } => {
            update_item(store, *id, |item| item.font_size = *font_size)
        }
        Action::SetIsTask { id, is_task } => {
            update_item(store, *id, |item| item.is_task = *is_task)
        }
        Action::ToggleStyle { id, style } => {
            update_item(store, *id, |item| item.toggle_style(*style))
        }
        Action::SetCompleted { id, is_completed } => {
            update_item(store, *id, |item| item.is_completed = *is_completed)
        }
    }
}

fn insert(store: &Store, after_id: Option<ItemId>, parent_id: ItemId, new_id: ItemId) -> Outcome {
    let parent = store.get(parent_id).ok_or("parent_missing")?;
    if store.contains(new_id) || new_id == store.root_id() {
        return Err("id_in_use");
    }

    let index = match after_id {
        Some(after_id) => parent
            .child_index(after_id)
            .map(|index| index + 1)
            .unwrap_or(parent.children.len()),
        None => 0,
    };

    let mut draft = store.edit();
    draft.insert_detached(Item::new(new_id));
    draft.link(parent_id, index, &[new_id]);
    Ok(draft.finish())
}

fn delete(store: &Store, id: ItemId, parent_id: ItemId) -> Outcome {
    store.get(parent_id).ok_or("parent_missing")?;
    if id == store.root_id() {
        return Err("root_is_permanent");
    }
    if store.parent_of(id) != Some(parent_id) {
        return Err("not_a_child");
    }

    let mut draft = store.edit();
    draft.unlink(id).ok_or("not_a_child")?;
    let removed = draft.remove_subtree(id);
    debug!("event=subtree_removed module=engine count={removed}");
    Ok(draft.finish())
}

fn merge_up(store: &Store, id: ItemId, parent_id: ItemId, previous_id: ItemId) -> Outcome {
    let item = store.get(id).ok_or("item_missing")?;
    store.get(parent_id).ok_or("parent_missing")?;
    let previous = store.get(previous_id).ok_or("previous_missing")?;
    if id == store.root_id() || previous_id == store.root_id() {
        return Err("root_is_permanent");
    }
    if store.parent_of(id) != Some(parent_id) {
        return Err("not_a_child");
    }
    if is_ancestor(store, id, previous_id) {
        return Err("previous_inside_item");
    }

    let merged_text = format!("{}{}", previous.text, item.text);
    let mut draft = store.edit();
    let (_, index) = draft.unlink(id).ok_or("not_a_child")?;
    let children = draft.take_children(id);
    if previous_id == parent_id {
        // Children take the merged item's slot in the parent.
        draft.link(parent_id, index, &children);
    } else {
        draft.append(previous_id, &children);
    }
    draft.remove_subtree(id);

    let previous = draft.item_mut(previous_id).ok_or("previous_missing")?;
    previous.text = merged_text;
    if previous_id != parent_id {
        previous.collapsed = false;
    }
    Ok(draft.finish())
}

fn indent(store: &Store, id: ItemId, parent_id: ItemId) -> Outcome {
    let parent = store.get(parent_id).ok_or("parent_missing")?;
    let index = parent.child_index(id).ok_or("not_a_child")?;
    if index == 0 {
        return Err("first_child");
    }
    let sibling = parent.children[index - 1];

    let mut draft = store.edit();
    draft.unlink(id).ok_or("not_a_child")?;
    draft.append(sibling, &[id]);
    draft.item_mut(sibling).ok_or("sibling_missing")?.collapsed = false;
    Ok(draft.finish())
}

fn outdent(store: &Store, id: ItemId, parent_id: ItemId) -> Outcome {
    let parent = store.get(parent_id).ok_or("parent_missing")?;
    parent.child_index(id).ok_or("not_a_child")?;
    let grandparent = store.parent_of(parent_id).ok_or("no_grandparent")?;

    let mut draft = store.edit();
    draft.unlink(id).ok_or("not_a_child")?;
    let index = draft
        .get(grandparent)
        .and_then(|item| item.child_index(parent_id))
        .ok_or("no_grandparent")?;
    draft.link(grandparent, index + 1, &[id]);
    Ok(draft.finish())
}

/// Applies a non-structural change to one item.
///
/// `change` must leave `children` alone.
fn update_item(store: &Store, id: ItemId, change: impl FnOnce(&mut Item)) -> Outcome {
    let current = store.get(id).ok_or("item_missing")?;
    let mut updated = current.clone();
    change(&mut updated);
    if updated == *current {
        return Err("unchanged");
    }

    let mut draft = store.edit();
    let item = draft.item_mut(id).ok_or("item_missing")?;
    *item = updated;
    Ok(draft.finish())
}
