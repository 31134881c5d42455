//! Read-only tree navigation over a [`Store`] snapshot.
//!
//! # Invariants
//! - Queries never mutate and never panic on unknown ids.
//! - Parent-chain walks are bounded by the store size.

use crate::model::item::ItemId;
use crate::model::store::Store;

/// Returns the parent of `id`.
///
/// `None` for the root, for unknown ids and for unparented items.
pub fn find_parent(store: &Store, id: ItemId) -> Option<ItemId> {
    store.parent_of(id)
}

/// Returns whether `ancestor` is `node` or lies on `node`'s parent chain.
pub fn is_ancestor(store: &Store, ancestor: ItemId, node: ItemId) -> bool {
    if ancestor == node {
        return true;
    }
    // Bounded walk: a corrupt loaded snapshot must not hang the caller.
    let mut remaining = store.len();
    let mut cursor = store.parent_of(node);
    while let Some(current) = cursor {
        if current == ancestor {
            return true;
        }
        if remaining == 0 {
            return false;
        }
        remaining -= 1;
        cursor = store.parent_of(current);
    }
    false
}

/// Visible ids under `from` in pre-order, skipping collapsed subtrees.
///
/// `from` itself is not included and its own collapse flag is ignored.
pub fn visible_flat_list(store: &Store, from: ItemId) -> Vec<ItemId> {
    let mut visible = Vec::new();
    let mut stack: Vec<ItemId> = store.children_of(from).iter().rev().copied().collect();
    while let Some(current) = stack.pop() {
        let Some(item) = store.get(current) else {
            continue;
        };
        visible.push(current);
        if !item.collapsed {
            stack.extend(item.children.iter().rev().copied());
        }
        if visible.len() > store.len() {
            break;
        }
    }
    visible
}

/// Next visible item after `id` in the root's visible list.
pub fn next_visible(store: &Store, id: ItemId) -> Option<ItemId> {
    let visible = visible_flat_list(store, store.root_id());
    let index = visible.iter().position(|candidate| *candidate == id)?;
    visible.get(index + 1).copied()
}

/// Previous visible item before `id` in the root's visible list.
pub fn previous_visible(store: &Store, id: ItemId) -> Option<ItemId> {
    let visible = visible_flat_list(store, store.root_id());
    let index = visible.iter().position(|candidate| *candidate == id)?;
    index.checked_sub(1).and_then(|prev| visible.get(prev).copied())
}

/// Number of ancestors between `id` and the root.
///
/// Direct children of the root have depth 0. `None` for the root itself and
/// for ids that are not attached under the root.
pub fn depth_of(store: &Store, id: ItemId) -> Option<usize> {
    let root_id = store.root_id();
    if id == root_id || !store.contains(id) {
        return None;
    }
    let mut depth = 0;
    let mut cursor = store.parent_of(id)?;
    while cursor != root_id {
        cursor = store.parent_of(cursor)?;
        depth += 1;
        if depth > store.len() {
            return None;
        }
    }
    Some(depth)
}

/// Every id under the root in pre-order, ignoring collapse state.
pub fn document_order(store: &Store) -> Vec<ItemId> {
    let root_id = store.root_id();
    let mut ids = subtree_ids(store, root_id);
    ids.retain(|id| *id != root_id);
    ids
}

/// `id` followed by all of its descendants in pre-order.
///
/// Empty for unknown ids.
pub fn subtree_ids(store: &Store, id: ItemId) -> Vec<ItemId> {
    if !store.contains(id) {
        return Vec::new();
    }
    let mut ids = Vec::new();
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        ids.push(current);
        stack.extend(store.children_of(current).iter().rev().copied());
        if ids.len() > store.len() {
            break;
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::{Item, ROOT_ID};
    use uuid::Uuid;

    #[test]
    fn depth_counts_from_root_children() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut root = Item::new(ROOT_ID);
        root.children.push(a);
        let mut a_item = Item::new(a);
        a_item.children.push(b);
        let store = Store::from_items(ROOT_ID, [root, a_item, Item::new(b)]);

        assert_eq!(depth_of(&store, ROOT_ID), None);
        assert_eq!(depth_of(&store, a), Some(0));
        assert_eq!(depth_of(&store, b), Some(1));
        assert_eq!(depth_of(&store, Uuid::new_v4()), None);
    }

    #[test]
    fn ancestor_walk_terminates_on_corrupt_cycle() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut a_item = Item::new(a);
        a_item.children.push(b);
        let mut b_item = Item::new(b);
        b_item.children.push(a);
        let store = Store::from_items(ROOT_ID, [Item::new(ROOT_ID), a_item, b_item]);

        assert!(!is_ancestor(&store, ROOT_ID, a));
        assert!(store.check_invariants().is_err());
    }
}
