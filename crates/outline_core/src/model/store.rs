//! Outline store: the immutable snapshot of one document.
//!
//! # Responsibility
//! - Own every item of one outline plus the distinguished root id.
//! - Maintain a `parent_of` index so parent lookup is O(1).
//! - Hand out cheap snapshots: cloning a `Store` is one `Arc` bump and
//!   unchanged items are shared between snapshots.
//!
//! # Invariants
//! - Every id in some `children` list is a key of `items`.
//! - Every non-root item has exactly one parent and no item is its own ancestor.
//! - The root id never appears in a `children` list and is never removed.
//! - `parent_of` mirrors the `children` relation exactly.
//!
//! Mutation happens only through [`StoreDraft`], which the engine obtains
//! with [`Store::edit`] and seals with [`StoreDraft::finish`].

use crate::model::item::{Item, ItemId, ROOT_ID};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoreData {
    root_id: ItemId,
    items: HashMap<ItemId, Arc<Item>>,
    parent_of: HashMap<ItemId, ItemId>,
}

/// Complete in-memory outline at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "StoreSnapshot", from = "StoreSnapshot")]
pub struct Store {
    data: Arc<StoreData>,
}

/// Wire shape used by persistence collaborators.
///
/// Items are listed in document pre-order, followed by unreachable items
/// ordered by id, so the same store always serializes identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub root_id: ItemId,
    pub items: Vec<Item>,
}

/// Structural corruption found by [`Store::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root id has no item.
    RootMissing(ItemId),
    /// A `children` list references an id with no item.
    DanglingChild { parent: ItemId, child: ItemId },
    /// The root id is listed as somebody's child.
    RootHasParent { parent: ItemId },
    /// One id is listed as a child more than once across the store.
    MultipleParents { child: ItemId, parents: Vec<ItemId> },
    /// Traversal from the root reached an item twice.
    Cycle(ItemId),
    /// Item exists but cannot be reached from the root.
    Unreachable(ItemId),
    /// Parent index disagrees with the `children` relation.
    ParentIndexMismatch(ItemId),
}

impl Display for InvariantViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RootMissing(id) => write!(f, "root item missing: {id}"),
            Self::DanglingChild { parent, child } => {
                write!(f, "item {parent} lists missing child {child}")
            }
            Self::RootHasParent { parent } => write!(f, "root is listed as child of {parent}"),
            Self::MultipleParents { child, parents } => write!(
                f,
                "item {child} is listed {} times as a child",
                parents.len()
            ),
            Self::Cycle(id) => write!(f, "cycle detected at item {id}"),
            Self::Unreachable(id) => write!(f, "item {id} is not reachable from root"),
            Self::ParentIndexMismatch(id) => write!(f, "parent index out of sync for item {id}"),
        }
    }
}

impl Error for InvariantViolation {}

impl Store {
    /// Builds a store from externally supplied items.
    ///
    /// The parent index is derived from the `children` lists. No repair is
    /// attempted; use [`Store::check_invariants`] to validate untrusted input.
    pub fn from_items(root_id: ItemId, items: impl IntoIterator<Item = Item>) -> Self {
        let items: HashMap<ItemId, Arc<Item>> = items
            .into_iter()
            .map(|item| (item.id, Arc::new(item)))
            .collect();
        let mut parent_of = HashMap::new();
        for item in items.values() {
            for child in &item.children {
                parent_of.insert(*child, item.id);
            }
        }
        Self {
            data: Arc::new(StoreData {
                root_id,
                items,
                parent_of,
            }),
        }
    }

    /// Builds a store holding only an empty root item.
    pub fn with_root(root_id: ItemId) -> Self {
        Self::from_items(root_id, [Item::new(root_id)])
    }

    pub fn root_id(&self) -> ItemId {
        self.data.root_id
    }

    pub fn root(&self) -> Option<&Item> {
        self.get(self.data.root_id)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.data.items.get(&id).map(Arc::as_ref)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.data.items.contains_key(&id)
    }

    /// Number of items including the root.
    pub fn len(&self) -> usize {
        self.data.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.items.is_empty()
    }

    /// Iterates all items in unspecified order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.data.items.values().map(Arc::as_ref)
    }

    /// Child ids of `id`; empty for unknown ids.
    pub fn children_of(&self, id: ItemId) -> &[ItemId] {
        self.get(id)
            .map(|item| item.children.as_slice())
            .unwrap_or(&[])
    }

    /// Parent id from the index. `None` for the root and unknown ids.
    pub fn parent_of(&self, id: ItemId) -> Option<ItemId> {
        self.data.parent_of.get(&id).copied()
    }

    /// Returns whether both values are the same snapshot.
    pub fn ptr_eq(a: &Store, b: &Store) -> bool {
        Arc::ptr_eq(&a.data, &b.data)
    }

    /// Returns whether two stores share the same item allocation for `id`.
    pub fn shares_item(a: &Store, b: &Store, id: ItemId) -> bool {
        match (a.data.items.get(&id), b.data.items.get(&id)) {
            (Some(left), Some(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Starts an edit session on a private copy of this snapshot.
    pub(crate) fn edit(&self) -> StoreDraft {
        StoreDraft {
            data: StoreData::clone(&self.data),
        }
    }

    /// Verifies the structural invariants of this store.
    ///
    /// # Errors
    /// - Returns the first violation found; see [`InvariantViolation`].
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let root_id = self.data.root_id;
        if !self.contains(root_id) {
            return Err(InvariantViolation::RootMissing(root_id));
        }

        let mut parents_of_child: HashMap<ItemId, Vec<ItemId>> = HashMap::new();
        for item in self.items() {
            for child in &item.children {
                if *child == root_id {
                    return Err(InvariantViolation::RootHasParent { parent: item.id });
                }
                if !self.contains(*child) {
                    return Err(InvariantViolation::DanglingChild {
                        parent: item.id,
                        child: *child,
                    });
                }
                parents_of_child.entry(*child).or_default().push(item.id);
            }
        }
        for (child, parents) in &parents_of_child {
            if parents.len() > 1 {
                let mut parents = parents.clone();
                parents.sort();
                return Err(InvariantViolation::MultipleParents {
                    child: *child,
                    parents,
                });
            }
        }

        let mut visited = HashSet::with_capacity(self.len());
        let mut stack = vec![root_id];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                return Err(InvariantViolation::Cycle(current));
            }
            stack.extend(self.children_of(current).iter().rev().copied());
        }
        if let Some(orphan) = self.items().map(|item| item.id).find(|id| !visited.contains(id)) {
            return Err(InvariantViolation::Unreachable(orphan));
        }

        if self.data.parent_of.len() != parents_of_child.len() {
            let stray = self
                .data
                .parent_of
                .keys()
                .find(|id| !parents_of_child.contains_key(*id))
                .copied()
                .unwrap_or(root_id);
            return Err(InvariantViolation::ParentIndexMismatch(stray));
        }
        for (child, parents) in &parents_of_child {
            if self.parent_of(*child) != parents.first().copied() {
                return Err(InvariantViolation::ParentIndexMismatch(*child));
            }
        }

        Ok(())
    }

    fn document_order_ids(&self) -> Vec<ItemId> {
        let mut order = Vec::with_capacity(self.len());
        let mut visited = HashSet::with_capacity(self.len());
        let mut stack = vec![self.data.root_id];
        while let Some(current) = stack.pop() {
            if !self.contains(current) || !visited.insert(current) {
                continue;
            }
            order.push(current);
            stack.extend(self.children_of(current).iter().rev().copied());
        }
        order
    }
}

impl Default for Store {
    /// Root sentinel plus one empty starter child.
    fn default() -> Self {
        let starter = Item::new(Uuid::new_v4());
        let mut root = Item::new(ROOT_ID);
        root.children.push(starter.id);
        Self::from_items(ROOT_ID, [root, starter])
    }
}

impl From<StoreSnapshot> for Store {
    fn from(value: StoreSnapshot) -> Self {
        Self::from_items(value.root_id, value.items)
    }
}

impl From<Store> for StoreSnapshot {
    fn from(value: Store) -> Self {
        let mut ordered = value.document_order_ids();
        let reachable: HashSet<ItemId> = ordered.iter().copied().collect();
        let mut rest: Vec<ItemId> = value
            .items()
            .map(|item| item.id)
            .filter(|id| !reachable.contains(id))
            .collect();
        rest.sort();
        ordered.extend(rest);

        let items = ordered
            .into_iter()
            .filter_map(|id| value.get(id).cloned())
            .collect();
        Self {
            root_id: value.root_id(),
            items,
        }
    }
}

/// Private working copy used by engine handlers.
///
/// Structural edits go through `link`/`unlink` so the parent index cannot
/// drift from the `children` lists.
#[derive(Debug)]
pub(crate) struct StoreDraft {
    data: StoreData,
}

impl StoreDraft {
    pub(crate) fn get(&self, id: ItemId) -> Option<&Item> {
        self.data.items.get(&id).map(Arc::as_ref)
    }

    /// Copy-on-write access to one item's non-structural fields.
    ///
    /// Callers must not touch `children` through this handle.
    pub(crate) fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.data.items.get_mut(&id).map(Arc::make_mut)
    }

    /// Adds a childless item that is not linked anywhere yet.
    pub(crate) fn insert_detached(&mut self, item: Item) {
        debug_assert!(item.children.is_empty());
        self.data.items.insert(item.id, Arc::new(item));
    }

    /// Removes `child` from its parent's list. Returns `(parent, index)`.
    pub(crate) fn unlink(&mut self, child: ItemId) -> Option<(ItemId, usize)> {
        let parent = self.data.parent_of.remove(&child)?;
        let parent_item = self.item_mut(parent)?;
        let index = parent_item.child_index(child)?;
        parent_item.children.remove(index);
        Some((parent, index))
    }

    /// Inserts `children` into `parent` starting at `index` (clamped).
    pub(crate) fn link(&mut self, parent: ItemId, index: usize, children: &[ItemId]) -> bool {
        let Some(parent_item) = self.item_mut(parent) else {
            return false;
        };
        let at = index.min(parent_item.children.len());
        let tail = parent_item.children.split_off(at);
        parent_item.children.extend_from_slice(children);
        parent_item.children.extend(tail);
        for child in children {
            self.data.parent_of.insert(*child, parent);
        }
        true
    }

    /// Appends `children` at the end of `parent`'s list.
    pub(crate) fn append(&mut self, parent: ItemId, children: &[ItemId]) -> bool {
        self.link(parent, usize::MAX, children)
    }

    /// Detaches every child of `id` and returns them in order.
    pub(crate) fn take_children(&mut self, id: ItemId) -> Vec<ItemId> {
        let Some(item) = self.item_mut(id) else {
            return Vec::new();
        };
        let children = std::mem::take(&mut item.children);
        for child in &children {
            self.data.parent_of.remove(child);
        }
        children
    }

    /// Drops `id` and its whole subtree from the map.
    ///
    /// The caller unlinks `id` from its parent first.
    pub(crate) fn remove_subtree(&mut self, id: ItemId) -> usize {
        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(item) = self.data.items.remove(&current) {
                stack.extend(item.children.iter().copied());
                removed += 1;
            }
            self.data.parent_of.remove(&current);
        }
        removed
    }

    pub(crate) fn finish(self) -> Store {
        Store {
            data: Arc::new(self.data),
        }
    }
}
