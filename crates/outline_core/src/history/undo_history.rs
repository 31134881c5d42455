//! Undo/redo over whole store snapshots.
//!
//! # Responsibility
//! - Keep past, present and future snapshots for one editing session.
//! - Coalesce consecutive text edits of one item into a single undo level.
//!
//! # Invariants
//! - `present` only changes through applied actions, undo, redo or load.
//! - Any new undo level clears the redo stack.

use crate::engine::{apply, Action};
use crate::model::item::ItemId;
use crate::model::store::Store;
use log::debug;

/// Entry points of the history reducer.
#[derive(Debug, Clone)]
pub enum HistoryCommand {
    Apply(Action),
    Undo,
    Redo,
    /// Replaces the document wholesale, e.g. after loading from storage.
    LoadState(Store),
}

/// Snapshot history for one editing session.
#[derive(Debug, Clone)]
pub struct History {
    /// Older snapshots, most recent last.
    past: Vec<Store>,
    present: Store,
    /// Undone snapshots, next redo last.
    future: Vec<Store>,
    /// Item whose text burst is still open for coalescing.
    last_text_edit: Option<ItemId>,
    /// Maximum number of undo levels (0 = unlimited).
    max_levels: usize,
}

impl History {
    /// Starts an unlimited history at `present`.
    pub fn new(present: Store) -> Self {
        Self::with_max_levels(present, 0)
    }

    /// Starts a history that keeps at most `max_levels` undo steps.
    pub fn with_max_levels(present: Store, max_levels: usize) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: Vec::new(),
            last_text_edit: None,
            max_levels,
        }
    }

    /// Current snapshot.
    pub fn present(&self) -> &Store {
        &self.present
    }

    /// Runs one reducer command. Returns whether `present` changed.
    pub fn dispatch(&mut self, command: HistoryCommand) -> bool {
        match command {
            HistoryCommand::Apply(action) => self.apply(&action),
            HistoryCommand::Undo => self.undo(),
            HistoryCommand::Redo => self.redo(),
            HistoryCommand::LoadState(store) => {
                self.load_state(store);
                true
            }
        }
    }

    /// Applies one action through the engine. Returns whether it took effect.
    pub fn apply(&mut self, action: &Action) -> bool {
        let next = apply(&self.present, action);
        if Store::ptr_eq(&next, &self.present) {
            return false;
        }

        let key = action.coalesce_key();
        if key.is_some() && key == self.last_text_edit {
            debug!(
                "event=history_coalesce module=history action={} past={}",
                action.name(),
                self.past.len()
            );
            self.present = next;
            self.future.clear();
            return true;
        }

        let previous = std::mem::replace(&mut self.present, next);
        self.push_past(previous);
        self.future.clear();
        self.last_text_edit = key;
        debug!(
            "event=history_push module=history action={} past={}",
            action.name(),
            self.past.len()
        );
        true
    }

    /// Restores the previous snapshot. Returns `false` when there is none.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let undone = std::mem::replace(&mut self.present, previous);
        self.future.push(undone);
        self.last_text_edit = None;
        debug!(
            "event=history_undo module=history past={} future={}",
            self.past.len(),
            self.future.len()
        );
        true
    }

    /// Re-applies the most recently undone snapshot.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let previous = std::mem::replace(&mut self.present, next);
        self.push_past(previous);
        self.last_text_edit = None;
        debug!(
            "event=history_redo module=history past={} future={}",
            self.past.len(),
            self.future.len()
        );
        true
    }

    /// Replaces the document and forgets all history.
    ///
    /// The snapshot is trusted to satisfy the store invariants.
    pub fn load_state(&mut self, store: Store) {
        self.present = store;
        self.past.clear();
        self.future.clear();
        self.last_text_edit = None;
        debug!(
            "event=history_load module=history items={}",
            self.present.len()
        );
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    fn push_past(&mut self, store: Store) {
        self.past.push(store);
        if self.max_levels > 0 && self.past.len() > self.max_levels {
            self.past.remove(0);
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Store::default())
    }
}
