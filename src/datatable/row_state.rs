//! Per-row transient UI state keyed by record identity.

use std::collections::{HashMap, HashSet};

/// State attached to one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowState {
    /// The delete confirmation dialog is open.
    pub confirm_delete: bool,
}

/// Row states plus the queue of confirmed deletions.
#[derive(Debug, Clone, Default)]
pub struct RowStates {
    states: HashMap<String, RowState>,
    confirmed: Vec<String>,
}

impl RowStates {
    /// State of the row with `key`; default when never touched.
    pub fn get(&self, key: &str) -> RowState {
        self.states.get(key).copied().unwrap_or_default()
    }

    /// Opens the delete dialog for `key`, closing any other open dialog.
    pub fn open_delete(&mut self, key: &str) {
        for state in self.states.values_mut() {
            state.confirm_delete = false;
        }
        self.states.entry(key.to_string()).or_default().confirm_delete = true;
        self.compact();
    }

    /// Closes the delete dialog for `key`. Returns whether it was open.
    pub fn close_delete(&mut self, key: &str) -> bool {
        let was_open = self.get(key).confirm_delete;
        if let Some(state) = self.states.get_mut(key) {
            state.confirm_delete = false;
        }
        self.compact();
        was_open
    }

    /// Key whose delete dialog is open, if any.
    pub fn pending_delete(&self) -> Option<&str> {
        self.states
            .iter()
            .find(|(_, s)| s.confirm_delete)
            .map(|(k, _)| k.as_str())
    }

    /// Queues `key` as confirmed for deletion.
    pub fn push_confirmed(&mut self, key: String) {
        if !self.confirmed.contains(&key) {
            self.confirmed.push(key);
        }
    }

    /// Drains the confirmed deletions in confirmation order.
    pub fn take_confirmed(&mut self) -> Vec<String> {
        std::mem::take(&mut self.confirmed)
    }

    /// Drops state of keys that are no longer present.
    pub fn retain_keys(&mut self, keys: &HashSet<String>) {
        self.states.retain(|k, _| keys.contains(k));
        self.confirmed.retain(|k| keys.contains(k));
    }

    fn compact(&mut self) {
        self.states.retain(|_, s| *s != RowState::default());
    }
}
