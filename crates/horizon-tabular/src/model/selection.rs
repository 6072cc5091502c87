//! Selection tracking for table rows.
//!
//! [`SelectionTracker`] keeps a set of row keys that survives filtering,
//! sorting and paging. A key is the string coercion of the row's key field,
//! so two rows whose keys coerce to the same string are the same row as far
//! as selection is concerned.
//!
//! The tracker only holds state. Mutating operations return `true` when the
//! set actually changed, and [`SelectionTracker::resolve`] turns the set back
//! into rows by scanning a dataset; `TableView` uses both to emit its
//! `selection_changed` signal.
//!
//! # Example
//!
//! ```
//! use horizon_tabular::model::{CheckState, Record, SelectionTracker};
//!
//! let rows = vec![
//!     Record::new().with("id", "a"),
//!     Record::new().with("id", "b"),
//! ];
//! let mut selection = SelectionTracker::new("id");
//!
//! assert!(selection.select_row("b", true));
//! assert_eq!(selection.check_state(&rows), CheckState::PartiallyChecked);
//! assert_eq!(selection.resolve(&rows), vec![rows[1].clone()]);
//!
//! // Deselecting "all" clears everything, not only the rows passed in.
//! selection.select_all(&rows[..1], false);
//! assert_eq!(selection.selected_count(), 0);
//! ```

use std::collections::HashSet;

use horizon_tabular_core::logging::targets;

use super::row::Row;
use super::value::CheckState;

/// The set of selected row keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTracker {
    key_field: String,
    keys: HashSet<String>,
    enabled: bool,
}

impl SelectionTracker {
    /// Creates an empty, enabled tracker identifying rows by `key_field`.
    pub fn new(key_field: impl Into<String>) -> Self {
        Self {
            key_field: key_field.into(),
            keys: HashSet::new(),
            enabled: true,
        }
    }

    /// The field rows are identified by.
    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    // =========================================================================
    // Enablement
    // =========================================================================

    /// Returns `true` if selection operations take effect.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables selection. While disabled every mutating
    /// operation is a no-op. Disabling keeps the current set.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn accepts_mutation(&self, operation: &'static str) -> bool {
        if !self.enabled {
            tracing::warn!(target: targets::SELECTION, operation, "selection is disabled, ignoring");
        }
        self.enabled
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Adds (`included == true`) or removes one key. Returns `true` if the
    /// set changed.
    pub fn select_row(&mut self, key: &str, included: bool) -> bool {
        if !self.accepts_mutation("select_row") {
            return false;
        }
        let changed = if included {
            self.keys.insert(key.to_owned())
        } else {
            self.keys.remove(key)
        };
        if changed {
            tracing::debug!(target: targets::SELECTION, key, included, selected = self.keys.len(), "row selection changed");
        }
        changed
    }

    /// Flips one key. Returns `true` unless selection is disabled.
    pub fn toggle_row(&mut self, key: &str) -> bool {
        let included = !self.keys.contains(key);
        self.select_row(key, included)
    }

    /// With `included == true`, adds the keys of `rows` to the set. With
    /// `included == false`, clears the whole set regardless of `rows`.
    ///
    /// Returns `true` if the set changed.
    pub fn select_all<'a, R, I>(&mut self, rows: I, included: bool) -> bool
    where
        R: Row + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        if !self.accepts_mutation("select_all") {
            return false;
        }
        if !included {
            return self.clear_keys();
        }

        let before = self.keys.len();
        for row in rows {
            self.keys.insert(row.key(&self.key_field));
        }
        let added = self.keys.len() - before;
        if added > 0 {
            tracing::debug!(target: targets::SELECTION, added, selected = self.keys.len(), "selected all visible rows");
        }
        added > 0
    }

    /// Empties the set. Returns `true` if it was not already empty.
    pub fn clear(&mut self) -> bool {
        if !self.accepts_mutation("clear") {
            return false;
        }
        self.clear_keys()
    }

    fn clear_keys(&mut self) -> bool {
        if self.keys.is_empty() {
            return false;
        }
        let cleared = self.keys.len();
        self.keys.clear();
        tracing::debug!(target: targets::SELECTION, cleared, "selection cleared");
        true
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns `true` if `key` is selected.
    pub fn is_selected(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Returns `true` if `row`'s key is selected.
    pub fn is_row_selected<R: Row>(&self, row: &R) -> bool {
        self.keys.contains(&row.key(&self.key_field))
    }

    /// Number of selected keys, including keys with no row in the current
    /// dataset.
    pub fn selected_count(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The selected keys, sorted.
    pub fn selected_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.keys.iter().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// State of a "select all" checkbox over `visible` rows.
    pub fn check_state<'a, R, I>(&self, visible: I) -> CheckState
    where
        R: Row + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let (mut total, mut selected) = (0usize, 0usize);
        for row in visible {
            total += 1;
            if self.is_row_selected(row) {
                selected += 1;
            }
        }

        if selected == 0 {
            CheckState::Unchecked
        } else if selected == total {
            CheckState::Checked
        } else {
            CheckState::PartiallyChecked
        }
    }

    /// The rows of `dataset` whose key is selected, in dataset order.
    ///
    /// Every row sharing a selected key is returned. Selected keys that match
    /// no row are skipped.
    pub fn resolve<R: Row + Clone>(&self, dataset: &[R]) -> Vec<R> {
        if self.keys.is_empty() {
            return Vec::new();
        }
        dataset
            .iter()
            .filter(|row| self.is_row_selected(*row))
            .cloned()
            .collect()
    }
}
