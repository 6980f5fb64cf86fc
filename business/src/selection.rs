use std::any::Any;
use std::collections::BTreeSet;

use dashboard_states::State;

use crate::RowId;

/// Checked rows of a table with a selection column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: BTreeSet<RowId>,
    has_selection: bool,
}

impl State for SelectionState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn refresh(&mut self) {
        self.has_selection = !self.selected.is_empty();
    }

    /// Replace the whole selection.
    pub fn set_selected(&mut self, ids: impl IntoIterator<Item = RowId>) {
        self.selected = ids.into_iter().collect();
        self.refresh();
    }

    /// Flip membership of `id`; returns whether it is now selected.
    pub fn toggle(&mut self, id: RowId) -> bool {
        let now_selected = if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        };
        self.refresh();
        now_selected
    }

    pub fn select(&mut self, id: RowId) {
        self.selected.insert(id);
        self.refresh();
    }

    pub fn deselect(&mut self, id: RowId) {
        self.selected.remove(&id);
        self.refresh();
    }

    pub fn select_all(&mut self, ids: impl IntoIterator<Item = RowId>) {
        self.selected.extend(ids);
        self.refresh();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.refresh();
    }

    pub fn is_selected(&self, id: RowId) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected(&self) -> &BTreeSet<RowId> {
        &self.selected
    }

    pub fn has_selection(&self) -> bool {
        self.has_selection
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(selection: &SelectionState) {
        assert_eq!(selection.has_selection(), selection.len() > 0);
    }

    #[test]
    fn has_selection_tracks_every_mutation() {
        let mut selection = SelectionState::new();
        assert_consistent(&selection);

        selection.toggle(1);
        assert_consistent(&selection);
        assert!(selection.has_selection());

        selection.toggle(1);
        assert_consistent(&selection);
        assert!(!selection.has_selection());

        selection.select_all([1, 2, 3]);
        assert_consistent(&selection);

        selection.deselect(2);
        assert_consistent(&selection);

        selection.deselect(1);
        selection.deselect(3);
        assert_consistent(&selection);
        assert!(!selection.has_selection());

        selection.set_selected([9]);
        assert_consistent(&selection);

        selection.clear();
        assert_consistent(&selection);

        selection.select(4);
        assert_consistent(&selection);
        assert!(selection.is_selected(4));
    }

    #[test]
    fn toggle_reports_new_membership() {
        let mut selection = SelectionState::new();
        assert!(selection.toggle(7));
        assert!(!selection.toggle(7));
    }

    #[test]
    fn set_selected_deduplicates() {
        let mut selection = SelectionState::new();
        selection.set_selected([3, 3, 1]);
        assert_eq!(selection.selected().iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    }
}
