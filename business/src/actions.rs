//! Row actions: task labels, delete confirmation and caller-defined actions.

use std::any::Any;
use std::fmt;

use dashboard_states::State;
use ustr::Ustr;

use crate::record::RowId;

/// An action offered in the actions column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowActionKind {
    Edit,
    Delete,
}

impl RowActionKind {
    /// Label of the background task for this action on `id`; at most one runs per label.
    pub fn task_label(self, id: RowId) -> String {
        format!("{self}:{id}")
    }
}

impl fmt::Display for RowActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edit => f.write_str("edit"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

/// Task label of the list load.
pub const LOAD_TASK: &str = "load";
/// Task label of a form submission.
pub const SAVE_TASK: &str = "save";

/// A delete waiting for the user's confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirm {
    pub id: RowId,
    pub title: String,
    pub content: String,
}

impl DeleteConfirm {
    /// Dialog texts for deleting one `name` entry.
    pub fn new(id: RowId, name: &str) -> Self {
        Self {
            id,
            title: format!("Delete {name}"),
            content: format!("Are you sure you want to delete this {name}?"),
        }
    }
}

/// Pending confirmation and caller actions not yet handled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowActionsState {
    pub confirm: Option<DeleteConfirm>,
    triggered: Vec<(Ustr, RowId)>,
}

impl State for RowActionsState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl RowActionsState {
    pub fn trigger(&mut self, label: Ustr, id: RowId) {
        self.triggered.push((label, id));
    }

    pub fn take_triggered(&mut self) -> Vec<(Ustr, RowId)> {
        std::mem::take(&mut self.triggered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_texts_name_the_resource() {
        let confirm = DeleteConfirm::new(4, "node");
        assert_eq!(confirm.title, "Delete node");
        assert_eq!(confirm.content, "Are you sure you want to delete this node?");
    }

    #[test]
    fn task_labels_are_per_row() {
        assert_eq!(RowActionKind::Delete.task_label(42), "delete:42");
        assert_eq!(RowActionKind::Edit.task_label(1), "edit:1");
    }

    #[test]
    fn triggered_actions_are_taken_once() {
        let mut state = RowActionsState::default();
        state.trigger(Ustr::from("reset"), 3);
        assert_eq!(state.take_triggered(), vec![(Ustr::from("reset"), 3)]);
        assert!(state.take_triggered().is_empty());
    }
}
