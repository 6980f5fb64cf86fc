//! Cell content per column kind.

use dashboard_business::{ColumnKind, RowActionKind, RowActions, RowId, TableScreen};
use egui::{RichText, Ui};

use super::TableAction;
use crate::utils::colors::COLOR_RED;

#[inline]
pub fn render_text_cell(ui: &mut Ui, kind: &ColumnKind, text: &str) {
    ui.centered_and_justified(|ui| match kind {
        ColumnKind::Id | ColumnKind::Updated => {
            ui.label(RichText::new(text).monospace());
        }
        _ => {
            ui.label(text);
        }
    });
}

/// Returns `true` when the checkbox was toggled.
#[inline]
pub fn render_selection_cell(ui: &mut Ui, selected: bool) -> bool {
    let mut checked = selected;
    ui.centered_and_justified(|ui| ui.checkbox(&mut checked, "").changed())
        .inner
}

/// Edit, delete and caller actions. A control whose request is in flight is disabled.
pub fn render_action_buttons(
    ui: &mut Ui,
    screen: &TableScreen,
    actions: &RowActions,
    id: RowId,
) -> Option<TableAction> {
    let mut action = None;

    ui.horizontal_centered(|ui| {
        if actions.edit {
            let busy = screen.is_busy(RowActionKind::Edit, id);
            if ui.add_enabled(!busy, egui::Button::new("Edit")).clicked() {
                action = Some(TableAction::Edit(id));
            }
        }
        if actions.delete {
            let busy = screen.is_busy(RowActionKind::Delete, id);
            let button = egui::Button::new(RichText::new("Delete").color(COLOR_RED));
            if ui.add_enabled(!busy, button).clicked() {
                action = Some(TableAction::Delete(id));
            }
        }
        for label in &actions.extra {
            if ui.button(label.as_str()).clicked() {
                action = Some(TableAction::Custom(*label, id));
            }
        }
    });

    action
}
