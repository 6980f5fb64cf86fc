//! Delete confirmation dialog.

use dashboard_business::{RowActionKind, TableScreen};
use egui::{Align2, RichText, Ui, Window};

use crate::utils::colors::COLOR_RED;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Confirm,
    Cancel,
}

/// Draws the pending delete confirmation, if any.
pub fn show_confirm_dialog(ui: &mut Ui, screen: &TableScreen) -> Option<ConfirmAction> {
    let confirm = screen.pending_delete()?;
    let busy = screen.is_busy(RowActionKind::Delete, confirm.id);
    let mut action = None;

    Window::new(confirm.title.as_str())
        .id(egui::Id::new("delete_confirm"))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ui.ctx(), |ui| {
            ui.label(confirm.content.as_str());
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let button = egui::Button::new(RichText::new("Confirm").color(COLOR_RED));
                if ui.add_enabled(!busy, button).clicked() {
                    action = Some(ConfirmAction::Confirm);
                }
                if ui.button("Cancel").clicked() {
                    action = Some(ConfirmAction::Cancel);
                }
            });
        });

    action
}

pub fn apply_confirm_action(screen: &mut TableScreen, action: ConfirmAction) {
    match action {
        ConfirmAction::Confirm => screen.confirm_delete(),
        ConfirmAction::Cancel => screen.cancel_delete(),
    }
}
