//! Header row: centered bold titles, clickable when the column sorts.

use dashboard_business::{ColumnKind, SortOrder, TableScreen};
use egui::{RichText, Ui};
use egui_extras::TableRow;
use ustr::Ustr;

use super::TableAction;

pub fn render_table_header(
    header: &mut TableRow<'_, '_>,
    screen: &TableScreen,
    sorted: Option<(Ustr, SortOrder)>,
) -> Option<TableAction> {
    let mut action = None;
    for column in screen.columns() {
        header.col(|ui| {
            if matches!(column.kind, ColumnKind::Selection) {
                action = action.or(render_page_checkbox(ui, screen));
                return;
            }
            let order = sorted.and_then(|(key, order)| (key == column.key).then_some(order));
            if render_header_cell(ui, &column.title, column.is_sortable(), order) {
                action = Some(TableAction::Sort(column.key));
            }
        });
    }
    action
}

/// Returns `true` when a sortable title was clicked.
#[inline]
fn render_header_cell(ui: &mut Ui, title: &str, sortable: bool, order: Option<SortOrder>) -> bool {
    ui.centered_and_justified(|ui| {
        if !sortable {
            ui.strong(title);
            return false;
        }
        let text = match order {
            Some(SortOrder::Asc) => format!("{title} ⏶"),
            Some(SortOrder::Desc) => format!("{title} ⏷"),
            None => title.to_owned(),
        };
        ui.selectable_label(order.is_some(), RichText::new(text).strong())
            .clicked()
    })
    .inner
}

/// Select-all checkbox; unchecking clears the whole selection.
fn render_page_checkbox(ui: &mut Ui, screen: &TableScreen) -> Option<TableAction> {
    let mut checked = screen.selection().has_selection();
    ui.centered_and_justified(|ui| {
        ui.checkbox(&mut checked, "").changed().then_some(if checked {
            TableAction::SelectPage
        } else {
            TableAction::ClearSelection
        })
    })
    .inner
}
