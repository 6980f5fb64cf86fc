//! Row rendering for the resource table.

use dashboard_business::{ColumnKind, Record, TableScreen};
use egui::{Stroke, Ui};
use egui_extras::TableRow;

use super::TableAction;
use super::cells::{render_action_buttons, render_selection_cell, render_text_cell};

/// Renders one record. Rows without an id render their cells but offer no actions.
pub fn render_row(
    row: &mut TableRow<'_, '_>,
    screen: &TableScreen,
    record: &Record,
) -> Option<TableAction> {
    let mut action = None;
    let id = record.id();

    for column in screen.columns() {
        row.col(|ui| {
            match (&column.kind, id) {
                (ColumnKind::Selection, Some(id)) => {
                    if render_selection_cell(ui, screen.selection().is_selected(id)) {
                        action = Some(TableAction::Toggle(id));
                    }
                }
                (ColumnKind::Actions(actions), Some(id)) => {
                    action = action.or(render_action_buttons(ui, screen, actions, id));
                }
                (ColumnKind::Selection | ColumnKind::Actions(_), None) => {}
                _ => render_text_cell(ui, &column.kind, &column.render(record)),
            }
            draw_cell_bottom_border(ui);
        });
    }
    action
}

/// Draws a bottom border line for a cell.
#[inline]
fn draw_cell_bottom_border(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let border_color = ui.visuals().widgets.noninteractive.bg_stroke.color;
    ui.painter().hline(
        rect.left()..=rect.right(),
        rect.bottom(),
        Stroke::new(1.0, border_color),
    );
}
