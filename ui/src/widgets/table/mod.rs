//! Resource table rendering.
//!
//! - `columns`: column widths
//! - `header`: header row with sort indicators
//! - `row`: one record per row
//! - `cells`: per-kind cell content
//!
//! Rendering only reads the screen. Clicks come back as [`TableAction`]s and
//! are applied with [`TableView::apply`] once the table is drawn.

mod cells;
pub mod columns;
pub mod header;
pub mod row;

use dashboard_business::{RowId, SortOrder, TableScreen};
use egui::Ui;
use egui_extras::TableBuilder;
use ustr::Ustr;

use self::columns::{HEADER_HEIGHT, ROW_HEIGHT, table_columns};
use self::header::render_table_header;
use self::row::render_row;

/// What a click in the table asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    Sort(Ustr),
    Toggle(RowId),
    SelectPage,
    ClearSelection,
    Edit(RowId),
    Delete(RowId),
    Custom(Ustr, RowId),
}

/// View-local table state: the client-side sort of the loaded page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    sorted: Option<(Ustr, SortOrder)>,
}

impl TableView {
    pub fn sorted(&self) -> Option<(Ustr, SortOrder)> {
        self.sorted
    }

    /// Draw the loaded page of `screen`.
    pub fn show(&self, ui: &mut Ui, screen: &TableScreen) -> Vec<TableAction> {
        let mut actions = Vec::new();
        let rows = screen.data().rows();

        let mut builder = TableBuilder::new(ui)
            .id_salt(screen.options().name.as_str())
            .striped(true)
            .resizable(true);
        for column in table_columns(screen.columns()) {
            builder = builder.column(column);
        }
        builder
            .header(HEADER_HEIGHT, |mut header| {
                actions.extend(render_table_header(&mut header, screen, self.sorted));
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut table_row| {
                    let record = &rows[table_row.index()];
                    actions.extend(render_row(&mut table_row, screen, record));
                });
            });

        if rows.is_empty() && !screen.data().is_loading() {
            ui.vertical_centered(|ui| ui.weak("No data"));
        }
        actions
    }

    /// Apply `actions` collected from [`Self::show`].
    pub fn apply(&mut self, screen: &mut TableScreen, actions: Vec<TableAction>) {
        for action in actions {
            log::debug!("Table action {action:?}");
            match action {
                TableAction::Sort(key) => {
                    let order = match self.sorted {
                        Some((current, order)) if current == key => order.toggled(),
                        _ => SortOrder::Asc,
                    };
                    self.sorted = Some((key, order));
                    screen.sort_loaded(&key, order);
                }
                TableAction::Toggle(id) => {
                    screen.toggle_selection(id);
                }
                TableAction::SelectPage => screen.select_page(),
                TableAction::ClearSelection => screen.clear_selection(),
                TableAction::Edit(id) => screen.request_edit(id),
                TableAction::Delete(id) => screen.request_delete(id),
                TableAction::Custom(label, id) => screen.trigger_action(label, id),
            }
        }
    }

    /// A reload replaces the rows; the old client-side sort no longer holds.
    pub fn reset_sort(&mut self) {
        self.sorted = None;
    }
}
