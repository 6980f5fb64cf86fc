//! Column widths for the resource table.

use dashboard_business::{Column as ResourceColumn, ColumnKind};
use egui_extras::Column;

pub const ID_WIDTH: f32 = 60.0;
pub const SELECTION_WIDTH: f32 = 32.0;
pub const UPDATED_WIDTH: f32 = 150.0;
pub const ACTIONS_WIDTH: f32 = 160.0;
pub const MIN_FIELD_WIDTH: f32 = 80.0;
pub const ROW_HEIGHT: f32 = 30.0;
pub const HEADER_HEIGHT: f32 = 24.0;

/// One layout column per resource column; the last field column takes the remainder.
pub fn table_columns(columns: &[ResourceColumn]) -> Vec<Column> {
    let last_field = columns
        .iter()
        .rposition(|column| is_field(&column.kind));

    columns
        .iter()
        .enumerate()
        .map(|(index, column)| match column.kind {
            ColumnKind::Id => Column::exact(ID_WIDTH),
            ColumnKind::Selection => Column::exact(SELECTION_WIDTH),
            ColumnKind::Updated => Column::initial(UPDATED_WIDTH),
            ColumnKind::Actions(_) => Column::exact(ACTIONS_WIDTH),
            _ if Some(index) == last_field => Column::remainder().at_least(MIN_FIELD_WIDTH),
            _ => Column::auto().at_least(MIN_FIELD_WIDTH),
        })
        .collect()
}

#[inline]
fn is_field(kind: &ColumnKind) -> bool {
    matches!(
        kind,
        ColumnKind::Traffic | ColumnKind::StatusPermission | ColumnKind::Plain | ColumnKind::Custom(_)
    )
}
