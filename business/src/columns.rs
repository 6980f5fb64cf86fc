//! Table column descriptors.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde_json::Value;
use ustr::Ustr;

use crate::format::{format_updated, parse_timestamp, readable_traffic};
use crate::i18n::Localizer;
use crate::permission::permission_label;
use crate::record::Record;
use crate::search::SortOrder;

pub type RenderFn = Arc<dyn Fn(&Record) -> String + Send + Sync>;
pub type SortKeyFn = Arc<dyn Fn(&Record) -> SortKey + Send + Sync>;

/// Comparable projection of a cell. Variants order before their contents.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum SortKey {
    Missing,
    Number(f64),
    Time(NaiveDateTime),
    Text(String),
}

impl SortKey {
    fn of_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => n.as_f64().map_or(Self::Missing, Self::Number),
            Some(Value::Bool(b)) => Self::Number(f64::from(u8::from(*b))),
            Some(Value::String(s)) => Self::Text(s.clone()),
            Some(Value::Null) | None => Self::Missing,
            Some(other) => Self::Text(other.to_string()),
        }
    }
}

#[derive(Clone, Default)]
pub enum Sorter {
    #[default]
    None,
    /// Sort by the column's natural key.
    Default,
    Key(SortKeyFn),
}

impl fmt::Debug for Sorter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Default => f.write_str("Default"),
            Self::Key(_) => f.write_str("Key(..)"),
        }
    }
}

/// Controls offered by the trailing actions column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowActions {
    pub edit: bool,
    pub delete: bool,
    /// Labels of caller-defined actions rendered after edit/delete.
    pub extra: Vec<Ustr>,
}

#[derive(Clone)]
pub enum ColumnKind {
    Id,
    Selection,
    Updated,
    Traffic,
    StatusPermission,
    Plain,
    Custom(RenderFn),
    Actions(RowActions),
}

impl fmt::Debug for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => f.write_str("Id"),
            Self::Selection => f.write_str("Selection"),
            Self::Updated => f.write_str("Updated"),
            Self::Traffic => f.write_str("Traffic"),
            Self::StatusPermission => f.write_str("StatusPermission"),
            Self::Plain => f.write_str("Plain"),
            Self::Custom(_) => f.write_str("Custom(..)"),
            Self::Actions(actions) => f.debug_tuple("Actions").field(actions).finish(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Column {
    pub key: Ustr,
    pub title: String,
    pub kind: ColumnKind,
    pub sorter: Sorter,
}

impl Column {
    /// A caller-defined column.
    pub fn custom(
        key: &str,
        title: impl Into<String>,
        render: impl Fn(&Record) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: Ustr::from(key),
            title: title.into(),
            kind: ColumnKind::Custom(Arc::new(render)),
            sorter: Sorter::None,
        }
    }

    pub fn with_sorter(mut self, sorter: Sorter) -> Self {
        self.sorter = sorter;
        self
    }

    pub fn is_sortable(&self) -> bool {
        !matches!(self.sorter, Sorter::None)
    }

    /// Cell text. Selection and actions cells are drawn by the table and render empty.
    pub fn render(&self, row: &Record) -> String {
        let key = self.key.as_str();
        match &self.kind {
            ColumnKind::Id => row
                .id()
                .map_or_else(|| format!("#{}", row.display("id")), |id| format!("#{id}")),
            ColumnKind::Selection | ColumnKind::Actions(_) => String::new(),
            ColumnKind::Updated => match row.get(key) {
                Some(Value::String(raw)) => format_updated(raw),
                _ => row.display(key),
            },
            ColumnKind::Traffic => row.get_f64(key).map(readable_traffic).unwrap_or_default(),
            ColumnKind::StatusPermission => row
                .get_i64(key)
                .map(|value| permission_label(value).into_owned())
                .unwrap_or_default(),
            ColumnKind::Plain => row.display(key),
            ColumnKind::Custom(render) => render(row),
        }
    }

    /// `None` when the column is not sortable.
    pub fn sort_key(&self, row: &Record) -> Option<SortKey> {
        let key = self.key.as_str();
        match &self.sorter {
            Sorter::None => None,
            Sorter::Key(sort_key) => Some(sort_key(row)),
            Sorter::Default => Some(match &self.kind {
                ColumnKind::Id => row.id().map_or(SortKey::Missing, |id| SortKey::Number(id as f64)),
                ColumnKind::Updated => row
                    .get_str(key)
                    .and_then(parse_timestamp)
                    .map_or(SortKey::Missing, SortKey::Time),
                ColumnKind::Traffic => row.get_f64(key).map_or(SortKey::Missing, SortKey::Number),
                _ => SortKey::of_value(row.get(key)),
            }),
        }
    }
}

/// Stable sort of `rows` by `column`; unsortable columns leave the order as is.
pub fn sort_rows(rows: &mut [Record], column: &Column, order: SortOrder) {
    if !column.is_sortable() {
        return;
    }

    rows.sort_by(|a, b| {
        let ordering = column
            .sort_key(a)
            .partial_cmp(&column.sort_key(b))
            .unwrap_or(Ordering::Equal);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Field list of a table.
#[derive(Debug, Clone)]
pub enum ColumnSpec {
    Fields(Vec<String>),
    /// Pre-built columns, kept as given.
    Custom(Vec<Column>),
}

/// Builds the ordered columns `[id, selection?] + fields + actions`.
pub struct ColumnBuilder<'a> {
    localizer: &'a dyn Localizer,
    lang: Ustr,
    selection: bool,
    actions: RowActions,
}

impl<'a> ColumnBuilder<'a> {
    pub fn new(localizer: &'a dyn Localizer, lang: Ustr) -> Self {
        Self {
            localizer,
            lang,
            selection: false,
            actions: RowActions::default(),
        }
    }

    pub fn selection(mut self, selection: bool) -> Self {
        self.selection = selection;
        self
    }

    pub fn actions(mut self, actions: RowActions) -> Self {
        self.actions = actions;
        self
    }

    pub fn build(&self, spec: &ColumnSpec) -> Vec<Column> {
        let mut columns = vec![Column {
            key: Ustr::from("id"),
            title: self.localizer.t("common.id"),
            kind: ColumnKind::Id,
            sorter: Sorter::Default,
        }];

        if self.selection {
            columns.push(Column {
                key: Ustr::from("selection"),
                title: String::new(),
                kind: ColumnKind::Selection,
                sorter: Sorter::None,
            });
        }

        match spec {
            ColumnSpec::Fields(fields) => {
                columns.extend(fields.iter().map(|field| self.field_column(field)));
            }
            ColumnSpec::Custom(custom) => columns.extend(custom.iter().cloned()),
        }

        columns.push(Column {
            key: Ustr::from("actions"),
            title: self.localizer.t("common.actions"),
            kind: ColumnKind::Actions(self.actions.clone()),
            sorter: Sorter::None,
        });

        columns
    }

    fn field_column(&self, field: &str) -> Column {
        let (kind, title, sorter) = match field {
            "updated" => (ColumnKind::Updated, self.localizer.t("common.updated"), Sorter::Default),
            "traffic" => (ColumnKind::Traffic, self.title(field), Sorter::Default),
            "status_permission" => (ColumnKind::StatusPermission, self.title(field), Sorter::None),
            _ => (ColumnKind::Plain, self.title(field), Sorter::Default),
        };

        Column {
            key: Ustr::from(field),
            title,
            kind,
            sorter,
        }
    }

    fn title(&self, field: &str) -> String {
        self.localizer.t(&format!("{}.{field}", self.lang))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::i18n::MessageCatalog;

    fn catalog() -> MessageCatalog {
        let mut catalog = MessageCatalog::new();
        catalog.add_translation("common.id", "ID");
        catalog.add_translation("common.updated", "Updated");
        catalog.add_translation("common.actions", "Actions");
        catalog.add_translation("node.name", "Name");
        catalog
    }

    fn row(value: Value) -> Record {
        Record::try_from(value).expect("object")
    }

    fn fields(names: &[&str]) -> ColumnSpec {
        ColumnSpec::Fields(names.iter().map(|name| (*name).to_owned()).collect())
    }

    fn keys(columns: &[Column]) -> Vec<&str> {
        columns.iter().map(|column| column.key.as_str()).collect()
    }

    #[test]
    fn order_is_id_selection_fields_actions() {
        let catalog = catalog();
        let columns = ColumnBuilder::new(&catalog, Ustr::from("node"))
            .selection(true)
            .build(&fields(&["name", "updated"]));
        assert_eq!(keys(&columns), vec!["id", "selection", "name", "updated", "actions"]);

        let columns =
            ColumnBuilder::new(&catalog, Ustr::from("node")).build(&fields(&["name"]));
        assert_eq!(keys(&columns), vec!["id", "name", "actions"]);
    }

    #[test]
    fn titles_are_localized() {
        let catalog = catalog();
        let columns = ColumnBuilder::new(&catalog, Ustr::from("node"))
            .build(&fields(&["name", "port"]));
        assert_eq!(columns[0].title, "ID");
        assert_eq!(columns[1].title, "Name");
        // missing translations fall back to the key
        assert_eq!(columns[2].title, "node.port");
        assert_eq!(columns[3].title, "Actions");
    }

    #[test]
    fn id_renders_with_hash() {
        let catalog = catalog();
        let columns = ColumnBuilder::new(&catalog, Ustr::from("node")).build(&fields(&[]));
        assert_eq!(columns[0].render(&row(json!({"id": 42}))), "#42");
    }

    #[test]
    fn updated_hides_zero_time() {
        let catalog = catalog();
        let columns =
            ColumnBuilder::new(&catalog, Ustr::from("node")).build(&fields(&["updated"]));
        let updated = &columns[1];
        assert_eq!(updated.render(&row(json!({"updated": "0001-01-01 00:00:00"}))), "");
        assert!(
            !updated
                .render(&row(json!({"updated": "2024-05-06 07:08:09"})))
                .is_empty()
        );
    }

    #[test]
    fn traffic_renders_bytes_and_sorts_raw() {
        let catalog = catalog();
        let columns =
            ColumnBuilder::new(&catalog, Ustr::from("node")).build(&fields(&["traffic"]));
        let traffic = &columns[1];
        let two = row(json!({"traffic": 2}));
        assert_eq!(traffic.render(&two), "2 GB");
        assert_eq!(traffic.sort_key(&two), Some(SortKey::Number(2.0)));
    }

    #[test]
    fn status_permission_labels() {
        let catalog = catalog();
        let columns = ColumnBuilder::new(&catalog, Ustr::from("node"))
            .build(&fields(&["status_permission"]));
        let column = &columns[1];
        assert_eq!(
            column.render(&row(json!({"status_permission": 1}))),
            "visible to users with matching plan"
        );
        assert_eq!(
            column.render(&row(json!({"status_permission": 9}))),
            "unknown (9)"
        );
        assert!(!column.is_sortable());
        assert_eq!(column.sort_key(&row(json!({"status_permission": 1}))), None);
    }

    #[test]
    fn mapped_fields_sort_by_default() {
        let catalog = catalog();
        let columns = ColumnBuilder::new(&catalog, Ustr::from("node"))
            .build(&fields(&["name", "traffic", "updated"]));
        assert!(columns[..4].iter().all(Column::is_sortable));
    }

    #[test]
    fn custom_columns_pass_through() {
        let catalog = catalog();
        let spec = ColumnSpec::Custom(vec![Column::custom("host", "Host", |row| {
            format!("{}:{}", row.display("host"), row.display("port"))
        })]);
        let columns = ColumnBuilder::new(&catalog, Ustr::from("node")).build(&spec);
        assert_eq!(keys(&columns), vec!["id", "host", "actions"]);
        assert_eq!(columns[1].title, "Host");
        assert_eq!(
            columns[1].render(&row(json!({"host": "a", "port": 1}))),
            "a:1"
        );
        assert!(!columns[1].is_sortable());
    }

    #[test]
    fn actions_column_carries_capabilities() {
        let catalog = catalog();
        let actions = RowActions {
            edit: true,
            delete: false,
            extra: vec![Ustr::from("reset")],
        };
        let columns = ColumnBuilder::new(&catalog, Ustr::from("node"))
            .actions(actions.clone())
            .build(&fields(&[]));
        match &columns[1].kind {
            ColumnKind::Actions(found) => assert_eq!(found, &actions),
            other => panic!("expected actions column, got {other:?}"),
        }
    }

    #[test]
    fn building_is_deterministic() {
        let catalog = catalog();
        let builder = ColumnBuilder::new(&catalog, Ustr::from("node")).selection(true);
        let spec = fields(&["name", "traffic", "updated"]);
        let first = builder.build(&spec);
        let second = builder.build(&spec);
        assert_eq!(keys(&first), keys(&second));
        let titles = |columns: &[Column]| -> Vec<String> {
            columns.iter().map(|c| c.title.clone()).collect()
        };
        assert_eq!(titles(&first), titles(&second));
    }

    #[test]
    fn sort_rows_by_updated() {
        let catalog = catalog();
        let columns =
            ColumnBuilder::new(&catalog, Ustr::from("node")).build(&fields(&["updated"]));
        let mut rows = vec![
            row(json!({"id": 1, "updated": "2024-01-02 00:00:00"})),
            row(json!({"id": 2, "updated": "2024-03-01 00:00:00"})),
            row(json!({"id": 3, "updated": "2023-12-31 00:00:00"})),
        ];

        sort_rows(&mut rows, &columns[1], SortOrder::Asc);
        let ids: Vec<_> = rows.iter().filter_map(Record::id).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        sort_rows(&mut rows, &columns[1], SortOrder::Desc);
        let ids: Vec<_> = rows.iter().filter_map(Record::id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
