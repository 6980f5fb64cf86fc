//! Query parameters of a listing and the search bar descriptors.

use std::any::Any;

use dashboard_states::State;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ustr::Ustr;

use crate::PaginationState;
use crate::resource::ResourceConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Parameters of the `get` call of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub limit: u32,
    pub offset: u64,
    /// Field the `search` text applies to.
    pub filter: String,
    pub search: String,
    pub exact: bool,
    /// Field to sort by.
    pub order: String,
    pub sort: SortOrder,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
            filter: "id".to_owned(),
            search: String::new(),
            exact: false,
            order: "id".to_owned(),
            sort: SortOrder::Desc,
        }
    }
}

impl SearchParams {
    /// Query string pairs in wire order; `exact` is sent as `0`/`1`.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("filter", self.filter.clone()),
            ("search", self.search.clone()),
            ("exact", u8::from(self.exact).to_string()),
            ("order", self.order.clone()),
            ("sort", self.sort.as_str().to_owned()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Pick one of `search_list`.
    Filter,
    /// Free text.
    Keyword,
}

/// One searchable field as offered by the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    pub kind: SearchType,
    pub name: Ustr,
    pub fuzzy: bool,
    pub search_list: Vec<String>,
}

impl SearchItem {
    /// Boolean fields become a `true`/`false` filter, everything else a fuzzy keyword.
    pub fn for_field(name: &str, config: &ResourceConfig) -> Self {
        let is_boolean = matches!(config.example.get(name), Some(Value::Bool(_)))
            || config.boolean.iter().any(|field| field == name);

        if is_boolean {
            Self {
                kind: SearchType::Filter,
                name: Ustr::from(name),
                fuzzy: false,
                search_list: vec!["true".to_owned(), "false".to_owned()],
            }
        } else {
            Self {
                kind: SearchType::Keyword,
                name: Ustr::from(name),
                fuzzy: true,
                search_list: Vec::new(),
            }
        }
    }
}

/// Search bar state of one listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub params: SearchParams,
    items: Vec<SearchItem>,
}

impl State for SearchState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search state offering the `search` fields of `config`.
    pub fn for_resource(config: &ResourceConfig) -> Self {
        Self {
            params: SearchParams::default(),
            items: config
                .search
                .iter()
                .map(|field| SearchItem::for_field(field, config))
                .collect(),
        }
    }

    pub fn items(&self) -> &[SearchItem] {
        &self.items
    }

    pub fn item(&self, name: &str) -> Option<&SearchItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Select the filtered field. Exactness follows the field's fuzziness.
    pub fn select_filter(&mut self, name: &str) {
        self.params.filter = name.to_owned();
        self.params.exact = self.item(name).is_some_and(|item| !item.fuzzy);
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.params.search = text.into();
    }

    /// Sort by `field`; sorting by the current field again flips the direction.
    pub fn sort_by(&mut self, field: &str) {
        if self.params.order == field {
            self.params.sort = self.params.sort.toggled();
        } else {
            self.params.order = field.to_owned();
            self.params.sort = SortOrder::Desc;
        }
    }

    /// Derive `limit`/`offset` from the page cursor.
    pub fn apply_pagination(&mut self, pagination: &PaginationState) {
        self.params.limit = pagination.page_size();
        self.params.offset = pagination.offset();
    }

    pub fn reset(&mut self) {
        self.params = SearchParams::default();
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn config() -> ResourceConfig {
        serde_json::from_value(json!({
            "form": [],
            "info": [],
            "search": ["name", "enabled"],
            "example": {"name": "", "enabled": false},
        }))
        .expect("valid config")
    }

    #[test]
    fn defaults() {
        let params = SearchParams::default();
        assert_eq!(params.filter, "id");
        assert!(!params.exact);
        assert_eq!(params.search, "");
        assert_eq!(params.order, "id");
        assert_eq!(params.sort, SortOrder::Desc);
        assert_eq!(params.limit, 10);
        assert_eq!(params.offset, 0);
    }

    #[test]
    fn query_sends_exact_as_digit() {
        let params = SearchParams {
            exact: true,
            ..SearchParams::default()
        };
        let query = params.to_query();
        assert!(query.contains(&("exact", "1".to_owned())));
        assert!(query.contains(&("sort", "desc".to_owned())));
    }

    #[test]
    fn sort_order_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(SortOrder::Asc).expect("serialize"),
            json!("asc")
        );
    }

    #[test]
    fn items_follow_example_types() {
        let state = SearchState::for_resource(&config());
        let name = state.item("name").expect("name item");
        assert_eq!(name.kind, SearchType::Keyword);
        assert!(name.fuzzy);

        let enabled = state.item("enabled").expect("enabled item");
        assert_eq!(enabled.kind, SearchType::Filter);
        assert!(!enabled.fuzzy);
        assert_eq!(enabled.search_list, vec!["true", "false"]);
    }

    #[test]
    fn filter_selection_sets_exactness() {
        let mut state = SearchState::for_resource(&config());
        state.select_filter("enabled");
        assert!(state.params.exact);
        state.select_filter("name");
        assert!(!state.params.exact);
        assert_eq!(state.params.filter, "name");
    }

    #[test]
    fn sort_by_same_field_toggles() {
        let mut state = SearchState::new();
        state.sort_by("id");
        assert_eq!(state.params.sort, SortOrder::Asc);
        state.sort_by("name");
        assert_eq!(state.params.order, "name");
        assert_eq!(state.params.sort, SortOrder::Desc);
    }

    #[test]
    fn pagination_drives_limit_and_offset() {
        let mut pagination = PaginationState::new();
        pagination
            .on_update_page_size(25)
            .expect("supported page size");
        pagination.on_change(3);

        let mut state = SearchState::new();
        state.apply_pagination(&pagination);
        assert_eq!(state.params.limit, 25);
        assert_eq!(state.params.offset, 50);
    }
}
