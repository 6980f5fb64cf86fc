//! Headless core of the dashboard's resource tables.
//!
//! Everything here is UI-toolkit agnostic: resource configs and the field
//! kinds derived from them, listing state (search, pagination, selection),
//! column descriptors, form values, the CRUD contract with its REST client,
//! and [`TableScreen`], which ties them together.

mod actions;
mod api;
mod columns;
mod config;
mod field;
mod form;
pub mod format;
pub mod http;
mod http_resource;
mod i18n;
mod notice;
mod pagination;
mod permission;
mod record;
mod resource;
mod runtime;
mod screen;
mod search;
mod selection;
mod table;
mod test_utils;

pub use actions::{DeleteConfirm, LOAD_TASK, RowActionKind, RowActionsState, SAVE_TASK};
pub use api::{
    ApiError, ApiResult, BaseResponse, CreateApi, CrudApi, DELETE_FAILED, DELETED, DataResponse,
    DeleteApi, FETCH_FAILED, LOAD_FAILED, ListApi, Page, PageResponse, REQUIRED_MISSING,
    SAVE_FAILED, SAVED, UpdateApi, decode_ack, decode_page, decode_record,
};
pub use columns::{
    Column, ColumnBuilder, ColumnKind, ColumnSpec, RenderFn, RowActions, SortKey, SortKeyFn,
    Sorter, sort_rows,
};
pub use config::BusinessConfig;
pub use field::{
    DATE_PICKER_FORMAT, FieldRenderer, FieldView, FieldWidget, SectionView, TRAFFIC_DECIMALS, TRAFFIC_MIN,
    TRAFFIC_SUFFIX,
};
pub use form::{FieldUpdate, FormMode, FormState, FormValues, KeyValuePair};
pub use http_resource::HttpResource;
pub use i18n::{Localizer, MessageCatalog};
pub use notice::{Notice, NoticeLevel, NoticeQueue, Notifier};
pub use pagination::{PAGE_SIZES, PaginationError, PaginationState};
pub use permission::{StatusPermission, permission_label};
pub use record::{Record, RowId};
pub use resource::{
    ConfigError, FieldKind, FormSection, InferredTypes, ResourceConfig, ResourceSchema,
};
pub use runtime::{spawn, until_cancelled};
pub use screen::{TableOptions, TableScreen, Transform};
pub use search::{SearchItem, SearchParams, SearchState, SearchType, SortOrder};
pub use selection::SelectionState;
pub use table::TableData;
