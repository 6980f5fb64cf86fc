//! Controller of one resource table.
//!
//! [`TableScreen`] owns the listing state in a [`StateCtx`] and drives the CRUD
//! API. Requests run in the background; their results are queued as state
//! updates and applied by [`TableScreen::sync`], which the UI calls once per
//! frame before drawing.

use std::fmt;
use std::sync::Arc;

use dashboard_states::{StateCtx, StateUpdater, TaskHandle, TaskSet};
use ustr::Ustr;

use crate::actions::{DeleteConfirm, LOAD_TASK, RowActionKind, RowActionsState, SAVE_TASK};
use crate::api::{
    CreateApi, CrudApi, DELETE_FAILED, DELETED, FETCH_FAILED, LOAD_FAILED, REQUIRED_MISSING,
    SAVE_FAILED, SAVED, UpdateApi,
};
use crate::columns::{Column, ColumnBuilder, ColumnSpec, RowActions, sort_rows};
use crate::form::{FieldUpdate, FormMode, FormState, FormValues};
use crate::i18n::Localizer;
use crate::notice::{Notice, NoticeQueue};
use crate::pagination::{PaginationError, PaginationState};
use crate::record::{Record, RowId};
use crate::resource::ResourceSchema;
use crate::runtime::{spawn, until_cancelled};
use crate::search::{SearchState, SortOrder};
use crate::selection::SelectionState;
use crate::table::TableData;

/// Record rewrite applied around the form.
pub type Transform = Arc<dyn Fn(Record) -> Record + Send + Sync>;

/// Per-table settings supplied by the page hosting the table.
#[derive(Clone, Default)]
pub struct TableOptions {
    /// Singular display name used in dialogs, e.g. `node`.
    pub name: String,
    /// Namespace for column title lookups.
    pub lang: Ustr,
    pub selection: bool,
    pub disable_create_modal: bool,
    /// Applied to a fetched row before it fills the edit form.
    pub prefix: Option<Transform>,
    /// Applied to the form data before it is submitted.
    pub suffix: Option<Transform>,
    /// Labels of extra row actions reported through [`TableScreen::take_triggered_actions`].
    pub extra_actions: Vec<Ustr>,
    /// Columns to show; defaults to the resource's `info` fields.
    pub columns: Option<ColumnSpec>,
    /// Form fields that must be filled in before a submit is sent.
    pub required: Vec<Ustr>,
}

impl fmt::Debug for TableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableOptions")
            .field("name", &self.name)
            .field("lang", &self.lang)
            .field("selection", &self.selection)
            .field("disable_create_modal", &self.disable_create_modal)
            .field("prefix", &self.prefix.is_some())
            .field("suffix", &self.suffix.is_some())
            .field("extra_actions", &self.extra_actions)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

impl TableOptions {
    pub fn new(name: impl Into<String>, lang: &str) -> Self {
        Self {
            name: name.into(),
            lang: Ustr::from(lang),
            ..Self::default()
        }
    }
}

pub struct TableScreen {
    ctx: StateCtx,
    api: CrudApi,
    schema: Arc<ResourceSchema>,
    options: TableOptions,
    columns: Vec<Column>,
    notices: NoticeQueue,
}

impl fmt::Debug for TableScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableScreen")
            .field("api", &self.api)
            .field("options", &self.options)
            .field("columns", &self.columns.len())
            .finish_non_exhaustive()
    }
}

impl TableScreen {
    pub fn new(
        api: CrudApi,
        schema: ResourceSchema,
        options: TableOptions,
        localizer: &dyn Localizer,
    ) -> Self {
        let mut ctx = StateCtx::new();
        ctx.add_state(SearchState::for_resource(schema.config()));
        ctx.add_state(PaginationState::new());
        ctx.add_state(SelectionState::new());
        ctx.add_state(TableData::default());
        ctx.add_state(FormState::default());
        ctx.add_state(RowActionsState::default());
        ctx.add_state(TaskSet::new());

        let mut screen = Self {
            ctx,
            api,
            schema: Arc::new(schema),
            options,
            columns: Vec::new(),
            notices: NoticeQueue::new(),
        };
        screen.rebuild_columns(localizer);
        screen
    }

    /// Regenerate the columns, e.g. after the language changed.
    pub fn rebuild_columns(&mut self, localizer: &dyn Localizer) {
        let spec = self.options.columns.clone().unwrap_or_else(|| {
            ColumnSpec::Fields(self.schema.info_fields().to_vec())
        });
        let actions = RowActions {
            edit: self.api.can_update(),
            delete: self.api.can_delete(),
            extra: self.options.extra_actions.clone(),
        };
        self.columns = ColumnBuilder::new(localizer, self.options.lang)
            .selection(self.options.selection)
            .actions(actions)
            .build(&spec);
    }

    pub fn ctx(&self) -> &StateCtx {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut StateCtx {
        &mut self.ctx
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn api(&self) -> &CrudApi {
        &self.api
    }

    pub fn data(&self) -> &TableData {
        self.ctx.state::<TableData>()
    }

    pub fn search(&self) -> &SearchState {
        self.ctx.state::<SearchState>()
    }

    pub fn pagination(&self) -> &PaginationState {
        self.ctx.state::<PaginationState>()
    }

    pub fn selection(&self) -> &SelectionState {
        self.ctx.state::<SelectionState>()
    }

    pub fn form(&self) -> &FormState {
        self.ctx.state::<FormState>()
    }

    pub fn pending_delete(&self) -> Option<&DeleteConfirm> {
        self.ctx.state::<RowActionsState>().confirm.as_ref()
    }

    /// Whether `kind` on `id` is still in flight. Its control should be disabled.
    pub fn is_busy(&self, kind: RowActionKind, id: RowId) -> bool {
        self.ctx
            .state::<TaskSet>()
            .is_running(&kind.task_label(id))
    }

    pub fn is_saving(&self) -> bool {
        self.ctx.state::<TaskSet>().is_running(SAVE_TASK)
    }

    /// No request in flight and no update waiting to be applied.
    pub fn is_idle(&self) -> bool {
        self.ctx.state::<TaskSet>().is_empty() && self.ctx.runtime().pending() == 0
    }

    pub fn can_create(&self) -> bool {
        self.api.can_create() && !self.options.disable_create_modal
    }

    /// Apply finished background work, then reload if a write asked for it or
    /// the page cursor ran past the end. Returns the number of applied updates.
    pub fn sync(&mut self) -> usize {
        let applied = self.ctx.sync();

        let data = self.ctx.state_mut::<TableData>();
        let reload = data.take_reload_request();
        let count = data.take_unchecked_count();

        let clamped = count.is_some_and(|count| {
            self.ctx
                .state_mut::<PaginationState>()
                .clamp_to(count)
        });

        if reload || clamped {
            self.load();
        }
        applied
    }

    pub fn drain_notices(&self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Fetch the current page. A load already in flight is superseded.
    pub fn load(&mut self) {
        let pagination = self.ctx.state::<PaginationState>().clone();
        self.ctx
            .state_mut::<SearchState>()
            .apply_pagination(&pagination);
        let params = self.ctx.state::<SearchState>().params.clone();

        let tasks = self.ctx.state_mut::<TaskSet>();
        tasks.cancel(LOAD_TASK);
        let Some(handle) = tasks.begin(LOAD_TASK) else {
            return;
        };
        self.ctx.state_mut::<TableData>().start_loading();

        log::info!(
            "Loading {} page {} ({} per page)",
            self.options.name,
            pagination.page(),
            pagination.page_size()
        );

        let list = Arc::clone(&self.api.list);
        let data = self.ctx.updater::<TableData>();
        let tasks = self.ctx.updater::<TaskSet>();
        let notifier = self.notices.notifier();

        spawn(async move {
            let token = handle.cancellation_token();
            let Some(result) = until_cancelled(&token, list.get(&params)).await else {
                return;
            };
            match result {
                Ok(page) => {
                    log::debug!("Loaded {} of {} rows", page.rows.len(), page.count);
                    data.update(move |data| data.replace(page));
                }
                Err(err) => {
                    log::warn!("Load failed: {err}");
                    notifier.error(err.user_message(LOAD_FAILED));
                    data.update(TableData::fail_loading);
                }
            }
            finish(&tasks, &handle);
        });
    }

    pub fn change_page(&mut self, page: u32) {
        self.ctx.state_mut::<PaginationState>().on_change(page);
        self.load();
    }

    pub fn change_page_size(&mut self, page_size: u32) -> Result<(), PaginationError> {
        self.ctx
            .state_mut::<PaginationState>()
            .on_update_page_size(page_size)?;
        self.load();
        Ok(())
    }

    /// Run the search bar query from the first page.
    pub fn submit_search(&mut self) {
        self.ctx.state_mut::<PaginationState>().on_change(1);
        self.load();
    }

    pub fn search_mut(&mut self) -> &mut SearchState {
        self.ctx.state_mut::<SearchState>()
    }

    /// Server-side sort by `field`; repeated calls flip the direction.
    pub fn sort_by(&mut self, field: &str) {
        self.ctx.state_mut::<SearchState>().sort_by(field);
        self.load();
    }

    /// Sort the loaded page without a round trip.
    pub fn sort_loaded(&mut self, column_key: &str, order: SortOrder) {
        let Some(column) = self.columns.iter().find(|c| c.key == column_key).cloned() else {
            log::warn!("No column {column_key} to sort by");
            return;
        };
        sort_rows(self.ctx.state_mut::<TableData>().rows_mut(), &column, order);
    }

    pub fn toggle_selection(&mut self, id: RowId) -> bool {
        self.ctx.state_mut::<SelectionState>().toggle(id)
    }

    /// Select every row of the loaded page.
    pub fn select_page(&mut self) {
        let ids: Vec<RowId> = self
            .ctx
            .state::<TableData>()
            .rows()
            .iter()
            .filter_map(Record::id)
            .collect();
        self.ctx.state_mut::<SelectionState>().select_all(ids);
    }

    pub fn clear_selection(&mut self) {
        self.ctx.state_mut::<SelectionState>().clear();
    }

    /// Fetch row `id` and open it in the edit form.
    pub fn request_edit(&mut self, id: RowId) {
        if !self.api.can_update() {
            log::warn!("Edit requested on {} without an update API", self.options.name);
            return;
        }
        let Some(handle) = self.begin(RowActionKind::Edit.task_label(id)) else {
            return;
        };

        let list = Arc::clone(&self.api.list);
        let schema = Arc::clone(&self.schema);
        let prefix = self.options.prefix.clone();
        let form = self.ctx.updater::<FormState>();
        let tasks = self.ctx.updater::<TaskSet>();
        let notifier = self.notices.notifier();

        spawn(async move {
            let token = handle.cancellation_token();
            let Some(result) = until_cancelled(&token, list.get_one(id)).await else {
                return;
            };
            match result {
                Ok(record) => {
                    let record = match &prefix {
                        Some(prefix) => prefix(record),
                        None => record,
                    };
                    let values = FormValues::from(record).normalize(&schema);
                    form.update(move |form| form.open_edit(id, values));
                }
                Err(err) => {
                    log::warn!("Fetching row {id} failed: {err}");
                    notifier.error(err.user_message(FETCH_FAILED));
                }
            }
            finish(&tasks, &handle);
        });
    }

    /// Ask for confirmation before deleting row `id`.
    pub fn request_delete(&mut self, id: RowId) {
        if !self.api.can_delete() {
            log::warn!("Delete requested on {} without a delete API", self.options.name);
            return;
        }
        self.ctx.state_mut::<RowActionsState>().confirm =
            Some(DeleteConfirm::new(id, &self.options.name));
    }

    pub fn cancel_delete(&mut self) {
        self.ctx.state_mut::<RowActionsState>().confirm = None;
    }

    /// Delete the row awaiting confirmation. Success reloads the list once.
    pub fn confirm_delete(&mut self) {
        let Some(confirm) = self.ctx.state_mut::<RowActionsState>().confirm.take() else {
            return;
        };
        let Some(delete) = self.api.delete.clone() else {
            return;
        };
        let id = confirm.id;
        let Some(handle) = self.begin(RowActionKind::Delete.task_label(id)) else {
            return;
        };

        let data = self.ctx.updater::<TableData>();
        let selection = self.ctx.updater::<SelectionState>();
        let tasks = self.ctx.updater::<TaskSet>();
        let notifier = self.notices.notifier();

        spawn(async move {
            let token = handle.cancellation_token();
            let Some(result) = until_cancelled(&token, delete.delete(id)).await else {
                return;
            };
            match result {
                Ok(()) => {
                    log::info!("Deleted row {id}");
                    notifier.success(DELETED);
                    selection.update(move |selection| selection.deselect(id));
                    data.update(TableData::request_reload);
                }
                Err(err) => {
                    log::warn!("Deleting row {id} failed: {err}");
                    notifier.error(err.user_message(DELETE_FAILED));
                }
            }
            finish(&tasks, &handle);
        });
    }

    /// Open the create form seeded with the example values.
    pub fn open_create(&mut self) {
        if !self.can_create() {
            log::warn!("Create is not available on {}", self.options.name);
            return;
        }
        let values = FormValues::from_examples(&self.schema);
        self.ctx.state_mut::<FormState>().open_create(values);
    }

    pub fn apply_field(&mut self, key: &str, update: FieldUpdate) {
        self.ctx.state_mut::<FormState>().apply(key, update);
    }

    pub fn close_form(&mut self) {
        self.ctx.state_mut::<TaskSet>().cancel(SAVE_TASK);
        self.ctx.state_mut::<FormState>().close();
    }

    /// Submit the form as a create or an update depending on its mode.
    pub fn submit_form(&mut self) {
        let form = self.ctx.state::<FormState>();
        if !form.open {
            return;
        }
        let missing = form.values.missing(&self.options.required);
        if !missing.is_empty() {
            let fields = missing.iter().map(Ustr::as_str).collect::<Vec<_>>();
            self.notices
                .notifier()
                .error(format!("{REQUIRED_MISSING}: {}", fields.join(", ")));
            return;
        }

        let mut record = form.values.record().clone();
        if let Some(suffix) = &self.options.suffix {
            record = suffix(record);
        }

        let save = match form.mode {
            FormMode::Create => self.api.create.clone().map(Save::Create),
            FormMode::Edit(id) => self.api.update.clone().map(|api| Save::Update(api, id)),
        };
        let Some(save) = save else {
            log::warn!("Submit on {} without a matching API", self.options.name);
            self.notices.notifier().error(SAVE_FAILED);
            return;
        };

        let Some(handle) = self.begin(SAVE_TASK) else {
            return;
        };
        self.ctx.state_mut::<FormState>().submitting = true;

        let form = self.ctx.updater::<FormState>();
        let data = self.ctx.updater::<TableData>();
        let tasks = self.ctx.updater::<TaskSet>();
        let notifier = self.notices.notifier();

        spawn(async move {
            let token = handle.cancellation_token();
            let request = async {
                match save {
                    Save::Create(api) => api.post(&record).await,
                    Save::Update(api, id) => api.put(id, &record).await,
                }
            };
            let Some(result) = until_cancelled(&token, request).await else {
                return;
            };
            match result {
                Ok(()) => {
                    notifier.success(SAVED);
                    form.update(FormState::close);
                    data.update(TableData::request_reload);
                }
                Err(err) => {
                    log::warn!("Saving failed: {err}");
                    notifier.error(err.user_message(SAVE_FAILED));
                    form.update(|form| form.submitting = false);
                }
            }
            finish(&tasks, &handle);
        });
    }

    /// Record a click on a caller-defined action.
    pub fn trigger_action(&mut self, label: Ustr, id: RowId) {
        self.ctx
            .state_mut::<RowActionsState>()
            .trigger(label, id);
    }

    pub fn take_triggered_actions(&mut self) -> Vec<(Ustr, RowId)> {
        self.ctx.state_mut::<RowActionsState>().take_triggered()
    }

    /// Cancel everything in flight. Late responses are dropped.
    pub fn close(&mut self) {
        log::info!("Closing {} table", self.options.name);
        self.ctx.state_mut::<TaskSet>().cancel_all();
        self.ctx.state_mut::<FormState>().close();
        self.ctx.state_mut::<RowActionsState>().confirm = None;
    }

    fn begin(&mut self, label: impl AsRef<str>) -> Option<TaskHandle> {
        let label = label.as_ref();
        let handle = self.ctx.state_mut::<TaskSet>().begin(label);
        if handle.is_none() {
            log::info!("Ignoring {label}: already in flight");
        }
        handle
    }
}

impl Drop for TableScreen {
    fn drop(&mut self) {
        self.ctx.state_mut::<TaskSet>().cancel_all();
    }
}

fn finish(tasks: &StateUpdater<TaskSet>, handle: &TaskHandle) {
    let id = handle.id();
    tasks.update(move |tasks| tasks.finish(id));
}

/// The request a form submit turns into.
enum Save {
    Create(Arc<dyn CreateApi>),
    Update(Arc<dyn UpdateApi>, RowId),
}
