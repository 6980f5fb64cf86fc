use std::any::Any;

use dashboard_states::State;

use crate::api::Page;
use crate::record::Record;

/// Rows of the current page as last loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableData {
    rows: Vec<Record>,
    count: u64,
    loading: bool,
    /// Set by a finished write; the screen reloads on its next sync.
    reload_requested: bool,
    /// Set when a page arrived and the cursor has not been checked against it yet.
    unchecked_count: bool,
}

impl State for TableData {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl TableData {
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Total number of matches reported by the server.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn start_loading(&mut self) {
        self.loading = true;
    }

    pub fn fail_loading(&mut self) {
        self.loading = false;
    }

    pub fn replace(&mut self, page: Page) {
        self.rows = page.rows;
        self.count = page.count;
        self.loading = false;
        self.unchecked_count = true;
    }

    pub fn request_reload(&mut self) {
        self.reload_requested = true;
    }

    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }

    /// The count of a freshly arrived page, once.
    pub fn take_unchecked_count(&mut self) -> Option<u64> {
        std::mem::take(&mut self.unchecked_count).then_some(self.count)
    }

    /// Sort the loaded page in place.
    pub fn rows_mut(&mut self) -> &mut [Record] {
        &mut self.rows
    }
}
