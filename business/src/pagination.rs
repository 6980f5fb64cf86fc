use std::any::Any;

use dashboard_states::State;
use thiserror::Error;

/// Page sizes offered by the size picker.
pub const PAGE_SIZES: [u32; 5] = [10, 25, 50, 75, 100];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("unsupported page size {0}")]
    UnsupportedPageSize(u32),
}

/// Page cursor of one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    page: u32,
    page_size: u32,
    pub show_size_picker: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PAGE_SIZES[0],
            show_size_picker: true,
        }
    }
}

impl State for PaginationState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl PaginationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn page_sizes(&self) -> &'static [u32] {
        &PAGE_SIZES
    }

    /// Jump to `page`. Not bounded by the result count; see [`Self::clamp_to`].
    pub fn on_change(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Switch page size and go back to the first page.
    ///
    /// Sizes outside [`PAGE_SIZES`] are rejected and leave the state untouched.
    pub fn on_update_page_size(&mut self, page_size: u32) -> Result<(), PaginationError> {
        if !PAGE_SIZES.contains(&page_size) {
            return Err(PaginationError::UnsupportedPageSize(page_size));
        }
        self.page_size = page_size;
        self.page = 1;
        Ok(())
    }

    /// Row offset of the current page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// Number of pages for `count` rows; an empty listing still has one page.
    pub fn page_count(&self, count: u64) -> u32 {
        let pages = count.div_ceil(u64::from(self.page_size)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Pull the page back inside `count` rows. Returns whether it moved.
    pub fn clamp_to(&mut self, count: u64) -> bool {
        let last = self.page_count(count);
        if self.page > last {
            self.page = last;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let pagination = PaginationState::new();
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.page_size(), 10);
        assert!(pagination.show_size_picker);
        assert_eq!(pagination.page_sizes(), &[10, 25, 50, 75, 100]);
    }

    #[test]
    fn page_size_change_resets_page_for_every_choice() {
        for &size in &PAGE_SIZES {
            for start in [1, 2, 7, 40] {
                let mut pagination = PaginationState::new();
                pagination.on_change(start);

                pagination
                    .on_update_page_size(size)
                    .expect("listed sizes are accepted");

                assert_eq!(pagination.page(), 1);
                assert_eq!(pagination.page_size(), size);
            }
        }
    }

    #[test]
    fn unsupported_page_size_is_rejected() {
        let mut pagination = PaginationState::new();
        pagination.on_change(3);

        let result = pagination.on_update_page_size(33);

        assert_eq!(result, Err(PaginationError::UnsupportedPageSize(33)));
        assert_eq!(pagination.page(), 3);
        assert_eq!(pagination.page_size(), 10);
    }

    #[test]
    fn on_change_is_unbounded_above_but_not_below() {
        let mut pagination = PaginationState::new();
        pagination.on_change(99);
        assert_eq!(pagination.page(), 99);

        pagination.on_change(0);
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn offset_follows_page_and_size() {
        let mut pagination = PaginationState::new();
        pagination
            .on_update_page_size(25)
            .expect("25 is a listed size");
        pagination.on_change(3);
        assert_eq!(pagination.offset(), 50);
    }

    #[test]
    fn clamp_to_pulls_page_back() {
        let mut pagination = PaginationState::new();
        pagination.on_change(9);

        assert!(pagination.clamp_to(31));
        assert_eq!(pagination.page(), 4);

        assert!(!pagination.clamp_to(31));
        assert!(pagination.clamp_to(0));
        assert_eq!(pagination.page(), 1);
    }
}
