//! Page-plus-filters state for one listing view.

use crate::PageNumber;

/// Current page and active filter set of a listing view.
///
/// The setters are the only mutation surface:
/// - [`ListingState::set_filters`] replaces the whole filter set and returns
///   to the first page;
/// - [`ListingState::clear_filters`] resets the filters to their default
///   (empty) value and returns to the first page;
/// - [`ListingState::set_page`] moves to another page and leaves the filters
///   untouched.
///
/// # Examples
/// ```
/// use pagination::{ListingState, PageNumber};
///
/// let mut state: ListingState<Vec<String>> = ListingState::default();
/// state.set_page(PageNumber::new(4).unwrap());
/// state.set_filters(vec!["alive".to_owned()]);
/// assert_eq!(state.page(), PageNumber::FIRST);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState<F> {
    page: PageNumber,
    filters: F,
}

impl<F: Default> Default for ListingState<F> {
    fn default() -> Self {
        Self {
            page: PageNumber::FIRST,
            filters: F::default(),
        }
    }
}

impl<F: Default> ListingState<F> {
    /// Drop every filter and return to the first page.
    pub fn clear_filters(&mut self) {
        self.filters = F::default();
        self.page = PageNumber::FIRST;
    }
}

impl<F> ListingState<F> {
    /// Current page.
    pub const fn page(&self) -> PageNumber {
        self.page
    }

    /// Active filter set.
    pub const fn filters(&self) -> &F {
        &self.filters
    }

    /// Move to `page`, keeping the filters.
    pub fn set_page(&mut self, page: PageNumber) {
        self.page = page;
    }

    /// Replace the whole filter set and return to the first page.
    pub fn set_filters(&mut self, filters: F) {
        self.filters = filters;
        self.page = PageNumber::FIRST;
    }
}
