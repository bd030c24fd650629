//! Pager abstraction consumed by the pagination views
//!
//! Views and the route generator only need to know where the pager currently
//! is and how many pages exist, so they work against the [`Pager`] trait.
//! [`FixedPager`] is an in-memory implementation over a `Vec<T>`.
//!
//! ## Example
//!
//! ```rust
//! use acton_pager::paginator::{FixedPager, Pager};
//!
//! let mut pager = FixedPager::new((1..=100).collect::<Vec<u32>>());
//! pager.set_max_per_page(10).unwrap();
//! pager.set_current_page(3).unwrap();
//!
//! assert_eq!(pager.nb_pages(), 10);
//! assert_eq!(pager.current_page_results(), &[21, 22, 23, 24, 25, 26, 27, 28, 29, 30]);
//! assert_eq!(pager.previous_page(), Some(2));
//! ```

use thiserror::Error;

/// Default number of items per page
pub const DEFAULT_MAX_PER_PAGE: usize = 10;

/// Errors raised by a pager when it is configured with invalid values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PagerError {
    /// The maximum number of items per page is zero or negative
    #[error("Max per page must be greater than zero, {0} given")]
    NotValidMaxPerPage(i64),

    /// The current page is zero or negative
    #[error("Current page must be greater than zero, {0} given")]
    NotValidCurrentPage(i64),

    /// The page lies beyond the last page
    #[error("Page '{page}' is out of bounds")]
    OutOfRangeCurrentPage {
        /// The requested page
        page: i64,
        /// Number of pages available
        nb_pages: usize,
    },
}

/// Read-only view of a paginated collection
///
/// Pages are 1-indexed. `nb_pages` is never less than 1, even for an empty
/// collection.
pub trait Pager {
    /// Page the pager is positioned on
    fn current_page(&self) -> usize;

    /// Total number of pages
    fn nb_pages(&self) -> usize;

    /// Total number of items across all pages
    fn nb_results(&self) -> usize;

    /// Maximum number of items on a single page
    fn max_per_page(&self) -> usize;

    /// Whether a page exists before the current one
    fn has_previous_page(&self) -> bool {
        self.current_page() > 1
    }

    /// Page before the current one
    fn previous_page(&self) -> Option<usize> {
        self.has_previous_page().then(|| self.current_page() - 1)
    }

    /// Whether a page exists after the current one
    fn has_next_page(&self) -> bool {
        self.current_page() < self.nb_pages()
    }

    /// Page after the current one
    fn next_page(&self) -> Option<usize> {
        self.has_next_page().then(|| self.current_page() + 1)
    }

    /// Whether the collection spans more than one page
    fn have_to_paginate(&self) -> bool {
        self.nb_results() > self.max_per_page()
    }
}

/// In-memory pager over a fixed list of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPager<T> {
    items: Vec<T>,
    max_per_page: usize,
    current_page: usize,
}

impl<T> FixedPager<T> {
    /// Create a pager positioned on page 1 with [`DEFAULT_MAX_PER_PAGE`] items per page
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            max_per_page: DEFAULT_MAX_PER_PAGE,
            current_page: 1,
        }
    }

    /// Set the maximum number of items per page.
    ///
    /// The value usually comes straight from the query string, hence the
    /// signed type.
    ///
    /// A current page past the new last page moves back to the last page.
    ///
    /// # Errors
    ///
    /// Returns [`PagerError::NotValidMaxPerPage`] when `max_per_page` is less than 1.
    pub fn set_max_per_page(&mut self, max_per_page: i64) -> Result<(), PagerError> {
        match usize::try_from(max_per_page) {
            Ok(value) if value > 0 => {
                self.max_per_page = value;
                self.current_page = self.current_page.min(self.nb_pages());
                Ok(())
            }
            _ => Err(PagerError::NotValidMaxPerPage(max_per_page)),
        }
    }

    /// Move the pager to another page.
    ///
    /// # Errors
    ///
    /// Returns [`PagerError::NotValidCurrentPage`] when `page` is less than 1 and
    /// [`PagerError::OutOfRangeCurrentPage`] when it is past the last page.
    pub fn set_current_page(&mut self, page: i64) -> Result<(), PagerError> {
        let value = match usize::try_from(page) {
            Ok(value) if value > 0 => value,
            _ => return Err(PagerError::NotValidCurrentPage(page)),
        };

        let nb_pages = self.nb_pages();
        if value > nb_pages {
            return Err(PagerError::OutOfRangeCurrentPage { page, nb_pages });
        }

        self.current_page = value;
        Ok(())
    }

    /// Items on the current page
    #[must_use]
    pub fn current_page_results(&self) -> &[T] {
        let offset = (self.current_page - 1).saturating_mul(self.max_per_page);
        let start = offset.min(self.items.len());
        let end = offset
            .saturating_add(self.max_per_page)
            .min(self.items.len());
        &self.items[start..end]
    }
}

impl<T> Pager for FixedPager<T> {
    fn current_page(&self) -> usize {
        self.current_page
    }

    fn nb_pages(&self) -> usize {
        self.items.len().div_ceil(self.max_per_page).max(1)
    }

    fn nb_results(&self) -> usize {
        self.items.len()
    }

    fn max_per_page(&self) -> usize {
        self.max_per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hundred() -> FixedPager<u32> {
        FixedPager::new((1..=100).collect())
    }

    #[test]
    fn test_defaults() {
        let pager = hundred();
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.max_per_page(), DEFAULT_MAX_PER_PAGE);
        assert_eq!(pager.nb_pages(), 10);
        assert!(pager.have_to_paginate());
        assert!(!pager.has_previous_page());
        assert_eq!(pager.next_page(), Some(2));
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let pager: FixedPager<u32> = FixedPager::new(Vec::new());
        assert_eq!(pager.nb_pages(), 1);
        assert!(!pager.have_to_paginate());
        assert!(pager.current_page_results().is_empty());
    }

    #[test]
    fn test_partial_last_page() {
        let mut pager = FixedPager::new((1..=25).collect::<Vec<u32>>());
        pager.set_current_page(3).unwrap();
        assert_eq!(pager.nb_pages(), 3);
        assert_eq!(pager.current_page_results(), &[21, 22, 23, 24, 25]);
        assert!(!pager.has_next_page());
        assert_eq!(pager.next_page(), None);
    }

    #[test]
    fn test_invalid_max_per_page() {
        let mut pager = hundred();
        assert_eq!(
            pager.set_max_per_page(0),
            Err(PagerError::NotValidMaxPerPage(0))
        );
        assert_eq!(
            pager.set_max_per_page(-5),
            Err(PagerError::NotValidMaxPerPage(-5))
        );
        assert_eq!(pager.max_per_page(), DEFAULT_MAX_PER_PAGE);
    }

    #[test]
    fn test_invalid_current_page() {
        let mut pager = hundred();
        assert_eq!(
            pager.set_current_page(0),
            Err(PagerError::NotValidCurrentPage(0))
        );
        assert_eq!(
            pager.set_current_page(11),
            Err(PagerError::OutOfRangeCurrentPage {
                page: 11,
                nb_pages: 10
            })
        );
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn test_growing_page_size_moves_back_to_last_page() {
        let mut pager = hundred();
        pager.set_current_page(3).unwrap();

        pager.set_max_per_page(i64::MAX).unwrap();
        assert_eq!(pager.nb_pages(), 1);
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.current_page_results().len(), 100);
        assert_eq!(pager.previous_page(), None);

        pager.set_max_per_page(40).unwrap();
        assert_eq!(pager.current_page(), 1);
        pager.set_current_page(3).unwrap();
        assert_eq!(pager.current_page_results(), &(81..=100).collect::<Vec<u32>>()[..]);
    }

    #[test]
    fn test_shrinking_page_size_keeps_current_page() {
        let mut pager = hundred();
        pager.set_current_page(4).unwrap();
        pager.set_max_per_page(5).unwrap();
        assert_eq!(pager.current_page(), 4);
        assert_eq!(pager.current_page_results(), &[16, 17, 18, 19, 20]);
    }

    #[test]
    fn test_out_of_range_message_names_page() {
        let err = PagerError::OutOfRangeCurrentPage {
            page: 42,
            nb_pages: 10,
        };
        assert_eq!(err.to_string(), "Page '42' is out of bounds");
    }
}
