//! Page position and size over a known item count.

use log::debug;

use crate::query::{item_range, page_range, page_window, total_pages};

/// Page size choices offered when none are configured.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

/// Pagination engine.
///
/// Pages are 1-based. `total` is the filtered item count; the table pushes
/// it with [`set_total`](Self::set_total) after every recompute.
///
/// # Example
///
/// ```
/// use tablekit::engine::Pagination;
///
/// let mut pages = Pagination::new(1, 10);
/// pages.set_total(25);
/// assert_eq!(pages.total_pages(), 3);
/// pages.last_page();
/// assert_eq!(pages.item_range(), Some((21, 25)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
    total: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

impl Pagination {
    /// Creates an engine positioned at `page` with `page_size` items per page.
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size,
            total: 0,
        }
    }

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Items per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Item count being paginated.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of pages, zero when there is nothing to page.
    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Moves to `page`. Returns false and stays put when out of range.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            debug!("Ignoring page {page} (of {})", self.total_pages());
            return false;
        }
        let moved = page != self.page;
        self.page = page;
        moved
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn first_page(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn last_page(&mut self) -> bool {
        self.go_to_page(self.total_pages())
    }

    /// Back to page one regardless of the total.
    pub fn reset_page(&mut self) -> bool {
        let moved = self.page != 1;
        self.page = 1;
        moved
    }

    /// Changes the page size, pulling the page back inside the new range.
    ///
    /// A zero size is ignored.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if page_size == 0 {
            debug!("Ignoring zero page size");
            return false;
        }
        if page_size == self.page_size {
            return false;
        }
        self.page_size = page_size;
        self.clamp();
        true
    }

    /// Updates the item count and clamps the page.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.clamp();
    }

    /// The slice of `items` on the current page.
    pub fn page_items<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[page_range(items.len(), self.page, self.page_size)]
    }

    /// 1-based `(first, last)` item numbers on the current page.
    pub fn item_range(&self) -> Option<(usize, usize)> {
        item_range(self.page, self.page_size, self.total)
    }

    /// Up to `max_visible` page numbers around the current page.
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        page_window(self.page, self.total_pages(), max_visible)
    }

    fn clamp(&mut self) {
        let pages = self.total_pages();
        if self.page > pages {
            self.page = pages.max(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paged(total: usize, size: usize) -> Pagination {
        let mut p = Pagination::new(1, size);
        p.set_total(total);
        p
    }

    #[test]
    fn test_navigation_boundaries() {
        let mut p = paged(15, 10);
        assert!(!p.previous_page());
        assert!(p.next_page());
        assert_eq!(p.page(), 2);
        assert!(!p.next_page());
        assert!(p.first_page());
        assert!(!p.first_page());
    }

    #[test]
    fn test_go_to_page_out_of_range() {
        let mut p = paged(15, 10);
        assert!(!p.go_to_page(0));
        assert!(!p.go_to_page(3));
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn test_set_page_size_clamps() {
        let mut p = paged(25, 5);
        p.go_to_page(5);
        assert!(p.set_page_size(10));
        assert_eq!(p.page(), 3);
        assert!(!p.set_page_size(0));
        assert_eq!(p.page_size(), 10);
    }

    #[test]
    fn test_empty_total() {
        let mut p = paged(0, 10);
        assert_eq!(p.total_pages(), 0);
        assert_eq!(p.page(), 1);
        assert!(!p.has_next());
        assert!(!p.last_page());
        assert_eq!(p.item_range(), None);
        assert!(p.page_numbers(5).is_empty());
    }

    #[test]
    fn test_shrinking_total_clamps_page() {
        let mut p = paged(30, 10);
        p.last_page();
        p.set_total(12);
        assert_eq!(p.page(), 2);
    }

    #[test]
    fn test_page_items() {
        let p = {
            let mut p = paged(5, 2);
            p.go_to_page(3);
            p
        };
        assert_eq!(p.page_items(&[1, 2, 3, 4, 5]), &[5]);
    }
}
