//! Page arithmetic for paginated views.

use std::ops::Range;

/// Number of pages needed for `total` items.
///
/// Zero when there are no items or the page size is zero.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Index range of the 1-based `page` within `len` items.
///
/// Out-of-range pages produce an empty range.
pub fn page_range(len: usize, page: usize, page_size: usize) -> Range<usize> {
    if page == 0 {
        return 0..0;
    }
    let start = (page - 1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Returns the items of the 1-based `page`.
///
/// # Example
///
/// ```
/// use tablekit::query::paginate;
///
/// let items = [1, 2, 3, 4, 5];
/// assert_eq!(paginate(&items, 2, 2), vec![3, 4]);
/// assert_eq!(paginate(&items, 3, 2), vec![5]);
/// assert!(paginate(&items, 4, 2).is_empty());
/// ```
pub fn paginate<T: Clone>(data: &[T], page: usize, page_size: usize) -> Vec<T> {
    data[page_range(data.len(), page, page_size)].to_vec()
}

/// 1-based `(first, last)` item numbers shown on a page, for
/// "Showing first-last of total items" text.
///
/// `None` when there is nothing to show.
pub fn item_range(page: usize, page_size: usize, total: usize) -> Option<(usize, usize)> {
    let range = page_range(total, page, page_size);
    if range.is_empty() {
        return None;
    }
    Some((range.start + 1, range.end))
}

/// Sliding window of page numbers centred on `current`.
///
/// The window holds at most `max_visible` pages and shifts to stay full near
/// either end.
///
/// # Example
///
/// ```
/// use tablekit::query::page_window;
///
/// assert_eq!(page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
/// assert_eq!(page_window(6, 10, 5), vec![4, 5, 6, 7, 8]);
/// assert_eq!(page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
/// ```
pub fn page_window(current: usize, total_pages: usize, max_visible: usize) -> Vec<usize> {
    if total_pages == 0 || max_visible == 0 {
        return Vec::new();
    }

    let half = max_visible / 2;
    let mut start = current.saturating_sub(half).max(1);
    let mut end = (current + half).min(total_pages);

    if end.saturating_sub(start) < max_visible - 1 {
        if start == 1 {
            end = (start + max_visible - 1).min(total_pages);
        } else {
            start = (end + 1).saturating_sub(max_visible).max(1);
        }
    }

    (start..=end).collect()
}
