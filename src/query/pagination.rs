//! Page slicing and the sliding window of page-number buttons.

use serde::Serialize;

/// Alerts shown per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page-number buttons shown at once
pub const DEFAULT_MAX_PAGE_BUTTONS: usize = 10;

/// Number of pages needed for `total_items`. Zero items means zero pages.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Items on 1-based `page`, clipped to the bounds of `sorted`.
///
/// Pages past the end (and page 0) are empty rather than an error.
pub fn visible_slice<T>(sorted: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }

    let start = (page - 1).saturating_mul(page_size).min(sorted.len());
    let end = start.saturating_add(page_size).min(sorted.len());
    &sorted[start..end]
}

/// Page numbers for the navigation strip.
///
/// Shows every page when they fit. Otherwise the window is pinned to the
/// first pages while `current_page` is in the first half-window, pinned to the
/// last pages once `current_page` is within half a window of the end, and
/// centered on `current_page` in between.
pub fn page_window(
    total_items: usize,
    page_size: usize,
    current_page: usize,
    max_buttons: usize,
) -> Vec<usize> {
    let total = total_pages(total_items, page_size);
    if total == 0 || max_buttons == 0 {
        return Vec::new();
    }

    let half = max_buttons / 2;
    let (start, end) = if total <= max_buttons {
        (1, total)
    } else if current_page <= max_buttons.div_ceil(2) {
        (1, max_buttons)
    } else if current_page.saturating_add(half) >= total {
        (total - max_buttons + 1, total)
    } else {
        let start = current_page.saturating_sub(half).max(1);
        (start, (start + max_buttons - 1).min(total))
    };

    (start..=end).collect()
}

/// Current page plus the fixed page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    current_page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Highest valid page; an empty set still has page 1
    pub fn last_page(&self, total_items: usize) -> usize {
        total_pages(total_items, self.page_size).max(1)
    }

    /// Jump to `page`, clamped into range
    pub fn set_page(&mut self, page: usize, total_items: usize) {
        self.current_page = page.clamp(1, self.last_page(total_items));
    }

    pub fn next_page(&mut self, total_items: usize) {
        self.set_page(self.current_page + 1, total_items);
    }

    pub fn prev_page(&mut self, total_items: usize) {
        self.set_page(self.current_page.saturating_sub(1), total_items);
    }

    /// Back to page 1 if the set shrank under the current page.
    ///
    /// Returns true when the page was reset.
    pub fn reconcile(&mut self, total_items: usize) -> bool {
        if self.current_page > self.last_page(total_items) {
            self.current_page = 1;
            return true;
        }
        false
    }

    pub fn slice<'a, T>(&self, sorted: &'a [T]) -> &'a [T] {
        visible_slice(sorted, self.current_page, self.page_size)
    }

    pub fn window(&self, total_items: usize, max_buttons: usize) -> Vec<usize> {
        page_window(total_items, self.page_size, self.current_page, max_buttons)
    }
}
