//! Page state for the favorites list.
//!
//! Pages are 1-based. The current page is re-validated every time the list length,
//! the page size or the page itself changes, so it always lands inside
//! `1..=max(1, total_pages)`.

use std::ops::Range;

/// Number of pages needed for `total_items`; 0 for an empty list
pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    total_items.div_ceil(items_per_page.max(1))
}

/// Bring `current_page` back into range after the list or page size changed.
///
/// An empty list or a list already on page 1 resets to page 1; a page past the end
/// snaps to the last page; anything else is left alone. Running it twice with the
/// same inputs gives the same page.
pub fn resolve_page(total_items: usize, items_per_page: usize, current_page: usize) -> usize {
    let total = total_pages(total_items, items_per_page);
    if total == 0 || current_page <= 1 {
        1
    } else if current_page > total {
        total
    } else {
        current_page
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    current_page: usize,
    items_per_page: usize,
    total_items: usize,
}

impl PageState {
    pub fn new(total_items: usize, items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_items,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Internal page count, 0 when there is nothing to show
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.items_per_page)
    }

    /// Page count shown to the user, never below 1
    pub fn display_total_pages(&self) -> usize {
        self.total_pages().max(1)
    }

    /// Re-run the page validation rule against the current inputs
    pub fn validate(&mut self) {
        let resolved = resolve_page(self.total_items, self.items_per_page, self.current_page);
        if resolved != self.current_page {
            log::debug!(
                "Page {} out of range for {} items at {} per page, moving to {}",
                self.current_page,
                self.total_items,
                self.items_per_page,
                resolved
            );
        }
        self.current_page = resolved;
    }

    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.validate();
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.validate();
    }

    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page;
        self.validate();
    }

    pub fn can_go_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        let total = self.total_pages();
        total != 0 && self.current_page < total
    }

    pub fn prev_page(&mut self) -> bool {
        if self.can_go_prev() {
            self.set_current_page(self.current_page - 1);
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self) -> bool {
        if self.can_go_next() {
            self.set_current_page(self.current_page + 1);
            true
        } else {
            false
        }
    }

    /// Half-open index window of the current page, clipped to the list
    pub fn current_page_range(&self) -> Range<usize> {
        let start = ((self.current_page - 1) * self.items_per_page).min(self.total_items);
        let end = (self.current_page * self.items_per_page).min(self.total_items);
        start..end
    }

    /// Previous/Next controls only make sense when more than one page is filled
    pub fn shows_controls(&self) -> bool {
        self.total_items > self.items_per_page
    }
}
