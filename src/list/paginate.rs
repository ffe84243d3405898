use std::ops::Range;

use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Position of the rendered page within the (filtered) collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl PageInfo {
    /// Pagination controls only make sense past a single page
    pub fn show_controls(&self) -> bool {
        self.total_pages > 1
    }
}

/// Page metadata returned by endpoints that paginate on the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ServerPage {
    #[serde(default = "first_page")]
    pub page: usize,
    pub total: usize,
    #[serde(alias = "totalPages")]
    pub total_pages: usize,
}

fn first_page() -> usize {
    1
}

/// Client side paginator over a fixed page size. Pages are 1-based.
#[derive(Debug, Clone)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size).max(1)
    }

    /// Moves to `page`, clamped into `[1, total_pages(count)]`
    pub fn set_page(&mut self, page: usize, count: usize) -> usize {
        self.current_page = page.clamp(1, self.total_pages(count));
        self.current_page
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Pulls the current page back into range after the collection shrank
    pub fn clamp(&mut self, count: usize) {
        self.set_page(self.current_page, count);
    }

    pub fn range(&self, count: usize) -> Range<usize> {
        let page = self.current_page.min(self.total_pages(count));
        let start = ((page - 1) * self.page_size).min(count);
        let end = (start + self.page_size).min(count);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }

    pub fn info(&self, count: usize) -> PageInfo {
        let total_pages = self.total_pages(count);
        PageInfo {
            page: self.current_page.min(total_pages),
            total_pages,
            total_items: count,
            page_size: self.page_size,
        }
    }
}
