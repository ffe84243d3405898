use std::cmp::Ordering;

use super::filter::FilterSet;
use super::paginate::{PageInfo, Paginator, ServerPage};

pub type SortFn<T> = fn(&T, &T) -> Ordering;

/// Everything the presenter needs to draw one page
#[derive(Debug)]
pub struct ListView<'a, T> {
    pub loading: bool,
    pub rows: Vec<&'a T>,
    pub page: PageInfo,
    /// Items held before filtering (the "Total" counters on each screen)
    pub fetched: usize,
}

impl<T> ListView<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Per-screen list state: fetched items, filters, optional sort and the
/// paginator. Any filter change moves the list back to page 1.
pub struct ListState<T> {
    items: Vec<T>,
    loading: bool,
    filters: FilterSet<T>,
    sort: Option<SortFn<T>>,
    paginator: Paginator,
    server_page: Option<ServerPage>,
}

impl<T> ListState<T> {
    pub fn new(filters: FilterSet<T>, page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            filters,
            sort: None,
            paginator: Paginator::new(page_size),
            server_page: None,
        }
    }

    /// Sort applied after filtering. `slice::sort_by` is stable, so equal keys
    /// keep the order the backend returned them in.
    pub fn with_sort(mut self, sort: SortFn<T>) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn current_page(&self) -> usize {
        self.server_page
            .map(|p| p.page)
            .unwrap_or_else(|| self.paginator.current_page())
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// Replaces the held collection with a freshly fetched one
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.loading = false;
        self.server_page = None;
        let count = self.filtered().len();
        self.paginator.clamp(count);
    }

    /// Replaces the held page with one page of a server-paginated collection
    pub fn replace_page(&mut self, items: Vec<T>, page: ServerPage) {
        self.items = items;
        self.loading = false;
        self.server_page = Some(page);
    }

    /// Failed fetch: nothing is shown until the next explicit fetch
    pub fn fail(&mut self) {
        self.items.clear();
        self.loading = false;
        self.server_page = None;
        self.paginator.reset();
    }

    /// Aborted fetch: the held items are left as they were
    pub fn cancel(&mut self) {
        self.loading = false;
    }

    pub fn set_filter(&mut self, name: &str, value: Option<&str>) {
        self.filters.set(name, value);
        self.paginator.reset();
        if let Some(server) = self.server_page.as_mut() {
            server.page = 1;
        }
    }

    /// Client mode clamps to the filtered page count. In server mode the
    /// value is only a request for the next fetch.
    pub fn set_page(&mut self, page: usize) -> usize {
        match self.server_page.as_mut() {
            Some(server) => {
                server.page = page.clamp(1, server.total_pages.max(1));
                server.page
            }
            None => {
                let count = self.filtered().len();
                self.paginator.set_page(page, count)
            }
        }
    }

    fn filtered(&self) -> Vec<&T> {
        let mut rows = self.filters.apply(&self.items);
        if let Some(sort) = self.sort {
            rows.sort_by(|a, b| sort(a, b));
        }
        rows
    }

    pub fn view(&self) -> ListView<'_, T> {
        if self.loading {
            return ListView {
                loading: true,
                rows: Vec::new(),
                page: self.paginator.info(0),
                fetched: self.items.len(),
            };
        }

        let filtered = self.filtered();

        if let Some(server) = self.server_page {
            return ListView {
                loading: false,
                rows: filtered,
                page: PageInfo {
                    page: server.page,
                    total_pages: server.total_pages.max(1),
                    total_items: server.total,
                    page_size: self.paginator.page_size(),
                },
                fetched: self.items.len(),
            };
        }

        let range = self.paginator.range(filtered.len());
        let page = self.paginator.info(filtered.len());
        ListView {
            loading: false,
            rows: filtered[range].to_vec(),
            page,
            fetched: self.items.len(),
        }
    }
}
