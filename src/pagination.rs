use serde::Serialize;

/// Number of rows shown per page on the dashboard and in the API.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Requested page window (pages are 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Rows to skip; saturates instead of overflowing on huge page numbers.
    pub fn offset(&self) -> usize {
        self.page
            .max(1)
            .saturating_sub(1)
            .saturating_mul(self.per_page)
    }
}

/// One page of items plus the information needed to render page links.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, total_items: usize, per_page: usize) -> Self {
        Self {
            items,
            page: page.max(1),
            total_pages: total_items.div_ceil(per_page.max(1)),
            total_items,
        }
    }
}
