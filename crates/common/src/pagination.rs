//! Pagination bounds shared by the gateway and the catalog.
//!
//! The gateway validates caller input against these bounds before any
//! catalog call; the stores only rely on `offset`.

/// Smallest accepted page number.
pub const MIN_PAGE_NUMBER: i64 = 1;
/// Smallest accepted page size.
pub const MIN_RESULTS_PER_PAGE: i64 = 2;
/// Largest accepted page size.
pub const MAX_RESULTS_PER_PAGE: i64 = 20;

/// Defaults applied when the query string omits a parameter.
pub const DEFAULT_PAGE_NUMBER: i64 = 1;
pub const DEFAULT_RESULTS_PER_PAGE: i64 = 10;

/// Validated pagination parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page index
    pub page_number: u32,
    /// items per page
    pub results_per_page: u32,
}

impl PageRequest {
    pub fn new(page_number: u32, results_per_page: u32) -> Self {
        Self { page_number, results_per_page }
    }

    /// Index of the first record of this page in the id-descending order.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number.saturating_sub(1)) * u64::from(self.results_per_page)
    }
}

/// `true` when records exist beyond the requested page.
pub fn has_more(total: u64, page: u32, results_per_page: u32) -> bool {
    total > u64::from(page) * u64::from(results_per_page)
}
