//! Pagination bounds for a result page.

use serde::Serialize;

/// Position of the current page within a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Total matching works.
    pub total_count: u64,

    /// Current page (1-based).
    pub page: u32,

    /// Page size.
    pub per_page: u32,
}

impl Pagination {
    /// Create pagination state. Page and page size are raised to at least 1.
    #[must_use]
    pub fn new(total_count: u64, page: u32, per_page: u32) -> Self {
        Self {
            total_count,
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// 1-based inclusive range of works shown on this page.
    ///
    /// The last page may be partial, so the upper bound is capped at the total.
    #[must_use]
    pub fn displayed_range(&self) -> (u64, u64) {
        let page = u64::from(self.page);
        let per_page = u64::from(self.per_page);
        let start = (page - 1) * per_page + 1;
        let end = (page * per_page).min(self.total_count);
        (start, end)
    }

    /// Number of pages.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(u64::from(self.per_page))
    }

    /// Whether a previous page exists.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) * u64::from(self.per_page) < self.total_count
    }

    /// Whether the pager should be shown at all.
    #[must_use]
    pub fn shows_pager(&self) -> bool {
        self.total_pages() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_last_page() {
        let p = Pagination::new(57, 3, 25);
        assert_eq!(p.displayed_range(), (51, 57));
        assert_eq!(p.total_pages(), 3);
        assert!(p.has_previous());
        assert!(!p.has_next());
    }

    #[test]
    fn test_first_page() {
        let p = Pagination::new(57, 1, 25);
        assert_eq!(p.displayed_range(), (1, 25));
        assert!(!p.has_previous());
        assert!(p.has_next());
        assert!(p.shows_pager());
    }

    #[test]
    fn test_exact_multiple_disables_next() {
        let p = Pagination::new(50, 2, 25);
        assert_eq!(p.displayed_range(), (26, 50));
        assert!(!p.has_next());
    }

    #[test]
    fn test_single_page_hides_pager() {
        let p = Pagination::new(10, 1, 25);
        assert_eq!(p.total_pages(), 1);
        assert!(!p.shows_pager());
        assert!(!p.has_next());
    }

    #[test]
    fn test_zero_inputs_are_raised() {
        let p = Pagination::new(0, 0, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 1);
        assert_eq!(p.total_pages(), 0);
    }
}
