use serde::{Deserialize, Serialize};

// ============================================================================
// Pagination
// ============================================================================

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

/// Page/limit pair as received from the caller. Absent or non-positive
/// values fall back to (1, 10).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p > 0 => p,
            _ => DEFAULT_PAGE,
        };
        let limit = match limit {
            Some(l) if l > 0 => l,
            _ => DEFAULT_LIMIT,
        };
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_items: i64, request: PageRequest) -> Self {
        // Integer ceil; an empty result set has zero pages.
        let total_pages = (total_items + request.limit - 1) / request.limit;
        Self {
            items,
            total_items,
            total_pages,
            current_page: request.page,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let req = PageRequest::new(None, None);
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 10);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_defaults_when_non_positive() {
        let req = PageRequest::new(Some(0), Some(-5));
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 10);
    }

    #[test]
    fn test_offset_computation() {
        let req = PageRequest::new(Some(3), Some(25));
        assert_eq!(req.offset(), 50);

        let req = PageRequest::new(Some(2), Some(10));
        assert_eq!(req.offset(), 10);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        let page = Page::new(vec![(); 5], 15, PageRequest::new(Some(2), Some(10)));
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items.len(), 5);

        let page = Page::<()>::new(vec![], 20, PageRequest::new(Some(1), Some(10)));
        assert_eq!(page.total_pages, 2);

        let page = Page::<()>::new(vec![], 21, PageRequest::new(Some(1), Some(10)));
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_empty_result_has_zero_pages() {
        let page = Page::<()>::new(vec![], 0, PageRequest::default());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_items, 0);
    }
}
