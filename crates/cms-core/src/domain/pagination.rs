use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MIN_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;
const MAX_OFFSET: u64 = i64::MAX as u64;

/// A normalized page window. Out-of-range input is coerced, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// `page < 1` becomes 1; `limit` is clamped to [10, 100].
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.filter(|p| *p >= 1).map_or(1, |p| p as u64);
        let limit = limit.map_or(DEFAULT_PAGE_SIZE, |l| {
            l.clamp(MIN_PAGE_SIZE as i64, MAX_PAGE_SIZE as i64) as u64
        });
        Self { page, limit }
    }

    /// Rows to skip. Capped at `i64::MAX`, the largest OFFSET PostgreSQL
    /// accepts, so an absurd page yields an empty window instead of an error.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .min(MAX_OFFSET)
    }
}

/// One window of a filtered listing plus the filter's full match count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            limit: request.limit,
        }
    }

    pub fn pages(&self) -> u64 {
        self.total.div_ceil(self.limit.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        assert_eq!(PageRequest::new(None, None), PageRequest::default());
    }

    #[test]
    fn page_below_one_becomes_one() {
        assert_eq!(PageRequest::new(Some(0), None).page, 1);
        assert_eq!(PageRequest::new(Some(-4), None).page, 1);
        assert_eq!(PageRequest::new(Some(3), None).page, 3);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(PageRequest::new(None, Some(1)).limit, 10);
        assert_eq!(PageRequest::new(None, Some(-1)).limit, 10);
        assert_eq!(PageRequest::new(None, Some(500)).limit, 100);
        assert_eq!(PageRequest::new(None, Some(35)).limit, 35);
    }

    #[test]
    fn offset_and_page_count() {
        let request = PageRequest::new(Some(3), Some(10));
        assert_eq!(request.offset(), 20);

        let page: Page<u8> = Page::new(vec![], 21, request);
        assert_eq!(page.pages(), 3);

        let empty: Page<u8> = Page::new(vec![], 0, request);
        assert_eq!(empty.pages(), 0);
    }

    #[test]
    fn huge_page_offset_stays_within_sql_range() {
        let request = PageRequest::new(Some(i64::MAX), Some(100));
        assert_eq!(request.page, i64::MAX as u64);
        assert_eq!(request.offset(), i64::MAX as u64);

        let zero = PageRequest { page: 0, limit: 10 };
        assert_eq!(zero.offset(), 0);
    }
}
