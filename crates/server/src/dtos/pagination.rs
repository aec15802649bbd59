use database::services::{DEFAULT_PER_PAGE, page_number, page_size};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: u64, per_page: u64, total_items: u64) -> Self {
        let page = page_number(page);
        let per_page = page_size(per_page);
        let total_pages = total_items.div_ceil(per_page);

        Self {
            page,
            per_page,
            total_pages,
            total_items,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// One page of a list endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Page<T> {
    /// Converts `items` and attaches pagination metadata
    pub fn from_items<R>(items: Vec<R>, page: u64, per_page: u64, total_items: u64) -> Self
    where
        T: From<R>,
    {
        Self {
            items: items.into_iter().map(T::from).collect(),
            pagination: PaginationMeta::new(page, per_page, total_items),
        }
    }
}

pub fn default_page() -> u64 {
    1
}

pub fn default_per_page() -> u64 {
    DEFAULT_PER_PAGE
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::services::MAX_PER_PAGE;

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(2, 20, 45);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);

        let last = PaginationMeta::new(3, 20, 45);
        assert!(!last.has_next);

        let empty = PaginationMeta::new(1, 20, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next);
        assert!(!empty.has_prev);
    }

    #[test]
    fn test_zero_values_fall_back() {
        let meta = PaginationMeta::new(0, 0, 10);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.per_page, DEFAULT_PER_PAGE);
        assert_eq!(meta.total_pages, 1);
    }

    #[test]
    fn test_oversized_page_is_capped() {
        let meta = PaginationMeta::new(u64::MAX, u64::MAX, 250);
        assert_eq!(meta.per_page, MAX_PER_PAGE);
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_next);
    }
}
