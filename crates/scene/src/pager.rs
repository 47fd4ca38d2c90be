/// One page of a fixed-size pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<'a, T> {
    pub page_items: &'a [T],
    pub total_pages: usize,
}

/// Slices `items` into fixed-size pages and returns page `page` (1-based).
///
/// `total_pages = ceil(len / page_size)`, so an empty input has zero pages.
/// The caller is responsible for passing a valid page; out-of-range requests
/// are clamped at the UI boundary (`ListState`), not here. An out-of-range
/// page yields an empty slice rather than panicking.
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> Paged<'_, T> {
    debug_assert!(page_size > 0);
    let total_pages = items.len().div_ceil(page_size);
    if page == 0 || page > total_pages {
        return Paged {
            page_items: &[],
            total_pages,
        };
    }
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    Paged {
        page_items: &items[start..end],
        total_pages,
    }
}
