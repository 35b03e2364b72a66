//! Paginator
//!
//! Fixed-size pages over a filtered list, plus the `ListingQuery` that keeps
//! the page number in range as filters and search change.

use chrono::NaiveDateTime;

use crate::filter::{FilterSpec, FilterState};

/// Page size used by every listing page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// `ceil(count / page_size)`; a zero page size is treated as 1
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Clamp a 1-based page number into `[1, total_pages]` (1 when there are no pages)
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// One visible page, derived and never mutated in place
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            number: 1,
            total_pages: 0,
            total_items: 0,
        }
    }
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slice `items` into the requested page, clamping the page number
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let number = clamp_page(page, total_pages);
    let start = ((number - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        number,
        total_pages,
        total_items: items.len(),
    }
}

/// User-controlled listing inputs: filters, search term and page.
///
/// Any change to the filters or the search term sends the page back to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub filters: FilterState,
    pub search: String,
    pub page: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            filters: FilterState::new(),
            search: String::new(),
            page: 1,
        }
    }
}

impl ListingQuery {
    pub fn new(filters: FilterState) -> Self {
        Self {
            filters,
            ..Default::default()
        }
    }

    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        if self.filters.set(key, value) {
            self.page = 1;
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.search {
            self.search = search;
            self.page = 1;
        }
    }

    /// Reset every filter and the search term
    pub fn clear(&mut self) {
        self.filters.clear();
        self.search.clear();
        self.page = 1;
    }

    pub fn goto(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Filter then paginate. The returned page is always in range even if
    /// `self.page` points past the end of a shorter filtered list.
    pub fn view<T: Clone>(
        &self,
        spec: &FilterSpec<T>,
        items: &[T],
        page_size: usize,
        now: NaiveDateTime,
    ) -> Page<T> {
        let filtered = spec.apply(items, &self.filters, &self.search, now);
        paginate(&filtered, self.page, page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::local_now;

    fn numbers(n: u32) -> Vec<u32> {
        (0..n).collect()
    }

    fn even_spec() -> FilterSpec<u32> {
        FilterSpec::<u32>::new().flag("even", |n: &u32| n % 2 == 0)
    }

    #[test]
    fn test_twenty_five_items_make_three_pages() {
        let items = numbers(25);
        let first = paginate(&items, 1, DEFAULT_PAGE_SIZE);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items, (0..10).collect::<Vec<_>>());

        let last = paginate(&items, 3, DEFAULT_PAGE_SIZE);
        assert_eq!(last.items, vec![20, 21, 22, 23, 24]);
        assert!(!last.has_next());
        assert!(last.has_prev());
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        for n in [0usize, 1, 9, 10, 11, 20, 99, 100, 101] {
            assert_eq!(total_pages(n, 10), (n + 9) / 10, "count {}", n);
        }
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let items = numbers(12);
        let page = paginate(&items, 7, 10);
        assert_eq!(page.number, 2);
        assert_eq!(page.items, vec![10, 11]);

        let page = paginate(&items, 0, 10);
        assert_eq!(page.number, 1);
    }

    #[test]
    fn test_empty_list_has_no_pages() {
        let page = paginate::<u32>(&[], 4, 10);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.number, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut query = ListingQuery::default();
        query.goto(3);
        query.set_filter("even", "true");
        assert_eq!(query.page, 1);

        query.goto(2);
        query.set_search("4");
        assert_eq!(query.page, 1);

        query.goto(2);
        // Same value again is not a change
        query.set_filter("even", "true");
        assert_eq!(query.page, 2);
    }

    #[test]
    fn test_view_stays_in_range_after_filtering() {
        let items = numbers(40);
        let mut query = ListingQuery::default();
        query.goto(4);
        let page = query.view(&even_spec(), &items, 10, local_now());
        assert_eq!(page.number, 4);

        // Bypass the reset to simulate a stale page number
        query.filters.set("even", "true");
        let page = query.view(&even_spec(), &items, 10, local_now());
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.number, 2);
        assert_eq!(page.items.len(), 10);
    }
}
