//! List presentation
//!
//! Turns a full item collection into the slice shown on screen: filter by a
//! case-insensitive name query, cut one page out of the result, and build the
//! compact page-number window for the pager.

use std::num::NonZeroUsize;

/// Default number of items shown per page
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(24) {
    Some(size) => size,
    None => panic!("page size must be non-zero"),
};

/// Anything that can be listed, searched and paged
pub trait Listable {
    /// Unique identity of the item
    fn key(&self) -> &str;
    /// Display name, the field queries are matched against
    fn name(&self) -> &str;
}

impl<T: Listable + ?Sized> Listable for &T {
    fn key(&self) -> &str {
        (**self).key()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// One entry of the pager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    /// A clickable page number (1-based)
    Page(usize),
    /// A gap between non-adjacent page numbers
    Ellipsis,
}

/// A single page cut out of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Items on this page
    pub items: &'a [T],
    /// Offset of the first item in the full collection
    pub start_index: usize,
    /// `ceil(len / page_size)`, zero for an empty collection
    pub total_pages: usize,
}

/// Items whose name contains `query`, ignoring case, in source order.
pub fn filter<'a, T: Listable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    if query.is_empty() {
        return items.iter().collect();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.name().to_lowercase().contains(&needle))
        .collect()
}

/// Slice page `page` (1-based) out of `items`.
///
/// No clamping happens here: page 0 or a page past the end yields an empty
/// slice. Callers clamp with [`clamp_page`] first.
pub fn paginate<T>(items: &[T], page: usize, page_size: NonZeroUsize) -> Page<'_, T> {
    let size = page_size.get();
    let total_pages = items.len().div_ceil(size);

    let start_index = page.saturating_sub(1).saturating_mul(size);
    let page_items = if page == 0 || start_index >= items.len() {
        &items[..0]
    } else {
        let end = start_index.saturating_add(size).min(items.len());
        &items[start_index..end]
    };

    Page {
        items: page_items,
        start_index,
        total_pages,
    }
}

/// Clamp `page` into `[1, max(total_pages, 1)]`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Build the pager: first, last and the pages adjacent to `current_page`,
/// with a single ellipsis wherever numbers are skipped.
///
/// Returns an empty window when there is at most one page.
pub fn build_page_window(current_page: usize, total_pages: usize) -> Vec<PageLink> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let mut window = Vec::new();
    let mut previous: Option<usize> = None;

    for page in 1..=total_pages {
        let keep = page == 1 || page == total_pages || page.abs_diff(current_page) <= 1;
        if !keep {
            continue;
        }

        if let Some(prev) = previous {
            if page - prev > 1 {
                window.push(PageLink::Ellipsis);
            }
        }
        window.push(PageLink::Page(page));
        previous = Some(page);
    }

    window
}

/// Everything a view needs to render the current page
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<'a, T> {
    /// Items to display
    pub items: Vec<&'a T>,
    /// Offset of the first displayed item within the filtered collection
    pub start_index: usize,
    /// Current page after clamping (1-based)
    pub current_page: usize,
    /// Number of pages, never less than one
    pub total_pages: usize,
    /// Number of items that matched the query
    pub matched: usize,
    /// Page links to render, empty when the pager is hidden
    pub window: Vec<PageLink>,
    /// Whether a previous page exists
    pub has_prev: bool,
    /// Whether a next page exists
    pub has_next: bool,
}

impl<T> ListView<'_, T> {
    /// Whether the pager should be shown at all
    pub fn shows_pager(&self) -> bool {
        self.total_pages > 1
    }

    /// Human-readable range, e.g. "25-48 of 120"
    pub fn range_label(&self) -> String {
        if self.matched == 0 {
            return "0-0 of 0".to_string();
        }
        format!(
            "{}-{} of {}",
            self.start_index + 1,
            self.start_index + self.items.len(),
            self.matched
        )
    }
}

/// Query and paging state for one list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPresenter {
    query: String,
    current_page: usize,
    page_size: NonZeroUsize,
}

impl ListPresenter {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            query: String::new(),
            current_page: 1,
            page_size,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Replace the query. A different query always sends the list back to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.current_page = 1;
        }
    }

    /// Change the page size and go back to the first page
    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        if page_size != self.page_size {
            self.page_size = page_size;
            self.current_page = 1;
        }
    }

    /// Jump to a page; the value is clamped on the next [`present`](Self::present)
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }

    pub fn prev_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    /// Run filter → clamp → paginate → window over `items`.
    ///
    /// The clamped page is written back so that next/prev continue from a
    /// valid position.
    pub fn present<'a, T: Listable>(&mut self, items: &'a [T]) -> ListView<'a, T> {
        let filtered = filter(items, &self.query);
        let raw_total = filtered.len().div_ceil(self.page_size.get());
        self.current_page = clamp_page(self.current_page, raw_total);

        let page = paginate(&filtered, self.current_page, self.page_size);
        let total_pages = raw_total.max(1);

        ListView {
            items: page.items.to_vec(),
            start_index: page.start_index,
            current_page: self.current_page,
            total_pages,
            matched: filtered.len(),
            window: build_page_window(self.current_page, raw_total),
            has_prev: self.current_page > 1,
            has_next: self.current_page < total_pages,
        }
    }
}

impl Default for ListPresenter {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageLink::{Ellipsis, Page as P};

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        key: String,
        name: String,
    }

    impl Listable for Entry {
        fn key(&self) -> &str {
            &self.key
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    fn entries(names: &[&str]) -> Vec<Entry> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Entry {
                key: i.to_string(),
                name: name.to_string(),
            })
            .collect()
    }

    fn numbered(count: usize) -> Vec<Entry> {
        (0..count)
            .map(|i| Entry {
                key: i.to_string(),
                name: format!("Champion {i}"),
            })
            .collect()
    }

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_filter_case_insensitive_substring() {
        let items = entries(&["Ahri", "Akali", "Garen", "Shaco", "Kha'Zix"]);
        let names: Vec<_> = filter(&items, "A").iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Ahri", "Akali", "Garen", "Shaco", "Kha'Zix"]);

        let names: Vec<_> = filter(&items, "AK").iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Akali"]);

        let names: Vec<_> = filter(&items, "'z").iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Kha'Zix"]);
    }

    #[test]
    fn test_filter_preserves_order_and_matches() {
        let items = entries(&["Zed", "Ezreal", "Annie", "Zeri", "Ziggs", "Kennen"]);
        let result = filter(&items, "ze");

        // "Ezreal" has "ez" but not "ze"; "Zeri" matches in the middle of the list
        let keys: Vec<_> = result.iter().map(|e| e.key()).collect();
        assert_eq!(keys, ["0", "3"]);
        assert!(result.iter().all(|e| e.name.to_lowercase().contains("ze")));
    }

    #[test]
    fn test_filter_empty_query_is_identity() {
        let items = entries(&["Lux", "Jinx", "Vi"]);
        let result: Vec<Entry> = filter(&items, "").into_iter().cloned().collect();
        assert_eq!(result, items);
    }

    #[test]
    fn test_filter_no_match() {
        let items = entries(&["Lux", "Jinx"]);
        assert!(filter(&items, "teemo").is_empty());
    }

    #[test]
    fn test_paginate_fifty_by_twenty_four() {
        let items = numbered(50);
        let lens: Vec<_> = (1..=3).map(|p| paginate(&items, p, size(24)).items.len()).collect();
        assert_eq!(lens, [24, 24, 2]);
        assert_eq!(paginate(&items, 1, size(24)).total_pages, 3);
    }

    #[test]
    fn test_paginate_reconstructs_collection() {
        for len in [0, 1, 7, 24, 25, 48, 121] {
            for page_size in [1, 5, 24, 200] {
                let items = numbered(len);
                let total = paginate(&items, 1, size(page_size)).total_pages;
                let rebuilt: Vec<Entry> = (1..=total)
                    .flat_map(|p| paginate(&items, p, size(page_size)).items.iter().cloned())
                    .collect();
                assert_eq!(rebuilt, items, "len={len} page_size={page_size}");
            }
        }
    }

    #[test]
    fn test_paginate_out_of_range_is_empty() {
        let items = numbered(10);
        let page = paginate(&items, 5, size(4));
        assert!(page.items.is_empty());
        assert_eq!(page.start_index, 16);
        assert_eq!(page.total_pages, 3);

        let page = paginate(&items, 0, size(4));
        assert!(page.items.is_empty());
        assert_eq!(page.start_index, 0);

        assert!(paginate(&items, usize::MAX, size(4)).items.is_empty());
    }

    #[test]
    fn test_paginate_empty_collection() {
        let items: Vec<Entry> = Vec::new();
        let page = paginate(&items, 1, size(24));
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_page_window_examples() {
        assert_eq!(build_page_window(1, 10), [P(1), P(2), Ellipsis, P(10)]);
        assert_eq!(
            build_page_window(5, 10),
            [P(1), Ellipsis, P(4), P(5), P(6), Ellipsis, P(10)]
        );
        assert!(build_page_window(1, 1).is_empty());
        assert!(build_page_window(1, 0).is_empty());
    }

    #[test]
    fn test_page_window_edges_have_no_duplicates() {
        assert_eq!(build_page_window(10, 10), [P(1), Ellipsis, P(9), P(10)]);
        assert_eq!(build_page_window(2, 10), [P(1), P(2), P(3), Ellipsis, P(10)]);
        assert_eq!(build_page_window(1, 2), [P(1), P(2)]);
        assert_eq!(build_page_window(3, 5), [P(1), P(2), P(3), P(4), P(5)]);
    }

    #[test]
    fn test_page_window_gap_of_one_page() {
        // 1 and 3 are not adjacent, so the skipped 2 becomes an ellipsis
        assert_eq!(build_page_window(4, 6), [P(1), Ellipsis, P(3), P(4), P(5), P(6)]);
    }

    #[test]
    fn test_present_scenario_hundred_twenty() {
        let items = numbered(120);
        let mut presenter = ListPresenter::new(size(24));
        presenter.go_to_page(3);

        let view = presenter.present(&items);
        assert_eq!(view.total_pages, 5);
        assert_eq!(view.current_page, 3);
        assert_eq!(view.start_index, 48);
        let keys: Vec<_> = view.items.iter().map(|e| e.key.clone()).collect();
        let expected: Vec<_> = (48..72).map(|i| i.to_string()).collect();
        assert_eq!(keys, expected);
        assert_eq!(view.window, [P(1), P(2), P(3), P(4), P(5)]);
        assert_eq!(view.range_label(), "49-72 of 120");
        assert!(view.has_prev && view.has_next);
    }

    #[test]
    fn test_query_change_resets_page() {
        let items = numbered(120);
        let mut presenter = ListPresenter::new(size(24));
        presenter.go_to_page(4);
        assert_eq!(presenter.present(&items).current_page, 4);

        presenter.set_query("champion 1");
        assert_eq!(presenter.current_page(), 1);
        let view = presenter.present(&items);
        assert_eq!(view.current_page, 1);
        // "Champion 1", "Champion 10".."19", "Champion 100".."119"
        assert_eq!(view.matched, 31);

        presenter.go_to_page(2);
        presenter.set_query("champion 1");
        assert_eq!(presenter.current_page(), 2, "same query keeps the page");
    }

    #[test]
    fn test_present_clamps_stale_page() {
        let items = numbered(30);
        let mut presenter = ListPresenter::new(size(10));
        presenter.go_to_page(9);

        let view = presenter.present(&items);
        assert_eq!(view.current_page, 3);
        assert_eq!(view.items.len(), 10);
        assert!(!view.has_next);

        presenter.next_page();
        assert_eq!(presenter.present(&items).current_page, 3);

        presenter.prev_page();
        presenter.prev_page();
        presenter.prev_page();
        let view = presenter.present(&items);
        assert_eq!(view.current_page, 1);
        assert!(!view.has_prev);
    }

    #[test]
    fn test_present_empty_collection() {
        let items: Vec<Entry> = Vec::new();
        let mut presenter = ListPresenter::default();
        let view = presenter.present(&items);

        assert_eq!(view.total_pages, 1);
        assert_eq!(view.current_page, 1);
        assert!(view.items.is_empty());
        assert!(view.window.is_empty());
        assert!(!view.shows_pager());
        assert!(!view.has_prev && !view.has_next);
        assert_eq!(view.range_label(), "0-0 of 0");
    }

    #[test]
    fn test_set_page_size_resets_page() {
        let items = numbered(100);
        let mut presenter = ListPresenter::new(size(10));
        presenter.go_to_page(5);
        presenter.set_page_size(size(50));

        let view = presenter.present(&items);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.window, [P(1), P(2)]);
    }
}
