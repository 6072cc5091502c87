//! Pagination stage: page slicing and the page-number window.

use std::ops::Range;

/// Number of page buttons in the page window.
pub const PAGE_WINDOW_SIZE: usize = 5;

/// Position of one page within a result set.
///
/// Pages are 1-based. A result set always has at least one page, so an empty
/// result still reads as "page 1 of 1".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageInfo {
    current_page: usize,
    page_size: usize,
    total_items: usize,
    total_pages: usize,
}

impl PageInfo {
    /// Describes page `current_page` of `total_items` items split into pages
    /// of `page_size`.
    ///
    /// A `current_page` of 0 is treated as 1, and a `page_size` of 0 as 1.
    /// `current_page` is not clamped to `total_pages`; an out-of-range page
    /// simply has no rows.
    pub fn new(total_items: usize, current_page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            current_page: current_page.max(1),
            page_size,
            total_items,
            total_pages: total_items.div_ceil(page_size).max(1),
        }
    }

    /// The 1-based page number.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of items across all pages.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages, at least 1.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Positions of this page's items in the full result, clamped to bounds.
    pub fn range(&self) -> Range<usize> {
        let start = (self.current_page - 1)
            .saturating_mul(self.page_size)
            .min(self.total_items);
        let end = start.saturating_add(self.page_size).min(self.total_items);
        start..end
    }

    /// Returns `true` if there is a page before this one.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Returns `true` if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// The 1-based, inclusive item range shown on this page, as in
    /// "showing 11–20 of 23". `None` when the page is empty.
    pub fn display_range(&self) -> Option<(usize, usize)> {
        let range = self.range();
        if range.is_empty() {
            None
        } else {
            Some((range.start + 1, range.end))
        }
    }

    /// The page numbers to show as buttons. See [`page_window`].
    pub fn page_window(&self) -> Vec<usize> {
        page_window(self.current_page, self.total_pages)
    }
}

/// One page of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// The items on this page.
    pub rows: &'a [T],
    /// Where this page sits in the result set.
    pub info: PageInfo,
}

impl<T> Page<'_, T> {
    /// Number of pages in the result set.
    pub fn total_pages(&self) -> usize {
        self.info.total_pages()
    }
}

/// Slices page `current_page` (1-based) out of `rows`.
///
/// # Example
///
/// ```
/// use horizon_tabular::model::paginate;
///
/// let rows: Vec<u32> = (1..=23).collect();
/// let page = paginate(&rows, 3, 10);
/// assert_eq!(page.rows, &[21, 22, 23]);
/// assert_eq!(page.total_pages(), 3);
/// assert_eq!(page.info.display_range(), Some((21, 23)));
/// ```
pub fn paginate<T>(rows: &[T], current_page: usize, page_size: usize) -> Page<'_, T> {
    let info = PageInfo::new(rows.len(), current_page, page_size);
    Page {
        rows: &rows[info.range()],
        info,
    }
}

/// The page numbers shown in pagination controls.
///
/// With five pages or fewer every page is listed. Otherwise the window is
/// five wide: pinned to `1..=5` while `current_page <= 3`, pinned to the last
/// five pages while `current_page >= total_pages - 2`, and centred on
/// `current_page` in between.
///
/// ```
/// use horizon_tabular::model::page_window;
///
/// assert_eq!(page_window(5, 3), vec![1, 2, 3]);
/// assert_eq!(page_window(2, 12), vec![1, 2, 3, 4, 5]);
/// assert_eq!(page_window(7, 12), vec![5, 6, 7, 8, 9]);
/// assert_eq!(page_window(11, 12), vec![8, 9, 10, 11, 12]);
/// ```
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<usize> {
    let total_pages = total_pages.max(1);
    if total_pages <= PAGE_WINDOW_SIZE {
        return (1..=total_pages).collect();
    }

    let half = PAGE_WINDOW_SIZE / 2;
    let first = if current_page <= half + 1 {
        1
    } else if current_page >= total_pages - half {
        total_pages - PAGE_WINDOW_SIZE + 1
    } else {
        current_page - half
    };
    (first..first + PAGE_WINDOW_SIZE).collect()
}
