//! Client-side pagination: a collection fetched in full is sliced into
//! fixed-size pages for display.

/// Page size of the members screen.
pub const MEMBERS_PER_PAGE: usize = 10;
/// Page size of the top-active list on the analytics screen.
pub const ANALYTICS_PER_PAGE: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page number actually shown
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 1-based position of the first item on the page (0 when empty)
    pub first: usize,
    /// 1-based position of the last item on the page (0 when empty)
    pub last: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// `Showing 11 to 20 of 42 results`
    pub fn summary(&self) -> String {
        if self.total_items == 0 {
            return "No results".to_string();
        }
        format!(
            "Showing {} to {} of {} results (page {}/{})",
            self.first, self.last, self.total_items, self.number, self.total_pages
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: usize,
}

impl Paginator {
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.per_page)
    }

    /// Page `number` (1-based) of `items`. Out-of-range numbers are
    /// clamped to the first or last page.
    pub fn page<'a, T>(&self, items: &'a [T], number: usize) -> Page<'a, T> {
        let total_items = items.len();
        let total_pages = self.total_pages(total_items);

        if total_items == 0 {
            return Page {
                items: &items[..0],
                number: 1,
                total_pages: 0,
                total_items: 0,
                first: 0,
                last: 0,
            };
        }

        let number = number.clamp(1, total_pages);
        let start = (number - 1) * self.per_page;
        let end = (start + self.per_page).min(total_items);

        Page {
            items: &items[start..end],
            number,
            total_pages,
            total_items,
            first: start + 1,
            last: end,
        }
    }
}

/// Footer for a page served by the backend: `Showing 11 to 20 of 42 results`.
pub fn server_page_summary(page: u32, per_page: u32, total: u64) -> String {
    if total == 0 {
        return "No results".to_string();
    }
    let first = (page.max(1) as u64 - 1) * per_page as u64 + 1;
    let last = (page.max(1) as u64 * per_page as u64).min(total);
    format!("Showing {first} to {last} of {total} results")
}
