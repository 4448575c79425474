use std::fmt::Display;
use std::num::NonZeroUsize;

/// Fixed-size paging over an ordered list
///
/// Navigation past either end is a no-op rather than an error. The current page is
/// kept inside `[0, total_pages)` whenever the backing list changes; with an empty
/// list there is no current page at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator<T> {
    items: Vec<T>,
    page_size: NonZeroUsize,
    current_page: usize,
}

/// "`n` of `total` rows" indicator shown under a shelf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageIndicator {
    pub page: usize,
    pub total_pages: usize,
}

impl Display for PageIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {} rows", self.page, self.total_pages)
    }
}

impl<T> Paginator<T> {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            items: Vec::new(),
            page_size,
            current_page: 0,
        }
    }

    pub fn with_items(items: Vec<T>, page_size: NonZeroUsize) -> Self {
        Self {
            items,
            page_size,
            current_page: 0,
        }
    }

    /// Replaces the backing list, clamping the current page into range
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.clamp();
    }

    /// Replaces the backing list and returns to the first page
    pub fn reset_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.current_page = 0;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size.get())
    }

    /// Index of the page on display, or `None` when there is nothing to page
    pub fn current_page(&self) -> Option<usize> {
        (self.total_pages() > 0).then_some(self.current_page)
    }

    /// Items on the current page
    pub fn page_items(&self) -> &[T] {
        let start = self.current_page * self.page_size.get();
        if start >= self.items.len() {
            return &[];
        }
        let end = (start + self.page_size.get()).min(self.items.len());
        &self.items[start..end]
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    /// Advances one page; returns whether the page changed
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Steps back one page; returns whether the page changed
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    pub fn indicator(&self) -> Option<PageIndicator> {
        self.current_page().map(|page| PageIndicator {
            page: page + 1,
            total_pages: self.total_pages(),
        })
    }

    fn clamp(&mut self) {
        self.current_page = self.current_page.min(self.total_pages().saturating_sub(1));
    }
}
