use std::ops::Range;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// 1-based page number. Anything below 1 is treated as the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(usize);

impl Page {
    pub fn new(number: usize) -> Self {
        Self(number.max(1))
    }

    /// Half-open index range `[10(P-1), 10P)` of this page in the full set.
    pub fn bounds(&self) -> Range<usize> {
        let start = (self.0 - 1).saturating_mul(QUESTIONS_PER_PAGE);
        start..start.saturating_add(QUESTIONS_PER_PAGE)
    }

    /// The part of `items` on this page; empty once past the end.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let Range { start, end } = self.bounds();
        let start = start.min(items.len());
        let end = end.min(items.len());
        &items[start..end]
    }
}

impl Default for Page {
    fn default() -> Self {
        Self(1)
    }
}

impl From<Option<u32>> for Page {
    fn from(number: Option<u32>) -> Self {
        number.map_or_else(Page::default, |n| Page::new(n as usize))
    }
}
