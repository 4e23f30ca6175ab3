//! Paginated result envelope.

use serde::{Deserialize, Serialize};

/// One page of items plus the total number of matches before paging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Paginated<T> {
    /// Slice a page out of an already filtered sequence.
    ///
    /// `page` is 1-based. Pages past the end are empty but keep the total.
    pub fn from_matches<I>(matches: I, page: u32, count: u32) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let matches: Vec<T> = matches.into_iter().collect();
        let total = matches.len();
        let skip = (page.saturating_sub(1) as usize).saturating_mul(count as usize);
        let items = matches.into_iter().skip(skip).take(count as usize).collect();

        Self { items, total }
    }

    /// Convert every item, keeping the total.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }

    /// Whether this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
