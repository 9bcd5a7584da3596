//! Paged views over record sets.

use serde::{Deserialize, Serialize};

/// A bounded slice of a larger ordered record set.
///
/// `page_index` is zero-based. `total_count` is the size of the underlying
/// set, not of the slice. Paged lists are request-scoped values and are
/// never cached or persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedList<T> {
    /// Records on this page.
    pub items: Vec<T>,
    /// Size of the full underlying set.
    pub total_count: usize,
    /// Zero-based page index.
    pub page_index: usize,
    /// Requested page size.
    pub page_size: usize,
}

impl<T> PagedList<T> {
    /// Build a page from an already-sliced set of records.
    pub fn new(items: Vec<T>, total_count: usize, page_index: usize, page_size: usize) -> Self {
        Self {
            items,
            total_count,
            page_index,
            page_size,
        }
    }

    /// Slice a full in-memory list into one page.
    ///
    /// Used when a cached full list is present, so pagination never goes
    /// back to the store.
    pub fn from_full(all: Vec<T>, page_index: usize, page_size: usize) -> Self {
        let total_count = all.len();
        let items = all
            .into_iter()
            .skip(page_index.saturating_mul(page_size))
            .take(page_size)
            .collect();

        Self {
            items,
            total_count,
            page_index,
            page_size,
        }
    }

    /// Number of pages in the underlying set.
    pub const fn page_count(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total_count.div_ceil(self.page_size)
        }
    }

    /// Whether a page follows this one.
    pub const fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    /// Whether a page precedes this one.
    pub const fn has_previous(&self) -> bool {
        self.page_index > 0
    }
}
