//! List windowing — stable pagination over an ordered, dynamically
//! changing sequence.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use battleview_core::model::Task;

/// Pagination state for one list instance.
///
/// Invariant: `1 <= page <= total_pages` at all times. Callers must run
/// `sync_len` whenever the underlying collection's size changes, before
/// the next `window` call, so a stale page is never rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pager {
    page: usize,
    page_size: usize,
    len: usize,
}

impl Pager {
    /// `page_size` must be non-zero.
    pub fn new(page_size: usize) -> Self {
        debug_assert!(page_size > 0);
        Self {
            page: 1,
            page_size: page_size.max(1),
            len: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.len.div_ceil(self.page_size).max(1)
    }

    /// Go to a page, clamped to `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    /// Re-clamp after the underlying collection changed size.
    pub fn sync_len(&mut self, len: usize) {
        self.len = len;
        self.page = self.page.clamp(1, self.total_pages());
    }

    /// Jump to the page containing the item at `index` in the current
    /// ordering.
    pub fn jump_to_containing(&mut self, index: usize) {
        if index < self.len {
            self.page = index / self.page_size + 1;
        }
    }

    /// The currently visible slice bounds.
    pub fn window(&self) -> Range<usize> {
        let start = (self.page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.len);
        start.min(end)..end
    }
}

/// Ordering for the task list: descending by start time, with tasks
/// whose start time is absent or unparseable treated as time 0 (the
/// oldest). Stable: equal timestamps keep original collection order.
///
/// Returns indices into `tasks` rather than reordering the collection,
/// so the store's ordering (and id-based references into it) stays
/// untouched.
pub fn task_order(tasks: &[Task]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..tasks.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(tasks[i].start_time_ms()));
    order
}
