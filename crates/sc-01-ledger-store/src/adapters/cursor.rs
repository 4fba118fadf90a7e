//! Cursor accounting shared by the ledger adapters.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Iterator wrapper that holds one slot in an open-cursor counter.
///
/// The slot is taken on construction and returned on drop, so early exits
/// (errors, `?`, partially consumed scans) release it like a full scan does.
pub struct TrackedCursor<'a, I> {
    inner: I,
    open: &'a AtomicUsize,
}

impl<'a, I> TrackedCursor<'a, I> {
    /// Wrap `inner`, taking a slot in `open`.
    pub fn new(inner: I, open: &'a AtomicUsize) -> Self {
        open.fetch_add(1, Ordering::SeqCst);
        Self { inner, open }
    }
}

impl<I: Iterator> Iterator for TrackedCursor<'_, I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I> Drop for TrackedCursor<'_, I> {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}
