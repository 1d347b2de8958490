//! Oldest-first traversal of a [`Queue`](crate::Queue).

use std::iter::FusedIterator;

use stash_core::Handle;

/// Iterator over queued elements in FIFO order.
///
/// Created by [`Queue::iter`](crate::Queue::iter). Walks the ring from
/// `front`, wrapping at the end of the buffer, for exactly `len()` slots.
pub struct QueueIter<'a> {
    slots: &'a [Option<Handle>],
    cursor: usize,
    remaining: usize,
}

impl<'a> QueueIter<'a> {
    pub(crate) fn new(slots: &'a [Option<Handle>], front: usize, len: usize) -> Self {
        Self {
            slots,
            cursor: front,
            remaining: len,
        }
    }
}

impl Iterator for QueueIter<'_> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.slots[self.cursor];
        debug_assert!(slot.is_some(), "vacant slot {} inside the live run", self.cursor);
        self.cursor = (self.cursor + 1) % self.slots.len();
        self.remaining -= 1;
        slot
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for QueueIter<'_> {}

impl FusedIterator for QueueIter<'_> {}
