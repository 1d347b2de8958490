//! Skip-based iteration over live vector slots.

use std::iter::FusedIterator;

use stash_core::Handle;

use crate::vector::Vector;

/// Iterator over `(index, element)` for the live slots of a [`Vector`].
///
/// Advances word-at-a-time through the occupancy bitmap, so long runs of
/// tombstones cost one scan per 64 slots.
#[derive(Clone, Debug)]
pub struct LiveIter<'a> {
    vector: &'a Vector,
    cursor: usize,
}

impl<'a> LiveIter<'a> {
    pub(crate) fn new(vector: &'a Vector) -> Self {
        Self { vector, cursor: 0 }
    }
}

impl Iterator for LiveIter<'_> {
    type Item = (usize, Handle);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, handle) = self.vector.next_live(self.cursor)?;
        self.cursor = index + 1;
        Some((index, handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.vector.len().saturating_sub(self.cursor);
        (0, Some(remaining.min(self.vector.used())))
    }
}

impl FusedIterator for LiveIter<'_> {}
