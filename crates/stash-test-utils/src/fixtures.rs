//! Handle fixtures and proptest strategies.

use std::num::NonZeroUsize;

use proptest::prelude::*;
use stash_core::{GrowthConfig, Handle};

/// A handle whose address is `n`. Panics on zero.
///
/// These handles are never dereferenced; the address is just a tag that
/// makes assertions readable.
pub fn handle(n: usize) -> Handle {
    Handle::from_addr(NonZeroUsize::new(n).expect("handle tag must be non-zero"))
}

/// One tagged handle per value in `range`.
pub fn handles(range: impl IntoIterator<Item = usize>) -> Vec<Handle> {
    range.into_iter().map(handle).collect()
}

/// Heap-allocated payloads whose addresses serve as real handles.
///
/// Keeps the boxes alive for as long as the handles are in use, the way a
/// caller of the containers owns the pointed-to objects.
pub struct BoxedPayloads {
    items: Vec<Box<u64>>,
}

impl BoxedPayloads {
    pub fn new(count: usize) -> Self {
        Self {
            items: (0..count as u64).map(Box::new).collect(),
        }
    }

    pub fn handle(&self, index: usize) -> Handle {
        Handle::from_ref(&*self.items[index])
    }

    pub fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        self.items.iter().map(|b| Handle::from_ref(&**b))
    }

    /// Read the payload a handle points at.
    ///
    /// Only valid for handles produced by this set; the lookup is by
    /// address, so no pointer is dereferenced.
    pub fn value_of(&self, h: Handle) -> Option<u64> {
        self.items
            .iter()
            .find(|b| std::ptr::eq(&***b, h.as_ptr::<u64>()))
            .map(|b| **b)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Any non-null handle.
pub fn arb_handle() -> impl Strategy<Value = Handle> {
    (1usize..=usize::MAX).prop_map(handle)
}

/// Configurations with tiny increments, so short op sequences exercise
/// growth, shrink and wraparound.
pub fn arb_small_config() -> impl Strategy<Value = GrowthConfig> {
    (1u32..=16, 1usize..=8, 2usize..=8, 2usize..=16).prop_map(
        |(width, vector_increment, queue_increment, queue_reclaim)| {
            GrowthConfig::new(width)
                .vector_increment(vector_increment)
                .queue_increment(queue_increment)
                .queue_reclaim(queue_reclaim)
        },
    )
}
