//! Growable handle array with tombstone erase.
//!
//! [`Vector`] appends at a high-water mark and never shifts elements.
//! `erase` only clears the slot's bit in the occupancy [`Bitmap`], leaving
//! a tombstone that every scan and iterator skips. This is the sparse-set
//! pattern: indices handed out stay valid until the slot is popped.

use std::fmt;

use stash_core::{Container, ContainerError, GrowthConfig, Handle, ResizeStats, SlotSequence};

use crate::bitmap::Bitmap;
use crate::iter::LiveIter;

/// A growable array of opaque handles with O(1) soft delete.
///
/// Bookkeeping:
/// - `size`: high-water mark, slots ever pushed and not popped (includes
///   tombstones).
/// - `used`: live slots, i.e. set bits.
/// - `capacity`: allocated slots.
///
/// `used <= size <= capacity` holds after every operation.
#[derive(Clone)]
pub struct Vector {
    /// Slot storage. `slots.len()` is the capacity; unwritten and popped
    /// slots are `None`.
    slots: Vec<Option<Handle>>,
    /// One bit per slot, set while the slot is live.
    bitmap: Bitmap,
    size: usize,
    used: usize,
    config: GrowthConfig,
    stats: ResizeStats,
}

impl Vector {
    /// Create an empty vector for elements `element_width` bytes wide.
    ///
    /// No storage is allocated until the first push.
    pub fn new(element_width: u32) -> Result<Self, ContainerError> {
        Self::with_config(GrowthConfig::new(element_width))
    }

    /// Create an empty vector with explicit growth parameters.
    pub fn with_config(config: GrowthConfig) -> Result<Self, ContainerError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: GrowthConfig) -> Self {
        Self {
            slots: Vec::new(),
            bitmap: Bitmap::new(),
            size: 0,
            used: 0,
            config,
            stats: ResizeStats::default(),
        }
    }

    /// Whether no slot is live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// The high-water mark, including tombstoned slots.
    ///
    /// Callers iterating by index must skip slots for which
    /// [`is_live`](Self::is_live) is false, or use [`iter`](Self::iter).
    #[inline]
    pub fn length(&self) -> usize {
        self.size
    }

    /// Alias for [`length`](Self::length).
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Number of live elements.
    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    /// Allocated slot capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The growth parameters this vector was built with.
    pub fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// The occupancy bitmap.
    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    /// Resize counters since construction.
    pub fn stats(&self) -> ResizeStats {
        self.stats
    }

    /// Bytes of backing storage: slots at the configured element width
    /// plus bitmap words.
    pub fn memory_bytes(&self) -> usize {
        self.config.growth_bytes(self.capacity())
            + self.bitmap.word_count() * std::mem::size_of::<u64>()
    }

    /// Raw slot content at `index`, without checking occupancy.
    ///
    /// A tombstoned slot still returns the element it held before `erase`.
    /// Check [`is_live`](Self::is_live) first, or use [`get`](Self::get).
    pub fn at(&self, index: usize) -> Result<Option<Handle>, ContainerError> {
        if index >= self.size {
            return Err(ContainerError::IndexOutOfBounds {
                index,
                len: self.size,
            });
        }
        Ok(self.slots[index])
    }

    /// The element at `index` if that slot is live.
    pub fn get(&self, index: usize) -> Option<Handle> {
        if self.is_live(index) {
            self.slots[index]
        } else {
            None
        }
    }

    /// Whether the slot at `index` holds a live element.
    #[inline]
    pub fn is_live(&self, index: usize) -> bool {
        index < self.size && self.bitmap.check(index)
    }

    /// First live element, scanning upward from slot 0.
    pub fn front(&self) -> Option<Handle> {
        self.next_live(0).map(|(_, h)| h)
    }

    /// Last live element, scanning downward from the high-water mark.
    pub fn back(&self) -> Option<Handle> {
        let index = self.bitmap.prev_set(self.size)?;
        self.slots[index]
    }

    /// First live slot at or after `from`, with its element.
    ///
    /// This is the skip-based cursor behind [`iter`](Self::iter): resume
    /// from `index + 1` to continue. Erasing slots between calls is safe.
    pub fn next_live(&self, from: usize) -> Option<(usize, Handle)> {
        let index = self.bitmap.next_set(from, self.size)?;
        self.slots[index].map(|h| (index, h))
    }

    /// Iterate `(index, element)` over live slots in index order.
    pub fn iter(&self) -> LiveIter<'_> {
        LiveIter::new(self)
    }

    /// Iterate live elements in index order.
    pub fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        self.iter().map(|(_, h)| h)
    }

    /// Append `element` at the high-water mark.
    ///
    /// Grows by `vector_increment` slots when full. On failure the vector
    /// is left exactly as it was.
    pub fn push_back(&mut self, element: Handle) -> Result<(), ContainerError> {
        if self.size == self.capacity() {
            let target = self
                .capacity()
                .checked_add(self.config.vector_increment)
                .ok_or(ContainerError::AllocationFailed {
                    requested_slots: usize::MAX,
                })?;
            self.grow_to(target)?;
        }

        self.bitmap.set(self.size);
        self.slots[self.size] = Some(element);
        self.size += 1;
        self.used += 1;
        Ok(())
    }

    /// Remove the last slot.
    ///
    /// Returns `Some(element)` if the slot was live and `None` if it was a
    /// tombstone; an erased element is never handed back. Before popping,
    /// sheds one growth increment if at least that much capacity sits
    /// unused, so the shrunk vector can still take a push without regrowing.
    pub fn pop_back(&mut self) -> Result<Option<Handle>, ContainerError> {
        if self.size == 0 {
            return Err(ContainerError::Empty);
        }

        let increment = self.config.vector_increment;
        if self.capacity().saturating_sub(self.size) >= increment {
            self.shrink_to(self.capacity() - increment);
        }

        let last = self.size - 1;
        let live = self.bitmap.check(last);
        self.bitmap.clear(last);
        let element = self.slots[last].take();
        self.size = last;

        if live {
            self.used -= 1;
            Ok(element)
        } else {
            Ok(None)
        }
    }

    /// Tombstone the slot at `index`.
    ///
    /// Clears the bit and decrements `used`. Nothing moves, and the
    /// high-water mark is unchanged.
    pub fn erase(&mut self, index: usize) -> Result<(), ContainerError> {
        if index >= self.size {
            return Err(ContainerError::IndexOutOfBounds {
                index,
                len: self.size,
            });
        }
        if !self.bitmap.check(index) {
            return Err(ContainerError::SlotVacant { index });
        }
        self.bitmap.clear(index);
        self.used -= 1;
        Ok(())
    }

    /// Null every slot and clear the bitmap.
    ///
    /// The allocation, the high-water mark and the capacity are kept;
    /// only `used` drops to zero.
    pub fn clear(&mut self) {
        self.slots[..self.size].fill(None);
        self.bitmap.reset();
        self.used = 0;
    }

    /// Set the slot capacity explicitly.
    ///
    /// Rejects a capacity below the high-water mark. Growing is atomic:
    /// both the slot buffer and the bitmap are reserved before either
    /// changes.
    pub fn resize(&mut self, capacity: usize) -> Result<(), ContainerError> {
        if capacity < self.size {
            return Err(ContainerError::ShrinkBelowLength {
                requested: capacity,
                len: self.size,
            });
        }
        match capacity.cmp(&self.capacity()) {
            std::cmp::Ordering::Greater => self.grow_to(capacity),
            std::cmp::Ordering::Less => {
                self.shrink_to(capacity);
                Ok(())
            }
            std::cmp::Ordering::Equal => Ok(()),
        }
    }

    fn grow_to(&mut self, capacity: usize) -> Result<(), ContainerError> {
        self.config.check_cap(capacity)?;
        let additional = capacity - self.slots.len();
        self.slots
            .try_reserve_exact(additional)
            .map_err(|e| ContainerError::from_reserve(capacity, e))?;
        self.bitmap
            .try_reserve_for(capacity)
            .map_err(|_| ContainerError::AllocationFailed {
                requested_slots: capacity,
            })?;

        // Both reservations succeeded; nothing below allocates.
        self.slots.resize(capacity, None);
        self.bitmap.resize_for(capacity);
        self.stats.grows += 1;
        Ok(())
    }

    fn shrink_to(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.size);
        self.slots.truncate(capacity);
        self.slots.shrink_to_fit();
        self.bitmap.resize_for(capacity);
        self.stats.shrinks += 1;
    }
}

impl Default for Vector {
    fn default() -> Self {
        Self::from_valid(GrowthConfig::default())
    }
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("size", &self.size)
            .field("used", &self.used)
            .field("capacity", &self.capacity())
            .field("element_width", &self.config.element_width)
            .finish()
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = (usize, Handle);
    type IntoIter = LiveIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Container for Vector {
    fn is_empty(&self) -> bool {
        Vector::is_empty(self)
    }

    fn length(&self) -> usize {
        Vector::length(self)
    }

    fn capacity(&self) -> usize {
        Vector::capacity(self)
    }

    fn resize(&mut self, capacity: usize) -> Result<(), ContainerError> {
        Vector::resize(self, capacity)
    }
}

impl SlotSequence for Vector {
    fn at(&self, index: usize) -> Result<Option<Handle>, ContainerError> {
        Vector::at(self, index)
    }

    fn front(&self) -> Option<Handle> {
        Vector::front(self)
    }

    fn back(&self) -> Option<Handle> {
        Vector::back(self)
    }

    fn push_back(&mut self, element: Handle) -> Result<(), ContainerError> {
        Vector::push_back(self, element)
    }

    fn pop_back(&mut self) -> Result<Option<Handle>, ContainerError> {
        Vector::pop_back(self)
    }

    fn erase(&mut self, index: usize) -> Result<(), ContainerError> {
        Vector::erase(self, index)
    }

    fn clear(&mut self) {
        Vector::clear(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stash_test_utils::handle;

    fn small(increment: usize) -> Vector {
        Vector::with_config(GrowthConfig::default().vector_increment(increment)).unwrap()
    }

    fn filled(n: usize) -> Vector {
        let mut v = Vector::new(8).unwrap();
        for i in 1..=n {
            v.push_back(handle(i)).unwrap();
        }
        v
    }

    fn assert_invariants(v: &Vector) {
        assert!(v.used() <= v.len());
        assert!(v.len() <= v.capacity());
        assert_eq!(v.used(), v.bitmap().count_ones());
        assert!(v.bitmap().bit_capacity() >= v.capacity());
    }

    #[test]
    fn new_vector_is_empty_and_unallocated() {
        let v = Vector::new(8).unwrap();
        assert!(v.is_empty());
        assert_eq!(v.len(), 0);
        assert_eq!(v.capacity(), 0);
        assert_eq!(v.front(), None);
        assert_eq!(v.back(), None);
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(matches!(
            Vector::new(0),
            Err(ContainerError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn two_hundred_pushes_grow_twice() {
        let v = filled(200);
        assert_eq!(v.stats().grows, 2);
        assert_eq!(v.len(), 200);
        assert_eq!(v.used(), 200);
        assert!(v.capacity() >= 200);
        assert_eq!(v.capacity(), 256);
        assert_invariants(&v);
    }

    #[test]
    fn at_returns_raw_slot_and_checks_range() {
        let mut v = filled(3);
        v.erase(1).unwrap();
        assert_eq!(v.at(1), Ok(Some(handle(2))), "tombstone keeps its content");
        assert_eq!(v.get(1), None);
        assert_eq!(
            v.at(3),
            Err(ContainerError::IndexOutOfBounds { index: 3, len: 3 })
        );
    }

    #[test]
    fn erase_tombstones_without_shifting() {
        let mut v = filled(5);
        v.erase(2).unwrap();
        assert_eq!(v.len(), 5);
        assert_eq!(v.used(), 4);
        assert!(!v.is_live(2));
        assert_eq!(v.get(3), Some(handle(4)));
        let live: Vec<_> = v.handles().collect();
        assert_eq!(live, vec![handle(1), handle(2), handle(4), handle(5)]);
    }

    #[test]
    fn erase_twice_is_an_error() {
        let mut v = filled(2);
        v.erase(0).unwrap();
        assert_eq!(v.erase(0), Err(ContainerError::SlotVacant { index: 0 }));
        assert_eq!(v.used(), 1);
    }

    #[test]
    fn erase_out_of_range() {
        let mut v = filled(2);
        assert_eq!(
            v.erase(2),
            Err(ContainerError::IndexOutOfBounds { index: 2, len: 2 })
        );
    }

    #[test]
    fn front_and_back_skip_tombstones() {
        let mut v = filled(4);
        v.erase(0).unwrap();
        v.erase(3).unwrap();
        assert_eq!(v.front(), Some(handle(2)));
        assert_eq!(v.back(), Some(handle(3)));
        v.erase(1).unwrap();
        v.erase(2).unwrap();
        assert!(v.is_empty());
        assert_eq!(v.front(), None);
        assert_eq!(v.back(), None);
    }

    #[test]
    fn pop_back_returns_in_reverse() {
        let mut v = filled(3);
        assert_eq!(v.pop_back(), Ok(Some(handle(3))));
        assert_eq!(v.pop_back(), Ok(Some(handle(2))));
        assert_eq!(v.pop_back(), Ok(Some(handle(1))));
        assert_eq!(v.pop_back(), Err(ContainerError::Empty));
        assert!(v.is_empty());
    }

    #[test]
    fn pop_back_over_tombstone_yields_none() {
        let mut v = filled(3);
        v.erase(2).unwrap();
        assert_eq!(v.pop_back(), Ok(None));
        assert_eq!(v.len(), 2);
        assert_eq!(v.used(), 2);
        assert_invariants(&v);
    }

    #[test]
    fn pop_back_shrinks_with_hysteresis() {
        let mut v = small(4);
        for i in 1..=9 {
            v.push_back(handle(i)).unwrap();
        }
        assert_eq!(v.capacity(), 12);

        // 9 + 4 > 12: keep the capacity.
        v.pop_back().unwrap();
        assert_eq!(v.capacity(), 12);

        // 8 + 4 <= 12: shed one increment before popping.
        v.pop_back().unwrap();
        assert_eq!(v.capacity(), 8);
        assert_eq!(v.len(), 7);
        assert_eq!(v.stats().shrinks, 1);

        // The shrunk vector takes a push without regrowing.
        let grows = v.stats().grows;
        v.push_back(handle(99)).unwrap();
        assert_eq!(v.stats().grows, grows);
        assert_eq!(v.back(), Some(handle(99)));
        assert_invariants(&v);
    }

    #[test]
    fn clear_keeps_allocation_and_high_water_mark() {
        let mut v = filled(10);
        let capacity = v.capacity();
        v.clear();
        assert!(v.is_empty());
        assert_eq!(v.len(), 10);
        assert_eq!(v.capacity(), capacity);
        assert_eq!(v.at(4), Ok(None));
        assert_eq!(v.front(), None);

        let grows = v.stats().grows;
        v.push_back(handle(77)).unwrap();
        assert_eq!(v.stats().grows, grows, "push reused existing capacity");
        assert_eq!(v.front(), Some(handle(77)));
        assert_invariants(&v);
    }

    #[test]
    fn next_live_resumes_past_erased_slots() {
        let mut v = filled(6);
        v.erase(1).unwrap();
        v.erase(2).unwrap();
        assert_eq!(v.next_live(0), Some((0, handle(1))));
        assert_eq!(v.next_live(1), Some((3, handle(4))));
        assert_eq!(v.next_live(6), None);
        let indices: Vec<_> = v.iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 3, 4, 5]);
    }

    #[test]
    fn resize_grows_and_refuses_to_drop_contents() {
        let mut v = filled(3);
        v.resize(300).unwrap();
        assert_eq!(v.capacity(), 300);
        assert_eq!(
            v.resize(2),
            Err(ContainerError::ShrinkBelowLength {
                requested: 2,
                len: 3
            })
        );
        v.resize(3).unwrap();
        assert_eq!(v.capacity(), 3);
        assert_eq!(v.back(), Some(handle(3)));
        assert_invariants(&v);
    }

    #[test]
    fn capped_growth_leaves_vector_unchanged() {
        let config = GrowthConfig::default().vector_increment(4).max_slots(4);
        let mut v = Vector::with_config(config).unwrap();
        for i in 1..=4 {
            v.push_back(handle(i)).unwrap();
        }
        let err = v.push_back(handle(5)).unwrap_err();
        assert_eq!(
            err,
            ContainerError::CapacityExceeded {
                requested: 8,
                limit: 4
            }
        );
        assert_eq!(v.len(), 4);
        assert_eq!(v.capacity(), 4);
        assert_eq!(v.back(), Some(handle(4)));
        assert_invariants(&v);
    }

    #[test]
    fn huge_increment_pops_without_overflow() {
        let mut v = Vector::with_config(GrowthConfig::default().vector_increment(usize::MAX)).unwrap();
        v.resize(4).unwrap();
        v.push_back(handle(1)).unwrap();
        assert_eq!(v.pop_back(), Ok(Some(handle(1))));
        assert_eq!(v.capacity(), 4);
        assert_eq!(v.stats().shrinks, 0);
        assert_invariants(&v);
    }

    #[test]
    fn refused_reservation_leaves_vector_unchanged() {
        let mut v = Vector::with_config(GrowthConfig::default().vector_increment(usize::MAX / 2)).unwrap();
        v.resize(4).unwrap();
        for i in 1..=4 {
            v.push_back(handle(i)).unwrap();
        }
        let err = v.push_back(handle(5)).unwrap_err();
        assert!(matches!(err, ContainerError::AllocationFailed { .. }));
        assert!(err.is_allocation_failure());
        assert_eq!(v.len(), 4);
        assert_eq!(v.used(), 4);
        assert_eq!(v.capacity(), 4);
        assert_eq!(v.back(), Some(handle(4)));
        assert_eq!(v.stats().grows, 1);
        assert_invariants(&v);
    }

    #[test]
    fn memory_bytes_counts_slots_and_words() {
        let v = filled(1);
        assert_eq!(v.memory_bytes(), 128 * 8 + 2 * 8);
    }

    #[test]
    fn debug_omits_slot_contents() {
        let v = filled(2);
        let s = format!("{v:?}");
        assert!(s.contains("size: 2"));
        assert!(!s.contains("slots"));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use stash_test_utils::{arb_handle, arb_small_config};

        #[derive(Clone, Debug)]
        enum Op {
            Push(Handle),
            Pop,
            Erase(usize),
            Clear,
        }

        fn arb_op() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => arb_handle().prop_map(Op::Push),
                2 => Just(Op::Pop),
                2 => (0usize..64).prop_map(Op::Erase),
                1 => Just(Op::Clear),
            ]
        }

        proptest! {
            #[test]
            fn invariants_hold_against_model(
                config in arb_small_config(),
                ops in proptest::collection::vec(arb_op(), 1..200),
            ) {
                let increment = config.vector_increment;
                let mut v = Vector::with_config(config).unwrap();
                // Model: one entry per slot up to the high-water mark.
                let mut model: Vec<Option<Handle>> = Vec::new();
                for op in ops {
                    match op {
                        Op::Push(h) => {
                            v.push_back(h).unwrap();
                            model.push(Some(h));
                        }
                        Op::Pop => {
                            let got = v.pop_back();
                            match model.pop() {
                                Some(expect) => prop_assert_eq!(got, Ok(expect)),
                                None => prop_assert_eq!(got, Err(ContainerError::Empty)),
                            }
                        }
                        Op::Erase(i) => {
                            let got = v.erase(i);
                            match model.get(i).copied() {
                                Some(Some(_)) => {
                                    model[i] = None;
                                    prop_assert!(got.is_ok());
                                }
                                Some(None) => prop_assert_eq!(got, Err(ContainerError::SlotVacant { index: i })),
                                None => prop_assert!(got.is_err()),
                            }
                        }
                        Op::Clear => {
                            v.clear();
                            model.iter_mut().for_each(|s| *s = None);
                        }
                    }

                    prop_assert!(v.used() <= v.len());
                    prop_assert!(v.len() <= v.capacity());
                    prop_assert!(v.capacity() - v.len() <= increment);
                    prop_assert_eq!(v.len(), model.len());
                    prop_assert_eq!(v.used(), model.iter().flatten().count());
                    prop_assert_eq!(v.front(), model.iter().flatten().next().copied());
                    prop_assert_eq!(v.back(), model.iter().flatten().last().copied());
                    let live: Vec<_> = v.handles().collect();
                    let expect: Vec<_> = model.iter().flatten().copied().collect();
                    prop_assert_eq!(live, expect);
                }
            }
        }
    }
}
