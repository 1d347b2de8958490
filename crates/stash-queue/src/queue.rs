//! Growable ring-buffer queue.
//!
//! [`Queue`] keeps its elements in a circular slot buffer addressed by
//! `front` and `rear`. One slot is always left free so that
//! `front == rear` unambiguously means empty. When a push would consume
//! that reserved slot the buffer grows by a small fixed increment, and if
//! the live run wraps past the old end, the shorter of its two segments is
//! block-moved so the layout fits the larger buffer.

use std::fmt;

use stash_core::{Container, ContainerError, Fifo, GrowthConfig, Handle, ResizeStats};

use crate::iter::QueueIter;

/// A FIFO queue of opaque handles with amortized O(1) push and pop.
///
/// Invariant: with `capacity > 0`,
/// `(rear + capacity - front) % capacity == size` and `size < capacity`.
/// With `capacity == 0`, `front == rear == size == 0`.
#[derive(Clone)]
pub struct Queue {
    /// Ring storage. `slots.len()` is the capacity; free slots are `None`.
    slots: Vec<Option<Handle>>,
    /// Index of the oldest element.
    front: usize,
    /// Index one past the newest element (mod capacity).
    rear: usize,
    size: usize,
    config: GrowthConfig,
    stats: ResizeStats,
}

impl Queue {
    /// Create an empty queue for elements `element_width` bytes wide.
    ///
    /// No storage is allocated until the first push.
    pub fn new(element_width: u32) -> Result<Self, ContainerError> {
        Self::with_config(GrowthConfig::new(element_width))
    }

    /// Create an empty queue with explicit growth parameters.
    pub fn with_config(config: GrowthConfig) -> Result<Self, ContainerError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: GrowthConfig) -> Self {
        Self {
            slots: Vec::new(),
            front: 0,
            rear: 0,
            size: 0,
            config,
            stats: ResizeStats::default(),
        }
    }

    /// Whether the queue holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of queued elements.
    #[inline]
    pub fn length(&self) -> usize {
        self.size
    }

    /// Alias for [`length`](Self::length).
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Allocated slot capacity, including the reserved slot.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Current `(front, rear)` ring indices.
    pub fn cursors(&self) -> (usize, usize) {
        (self.front, self.rear)
    }

    /// Whether the live run currently crosses the end of the buffer.
    pub fn is_wrapped(&self) -> bool {
        0 < self.rear && self.rear < self.front
    }

    /// The growth parameters this queue was built with.
    pub fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// Resize and relocation counters since construction.
    pub fn stats(&self) -> ResizeStats {
        self.stats
    }

    /// Bytes of backing storage at the configured element width.
    pub fn memory_bytes(&self) -> usize {
        self.config.growth_bytes(self.capacity())
    }

    /// The oldest element.
    pub fn front(&self) -> Option<Handle> {
        if self.size == 0 {
            return None;
        }
        self.slots[self.front]
    }

    /// The newest element.
    pub fn back(&self) -> Option<Handle> {
        if self.size == 0 {
            return None;
        }
        let capacity = self.capacity();
        self.slots[(self.rear + capacity - 1) % capacity]
    }

    /// Iterate elements oldest first.
    pub fn iter(&self) -> QueueIter<'_> {
        QueueIter::new(&self.slots, self.front, self.size)
    }

    /// Enqueue `element`.
    ///
    /// When advancing `rear` would land on `front`, grows by
    /// `queue_increment` slots first. On failure the queue is left
    /// exactly as it was.
    pub fn push(&mut self, element: Handle) -> Result<(), ContainerError> {
        let capacity = self.capacity();
        let next_rear = if capacity == 0 {
            0
        } else {
            (self.rear + 1) % capacity
        };
        if next_rear == self.front {
            self.grow_and_unwrap()?;
        }

        self.slots[self.rear] = Some(element);
        self.rear = (self.rear + 1) % self.capacity();
        self.size += 1;
        Ok(())
    }

    /// Dequeue the oldest element.
    ///
    /// Draining the last element rewinds both cursors to slot 0 and, if
    /// the buffer is larger than `queue_reclaim`, shrinks it back to that
    /// size.
    pub fn pop(&mut self) -> Result<Handle, ContainerError> {
        if self.size == 0 {
            return Err(ContainerError::Empty);
        }
        let element = self.slots[self.front].take().ok_or(ContainerError::Empty)?;
        self.front = (self.front + 1) % self.capacity();
        self.size -= 1;
        if self.size == 0 {
            self.reclaim();
        }
        Ok(element)
    }

    /// Rebuild the buffer at exactly `capacity` slots.
    ///
    /// Elements are laid out unwrapped from slot 0. A non-empty queue needs
    /// `len() + 1` slots (the reserved slot). The new buffer is fully
    /// allocated before the old one is released.
    pub fn resize(&mut self, capacity: usize) -> Result<(), ContainerError> {
        if capacity == self.capacity() {
            return Ok(());
        }
        let needed = if self.size == 0 { 0 } else { self.size + 1 };
        if capacity < needed {
            return Err(ContainerError::ShrinkBelowLength {
                requested: capacity,
                len: needed,
            });
        }
        let growing = capacity > self.capacity();
        if growing {
            self.config.check_cap(capacity)?;
        }

        let mut fresh: Vec<Option<Handle>> = Vec::new();
        fresh
            .try_reserve_exact(capacity)
            .map_err(|e| ContainerError::from_reserve(capacity, e))?;
        fresh.extend(self.iter().map(Some));
        fresh.resize(capacity, None);

        self.slots = fresh;
        self.front = 0;
        self.rear = self.size;
        if growing {
            self.stats.grows += 1;
        } else {
            self.stats.shrinks += 1;
        }
        Ok(())
    }

    /// Grow by one increment and make the live run consistent with the
    /// larger buffer.
    ///
    /// Only called when the queue is full, so `rear + 1 == front` (mod the
    /// old capacity). If the run wraps, it is split into a head segment
    /// `[0, rear)` and a tail segment `[front, old)`:
    ///
    /// ```text
    /// head shorter:  [H H . T T T] -> [. . . T T T H H . .]   (head moved up)
    /// tail shorter:  [H H H . T T] -> [H H H . . . . . T T]   (tail moved to end)
    /// ```
    fn grow_and_unwrap(&mut self) -> Result<(), ContainerError> {
        let old = self.capacity();
        let increment = self.config.queue_increment;
        let capacity = old
            .checked_add(increment)
            .ok_or(ContainerError::AllocationFailed {
                requested_slots: usize::MAX,
            })?;
        self.config.check_cap(capacity)?;
        self.slots
            .try_reserve_exact(increment)
            .map_err(|e| ContainerError::from_reserve(capacity, e))?;
        self.slots.resize(capacity, None);
        self.stats.grows += 1;

        if self.rear >= self.front {
            // Unwrapped (or empty): the new slots extend the free gap.
            return Ok(());
        }

        let head = self.rear;
        let tail = old - self.front;
        if head < tail && head <= increment {
            self.slots.copy_within(0..head, old);
            self.slots[..head].fill(None);
            self.rear = (old + head) % capacity;
            self.stats.relocated_slots += head as u64;
        } else {
            let dest = capacity - tail;
            self.slots.copy_within(self.front..old, dest);
            // Source and destination overlap when the tail is longer
            // than the increment; only the uncovered prefix is vacated.
            self.slots[self.front..dest.min(old)].fill(None);
            self.front = dest;
            self.stats.relocated_slots += tail as u64;
        }
        Ok(())
    }

    fn reclaim(&mut self) {
        self.front = 0;
        self.rear = 0;
        let target = self.config.queue_reclaim;
        if self.capacity() > target {
            self.slots.truncate(target);
            self.slots.shrink_to_fit();
            self.stats.shrinks += 1;
        }
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::from_valid(GrowthConfig::default())
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("size", &self.size)
            .field("capacity", &self.capacity())
            .field("front", &self.front)
            .field("rear", &self.rear)
            .field("element_width", &self.config.element_width)
            .finish()
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = Handle;
    type IntoIter = QueueIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Container for Queue {
    fn is_empty(&self) -> bool {
        Queue::is_empty(self)
    }

    fn length(&self) -> usize {
        Queue::length(self)
    }

    fn capacity(&self) -> usize {
        Queue::capacity(self)
    }

    fn resize(&mut self, capacity: usize) -> Result<(), ContainerError> {
        Queue::resize(self, capacity)
    }
}

impl Fifo for Queue {
    fn front(&self) -> Option<Handle> {
        Queue::front(self)
    }

    fn back(&self) -> Option<Handle> {
        Queue::back(self)
    }

    fn push(&mut self, element: Handle) -> Result<(), ContainerError> {
        Queue::push(self, element)
    }

    fn pop(&mut self) -> Result<Handle, ContainerError> {
        Queue::pop(self)
    }
}
