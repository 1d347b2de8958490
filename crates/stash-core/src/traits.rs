//! Container abstraction traits.
//!
//! Every container kind implements [`Container`] plus one access trait.
//! The operation tables in the `stash` facade are built from these traits
//! at compile time, so dispatch never needs per-instance vtable storage.

use crate::error::ContainerError;
use crate::handle::Handle;

/// Operations shared by every container kind.
pub trait Container {
    /// Whether the container holds no live elements.
    fn is_empty(&self) -> bool;

    /// The container's length as defined by its kind.
    ///
    /// For a [`SlotSequence`] this is the high-water mark, which may
    /// include erased slots; for a [`Fifo`] it is the element count.
    fn length(&self) -> usize;

    /// Allocated slot capacity.
    fn capacity(&self) -> usize;

    /// Set the slot capacity explicitly.
    ///
    /// Fails without side effects if the contents need more room or the
    /// allocation is refused.
    fn resize(&mut self, capacity: usize) -> Result<(), ContainerError>;
}

/// An indexed sequence with tombstone deletion.
pub trait SlotSequence: Container {
    /// Raw slot content at `index`, without checking occupancy.
    fn at(&self, index: usize) -> Result<Option<Handle>, ContainerError>;

    /// First live element, scanning upward.
    fn front(&self) -> Option<Handle>;

    /// Last live element, scanning downward.
    fn back(&self) -> Option<Handle>;

    /// Append `element` after the high-water mark.
    fn push_back(&mut self, element: Handle) -> Result<(), ContainerError>;

    /// Remove the last slot, returning its element if it was live.
    fn pop_back(&mut self) -> Result<Option<Handle>, ContainerError>;

    /// Mark the slot at `index` as deleted without shifting anything.
    fn erase(&mut self, index: usize) -> Result<(), ContainerError>;

    /// Drop every element, keeping the allocation.
    fn clear(&mut self);
}

/// A first-in, first-out queue.
pub trait Fifo: Container {
    /// Oldest element.
    fn front(&self) -> Option<Handle>;

    /// Newest element.
    fn back(&self) -> Option<Handle>;

    /// Enqueue `element` at the back.
    fn push(&mut self, element: Handle) -> Result<(), ContainerError>;

    /// Dequeue the oldest element.
    fn pop(&mut self) -> Result<Handle, ContainerError>;
}
