//! Static operation tables.
//!
//! Each container kind has one process-wide table of function pointers,
//! built at compile time from its trait implementation. Code that picks a
//! container kind at runtime can hold a `&'static` table and call through
//! it without generics or trait objects.
//!
//! Tables are plain `static` items and are never mutated.

use stash_core::{Container, ContainerError, Fifo, Handle, SlotSequence};
use stash_queue::Queue;
use stash_vector::Vector;

/// Function-pointer table for an indexed sequence with tombstone erase.
///
/// Field names follow the container operations one-to-one; `empty` and
/// `size` map to [`Container::is_empty`] and [`Container::length`].
pub struct SequenceTable<S> {
    /// Whether the sequence has no live elements.
    pub empty: fn(&S) -> bool,
    /// Set the slot capacity explicitly.
    pub resize: fn(&mut S, usize) -> Result<(), ContainerError>,
    /// High-water mark, tombstones included.
    pub size: fn(&S) -> usize,
    /// Raw slot content at an index.
    pub at: fn(&S, usize) -> Result<Option<Handle>, ContainerError>,
    /// First live element.
    pub front: fn(&S) -> Option<Handle>,
    /// Last live element.
    pub back: fn(&S) -> Option<Handle>,
    /// Append after the high-water mark.
    pub push_back: fn(&mut S, Handle) -> Result<(), ContainerError>,
    /// Remove the last slot.
    pub pop_back: fn(&mut S) -> Result<Option<Handle>, ContainerError>,
    /// Tombstone the slot at an index.
    pub erase: fn(&mut S, usize) -> Result<(), ContainerError>,
    /// Drop every element, keeping the allocation.
    pub clear: fn(&mut S),
}

impl<S: SlotSequence> SequenceTable<S> {
    /// Build the table from `S`'s [`SlotSequence`] implementation.
    pub const fn new() -> Self {
        Self {
            empty: <S as Container>::is_empty,
            resize: <S as Container>::resize,
            size: <S as Container>::length,
            at: <S as SlotSequence>::at,
            front: <S as SlotSequence>::front,
            back: <S as SlotSequence>::back,
            push_back: <S as SlotSequence>::push_back,
            pop_back: <S as SlotSequence>::pop_back,
            erase: <S as SlotSequence>::erase,
            clear: <S as SlotSequence>::clear,
        }
    }
}

impl<S: SlotSequence> Default for SequenceTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Function-pointer table for a first-in, first-out queue.
pub struct FifoTable<Q> {
    /// Whether the queue is empty.
    pub empty: fn(&Q) -> bool,
    /// Set the slot capacity explicitly.
    pub resize: fn(&mut Q, usize) -> Result<(), ContainerError>,
    /// Number of queued elements.
    pub size: fn(&Q) -> usize,
    /// Oldest element.
    pub front: fn(&Q) -> Option<Handle>,
    /// Newest element.
    pub back: fn(&Q) -> Option<Handle>,
    /// Enqueue at the back.
    pub push: fn(&mut Q, Handle) -> Result<(), ContainerError>,
    /// Dequeue the oldest element.
    pub pop: fn(&mut Q) -> Result<Handle, ContainerError>,
}

impl<Q: Fifo> FifoTable<Q> {
    /// Build the table from `Q`'s [`Fifo`] implementation.
    pub const fn new() -> Self {
        Self {
            empty: <Q as Container>::is_empty,
            resize: <Q as Container>::resize,
            size: <Q as Container>::length,
            front: <Q as Fifo>::front,
            back: <Q as Fifo>::back,
            push: <Q as Fifo>::push,
            pop: <Q as Fifo>::pop,
        }
    }
}

impl<Q: Fifo> Default for FifoTable<Q> {
    fn default() -> Self {
        Self::new()
    }
}

/// Operations for [`Vector`].
pub static VECTOR_OPS: SequenceTable<Vector> = SequenceTable::new();

/// Operations for [`Queue`].
pub static QUEUE_OPS: FifoTable<Queue> = FifoTable::new();

/// Resolve a container type to its static operation table.
pub trait Dispatch: Sized {
    /// The table type for this container kind.
    type Table: 'static;

    /// The process-wide table.
    fn ops() -> &'static Self::Table;
}

impl Dispatch for Vector {
    type Table = SequenceTable<Vector>;

    fn ops() -> &'static Self::Table {
        &VECTOR_OPS
    }
}

impl Dispatch for Queue {
    type Table = FifoTable<Queue>;

    fn ops() -> &'static Self::Table {
        &QUEUE_OPS
    }
}
