//! Stash: containers of opaque, pointer-sized handles.
//!
//! This is the facade crate that re-exports the public API from the stash
//! sub-crates and adds the static operation tables. For most users, adding
//! `stash` as a single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::num::NonZeroUsize;
//! use stash::prelude::*;
//!
//! let h = |n| Handle::from_addr(NonZeroUsize::new(n).unwrap());
//!
//! let mut v = Vector::new(8).unwrap();
//! for n in 1..=200 {
//!     v.push_back(h(n)).unwrap();
//! }
//! v.erase(0).unwrap();
//! assert_eq!(v.front(), Some(h(2)));
//! assert_eq!(v.stats().grows, 2);
//!
//! let mut q = Queue::new(8).unwrap();
//! q.push(h(1)).unwrap();
//! q.push(h(2)).unwrap();
//! assert_eq!(q.pop().unwrap(), h(1));
//!
//! // Same operations through the static tables.
//! let ops = Queue::ops();
//! assert_eq!((ops.size)(&q), 1);
//! assert_eq!((ops.front)(&q), Some(h(2)));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `stash-core` | `Handle`, `GrowthConfig`, errors, container traits |
//! | [`vector`] | `stash-vector` | `Vector`, its occupancy `Bitmap`, live iteration |
//! | [`queue`] | `stash-queue` | `Queue` and FIFO iteration |
//! | [`ops`] | this crate | `VECTOR_OPS`, `QUEUE_OPS` and the `Dispatch` trait |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod ops;

/// Handles, growth configuration, errors and container traits
/// (`stash-core`).
pub use stash_core as types;

/// Bitmap-backed vector with tombstone erase (`stash-vector`).
///
/// [`vector::Vector`] keeps indices stable across
/// [`erase`](vector::Vector::erase); [`vector::LiveIter`] skips
/// tombstones.
pub use stash_vector as vector;

/// Growable ring-buffer queue (`stash-queue`).
pub use stash_queue as queue;

/// Common imports for typical stash usage.
///
/// ```rust
/// use stash::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use stash_core::{
        Container, ContainerError, Fifo, GrowthConfig, Handle, ResizeStats, SlotSequence,
    };

    // Containers
    pub use stash_queue::Queue;
    pub use stash_vector::Vector;

    // Dispatch
    pub use crate::ops::{Dispatch, FifoTable, SequenceTable, QUEUE_OPS, VECTOR_OPS};
}
