//! Growable ring-buffer queue of opaque handles.
//!
//! [`Queue`] stores [`Handle`](stash_core::Handle)s in a circular buffer
//! with one reserved slot separating `rear` from `front`:
//!
//! ```text
//!   front         rear
//!     v             v
//! [ . A B C D E F . . ]      unwrapped
//!
//!       rear    front
//!         v       v
//! [ E F . . . . . A B C D ]  wrapped: head [0, rear), tail [front, cap)
//! ```
//!
//! Growth adds a fixed number of slots and, for a wrapped buffer, moves the
//! shorter segment so every push and pop stays O(1) amortized. A fully
//! drained queue rewinds to slot 0 and gives back memory above its reclaim
//! threshold.
//!
//! ```
//! use std::num::NonZeroUsize;
//! use stash_core::Handle;
//! use stash_queue::Queue;
//!
//! let mut q = Queue::new(8).unwrap();
//! for n in 1..=3 {
//!     q.push(Handle::from_addr(NonZeroUsize::new(n).unwrap())).unwrap();
//! }
//! assert_eq!(q.pop().unwrap().addr(), 1);
//! assert_eq!(q.len(), 2);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod iter;
pub mod queue;

pub use iter::QueueIter;
pub use queue::Queue;
