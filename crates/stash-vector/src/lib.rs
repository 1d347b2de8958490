//! Bitmap-backed vector of opaque handles.
//!
//! [`Vector`] stores pointer-sized [`Handle`](stash_core::Handle)s in a
//! growable slot buffer and tracks occupancy in a packed [`Bitmap`]:
//!
//! ```text
//! Vector
//! ├── slots: Vec<Option<Handle>>   (capacity slots, grown by a fixed increment)
//! └── Bitmap (SmallVec<[u64; 2]>)  (bit i set ⇔ slot i live)
//! ```
//!
//! `erase` clears a bit instead of compacting, so indices stay stable and
//! deletion is O(1). Scans and [`LiveIter`] skip cleared bits a word at a
//! time.
//!
//! # Example
//!
//! ```rust
//! use std::num::NonZeroUsize;
//! use stash_core::Handle;
//! use stash_vector::Vector;
//!
//! let h = |n| Handle::from_addr(NonZeroUsize::new(n).unwrap());
//! let mut v = Vector::new(8).unwrap();
//! v.push_back(h(1)).unwrap();
//! v.push_back(h(2)).unwrap();
//! v.push_back(h(3)).unwrap();
//!
//! v.erase(0).unwrap();
//! assert_eq!(v.len(), 3);
//! assert_eq!(v.used(), 2);
//! assert_eq!(v.front(), Some(h(2)));
//! assert_eq!(v.handles().count(), 2);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bitmap;
pub mod iter;
pub mod vector;

pub use bitmap::Bitmap;
pub use iter::LiveIter;
pub use vector::Vector;
