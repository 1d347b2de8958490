//! Test fixtures for stash development.
//!
//! Provides handle constructors, proptest strategies for handles and
//! growth configurations, and a thread-local [`CountingAllocator`] for
//! leak checks in integration tests.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod alloc;
pub mod fixtures;

pub use alloc::{AllocCounts, CountingAllocator};
pub use fixtures::{arb_handle, arb_small_config, handle, handles, BoxedPayloads};
