//! Core types and traits for the stash handle containers.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every container in the workspace: the
//! opaque [`Handle`] element type, the [`ContainerError`] enum, the
//! [`GrowthConfig`] sizing parameters, and the container traits the
//! operation tables are built from.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod handle;
pub mod stats;
pub mod traits;

pub use config::GrowthConfig;
pub use error::ContainerError;
pub use handle::Handle;
pub use stats::ResizeStats;
pub use traits::{Container, Fifo, SlotSequence};
