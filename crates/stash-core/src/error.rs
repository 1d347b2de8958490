//! Container error types.
//!
//! Two failure kinds exist: allocation failures while growing, which
//! always leave the container in its prior state, and misuse (operating
//! on an empty container or out of range), which would be undefined
//! behaviour in a raw implementation and is reported here instead.

use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;

/// Errors returned by container operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerError {
    /// The allocator refused to provide the backing storage.
    AllocationFailed {
        /// Total slot capacity that was being requested.
        requested_slots: usize,
    },
    /// Growth would exceed the configured `max_slots` cap.
    CapacityExceeded {
        /// Total slot capacity that was being requested.
        requested: usize,
        /// The configured cap.
        limit: usize,
    },
    /// The operation needs at least one element.
    Empty,
    /// An index at or beyond the container's length.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The container length at the time of the call.
        len: usize,
    },
    /// The slot at `index` holds no live element (already erased).
    SlotVacant {
        /// The vacant slot.
        index: usize,
    },
    /// An explicit resize below what the current contents need.
    ShrinkBelowLength {
        /// The requested capacity.
        requested: usize,
        /// The minimum capacity the contents require.
        len: usize,
    },
    /// A [`GrowthConfig`](crate::GrowthConfig) failed validation.
    InvalidConfig {
        /// Which constraint was violated.
        reason: &'static str,
    },
}

impl ContainerError {
    /// Whether this error came from growing the backing storage.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(
            self,
            Self::AllocationFailed { .. } | Self::CapacityExceeded { .. }
        )
    }

    /// Map a failed `try_reserve` into an allocation error.
    pub fn from_reserve(requested_slots: usize, _err: TryReserveError) -> Self {
        Self::AllocationFailed { requested_slots }
    }
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { requested_slots } => {
                write!(f, "allocation failed growing to {requested_slots} slots")
            }
            Self::CapacityExceeded { requested, limit } => {
                write!(
                    f,
                    "capacity exceeded: requested {requested} slots, limit {limit} slots"
                )
            }
            Self::Empty => write!(f, "container is empty"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::SlotVacant { index } => write!(f, "slot {index} holds no live element"),
            Self::ShrinkBelowLength { requested, len } => {
                write!(
                    f,
                    "cannot resize to {requested} slots: contents need at least {len}"
                )
            }
            Self::InvalidConfig { reason } => write!(f, "invalid growth config: {reason}"),
        }
    }
}

impl Error for ContainerError {}
