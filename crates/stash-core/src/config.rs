//! Container growth parameters.

use crate::error::ContainerError;

/// Sizing parameters shared by the vector and queue.
///
/// Controls how many slots each resize adds, what a drained queue shrinks
/// back to, and an optional hard cap on capacity. Validated when a
/// container is constructed; containers keep their own copy and never
/// change it afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrowthConfig {
    /// Width of one element in bytes.
    ///
    /// Elements are always pointer-sized handles, so this only feeds the
    /// byte-oriented accounting (`growth_bytes`, `memory_bytes`).
    /// Default: `size_of::<usize>()`. Must be non-zero.
    pub element_width: u32,

    /// Slots added each time a vector runs out of room.
    ///
    /// Default: 128. Must be non-zero.
    pub vector_increment: usize,

    /// Slots added each time a queue runs out of room.
    ///
    /// Smaller than the vector increment: FIFO workloads favour frequent,
    /// cheap resizes. Default: 32. Must be at least 2 so a fresh queue can
    /// hold one element plus its reserved slot.
    pub queue_increment: usize,

    /// Capacity a fully drained queue is reclaimed down to.
    ///
    /// Default: 128. Must be at least 2.
    pub queue_reclaim: usize,

    /// Hard cap on the slot capacity of any container.
    ///
    /// Growth past the cap fails with
    /// [`ContainerError::CapacityExceeded`]. Default: `None` (unbounded).
    pub max_slots: Option<usize>,
}

impl GrowthConfig {
    /// Default vector growth increment in slots.
    pub const DEFAULT_VECTOR_INCREMENT: usize = 128;

    /// Default queue growth increment in slots.
    pub const DEFAULT_QUEUE_INCREMENT: usize = 32;

    /// Default capacity of a reclaimed (drained) queue.
    pub const DEFAULT_QUEUE_RECLAIM: usize = 128;

    /// Create a config for the given element width with default increments.
    pub fn new(element_width: u32) -> Self {
        Self {
            element_width,
            vector_increment: Self::DEFAULT_VECTOR_INCREMENT,
            queue_increment: Self::DEFAULT_QUEUE_INCREMENT,
            queue_reclaim: Self::DEFAULT_QUEUE_RECLAIM,
            max_slots: None,
        }
    }

    /// Set the vector growth increment.
    pub fn vector_increment(mut self, slots: usize) -> Self {
        self.vector_increment = slots;
        self
    }

    /// Set the queue growth increment.
    pub fn queue_increment(mut self, slots: usize) -> Self {
        self.queue_increment = slots;
        self
    }

    /// Set the drained-queue reclaim capacity.
    pub fn queue_reclaim(mut self, slots: usize) -> Self {
        self.queue_reclaim = slots;
        self
    }

    /// Cap the capacity of any container built from this config.
    pub fn max_slots(mut self, slots: usize) -> Self {
        self.max_slots = Some(slots);
        self
    }

    /// Check the structural constraints on every field.
    pub fn validate(&self) -> Result<(), ContainerError> {
        if self.element_width == 0 {
            return Err(ContainerError::InvalidConfig {
                reason: "element_width must be non-zero",
            });
        }
        if self.vector_increment == 0 {
            return Err(ContainerError::InvalidConfig {
                reason: "vector_increment must be non-zero",
            });
        }
        if self.queue_increment < 2 {
            return Err(ContainerError::InvalidConfig {
                reason: "queue_increment must be at least 2",
            });
        }
        if self.queue_reclaim < 2 {
            return Err(ContainerError::InvalidConfig {
                reason: "queue_reclaim must be at least 2",
            });
        }
        Ok(())
    }

    /// Byte size of `slots` elements.
    pub fn growth_bytes(&self, slots: usize) -> usize {
        slots.saturating_mul(self.element_width as usize)
    }

    /// Reject a target capacity above the configured cap.
    pub fn check_cap(&self, requested: usize) -> Result<(), ContainerError> {
        match self.max_slots {
            Some(limit) if requested > limit => {
                Err(ContainerError::CapacityExceeded { requested, limit })
            }
            _ => Ok(()),
        }
    }
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self::new(std::mem::size_of::<usize>() as u32)
    }
}
