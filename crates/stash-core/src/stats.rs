//! Resize counters.

/// Counts of backing-buffer resizes performed by one container.
///
/// Containers have no logging; these counters are how callers and tests
/// observe growth behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeStats {
    /// Upward resizes.
    pub grows: u64,
    /// Downward resizes (hysteresis shrink or drained-queue reclaim).
    pub shrinks: u64,
    /// Slots moved by queue unwrap relocation. Always zero for vectors.
    pub relocated_slots: u64,
}

impl ResizeStats {
    /// Total resizes in either direction.
    pub fn resizes(&self) -> u64 {
        self.grows + self.shrinks
    }
}
