//! Benchmark workloads for the stash containers.
//!
//! Workloads are generated from a seeded [`ChaCha8Rng`] so every run of a
//! benchmark replays the same operation sequence:
//!
//! - [`vector_workload`]: mixed push / pop / erase traffic for a `Vector`
//! - [`queue_workload`]: push-biased traffic for a `Queue`
//! - [`run_vector`] / [`run_queue`]: apply a workload and return the container

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::num::NonZeroUsize;

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stash::prelude::*;

/// One vector operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VectorOp {
    /// Append a handle.
    Push(Handle),
    /// Remove the last slot.
    Pop,
    /// Tombstone a slot; the index is reduced modulo the current length.
    Erase(usize),
}

/// One queue operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueOp {
    /// Enqueue a handle.
    Push(Handle),
    /// Dequeue the oldest handle.
    Pop,
}

fn tag(rng: &mut ChaCha8Rng) -> Handle {
    let addr = NonZeroUsize::new(rng.next_u64() as usize).unwrap_or(NonZeroUsize::MIN);
    Handle::from_addr(addr)
}

/// Generate `len` vector operations: 70% push, 15% pop, 15% erase.
pub fn vector_workload(seed: u64, len: usize) -> Vec<VectorOp> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| match rng.next_u32() % 100 {
            0..70 => VectorOp::Push(tag(&mut rng)),
            70..85 => VectorOp::Pop,
            _ => VectorOp::Erase(rng.next_u32() as usize),
        })
        .collect()
}

/// Generate `len` queue operations, pushing with probability
/// `push_percent / 100`.
///
/// A bias above 50 grows the queue over time; exactly 50 keeps it near a
/// steady depth and keeps the ring wrapping.
pub fn queue_workload(seed: u64, len: usize, push_percent: u32) -> Vec<QueueOp> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            if rng.next_u32() % 100 < push_percent {
                QueueOp::Push(tag(&mut rng))
            } else {
                QueueOp::Pop
            }
        })
        .collect()
}

/// Apply `ops` to a fresh vector.
///
/// Pops on an empty vector and erases of vacant slots are expected in a
/// random workload and are skipped.
pub fn run_vector(config: GrowthConfig, ops: &[VectorOp]) -> Result<Vector, ContainerError> {
    let mut v = Vector::with_config(config)?;
    for op in ops {
        match *op {
            VectorOp::Push(h) => v.push_back(h)?,
            VectorOp::Pop => {
                let _ = v.pop_back();
            }
            VectorOp::Erase(i) => {
                if !v.is_empty() {
                    let _ = v.erase(i % v.len());
                }
            }
        }
    }
    Ok(v)
}

/// Apply `ops` to a fresh queue, skipping pops on an empty queue.
pub fn run_queue(config: GrowthConfig, ops: &[QueueOp]) -> Result<Queue, ContainerError> {
    let mut q = Queue::with_config(config)?;
    for op in ops {
        match *op {
            QueueOp::Push(h) => q.push(h)?,
            QueueOp::Pop => {
                let _ = q.pop();
            }
        }
    }
    Ok(q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workloads_are_deterministic() {
        assert_eq!(vector_workload(7, 500), vector_workload(7, 500));
        assert_ne!(vector_workload(7, 500), vector_workload(8, 500));
        assert_eq!(queue_workload(7, 500, 60), queue_workload(7, 500, 60));
    }

    #[test]
    fn vector_mix_is_roughly_as_configured() {
        let ops = vector_workload(42, 10_000);
        let pushes = ops.iter().filter(|op| matches!(op, VectorOp::Push(_))).count();
        assert!((6_500..7_500).contains(&pushes), "pushes = {pushes}");
    }

    #[test]
    fn runs_complete_and_keep_invariants() {
        let v = run_vector(GrowthConfig::default(), &vector_workload(1, 5_000)).unwrap();
        assert!(v.used() <= v.len() && v.len() <= v.capacity());

        let ops = queue_workload(1, 5_000, 50);
        let pushes = ops.iter().filter(|op| matches!(op, QueueOp::Push(_))).count();
        let q = run_queue(GrowthConfig::default(), &ops).unwrap();
        assert!(q.len() <= pushes);
        assert!(q.len() < q.capacity() || q.capacity() == 0);
    }
}
