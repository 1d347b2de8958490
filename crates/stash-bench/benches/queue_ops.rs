//! Criterion micro-benchmarks for queue push/pop and wraparound growth.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use stash::prelude::*;
use stash_bench::{queue_workload, run_queue};
use stash_test_utils::handles;

fn bench_fill_drain_10k(c: &mut Criterion) {
    let input = handles(1..=10_000);
    c.bench_function("queue_fill_drain_10k", |b| {
        b.iter(|| {
            let mut q = Queue::default();
            for &h in &input {
                q.push(h).unwrap();
            }
            while let Ok(h) = q.pop() {
                black_box(h);
            }
            black_box(q.capacity())
        });
    });
}

/// Keep the queue at a fixed depth so every push wraps the ring.
fn bench_steady_state(c: &mut Criterion) {
    let mut q = Queue::default();
    for h in handles(1..=16) {
        q.push(h).unwrap();
    }
    let input = handles(17..=10_016);
    c.bench_function("queue_steady_state_10k", |b| {
        b.iter(|| {
            for &h in &input {
                q.push(h).unwrap();
                black_box(q.pop().unwrap());
            }
        });
    });
}

/// Growth while wrapped, with the smallest increment so relocation runs
/// on nearly every grow.
fn bench_wrapped_growth(c: &mut Criterion) {
    let ops = queue_workload(7, 10_000, 60);
    let config = GrowthConfig::default().queue_increment(2);
    c.bench_function("queue_wrapped_growth_10k", |b| {
        b.iter(|| {
            let q = run_queue(config.clone(), black_box(&ops)).unwrap();
            black_box(q.stats().relocated_slots)
        });
    });
}

criterion_group!(
    benches,
    bench_fill_drain_10k,
    bench_steady_state,
    bench_wrapped_growth
);
criterion_main!(benches);
