//! Counting global allocator for leak checks.
//!
//! Install it in an integration test binary with
//! `#[global_allocator] static A: CountingAllocator = CountingAllocator;`
//! and compare [`CountingAllocator::current`] before and after the code
//! under test. Counts are per thread, so the test harness's own
//! allocations on other threads never show up in a measurement.

#![allow(unsafe_code)]

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

/// Allocation activity on one thread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocCounts {
    pub allocations: u64,
    pub deallocations: u64,
    pub reallocations: u64,
    pub bytes_allocated: u64,
    pub bytes_freed: u64,
}

impl AllocCounts {
    const ZERO: Self = Self {
        allocations: 0,
        deallocations: 0,
        reallocations: 0,
        bytes_allocated: 0,
        bytes_freed: 0,
    };

    /// Bytes allocated but not yet freed.
    pub fn live_bytes(&self) -> i64 {
        self.bytes_allocated as i64 - self.bytes_freed as i64
    }

    /// Activity between `earlier` and `self`.
    pub fn since(&self, earlier: AllocCounts) -> AllocCounts {
        AllocCounts {
            allocations: self.allocations - earlier.allocations,
            deallocations: self.deallocations - earlier.deallocations,
            reallocations: self.reallocations - earlier.reallocations,
            bytes_allocated: self.bytes_allocated - earlier.bytes_allocated,
            bytes_freed: self.bytes_freed - earlier.bytes_freed,
        }
    }

    /// Whether any allocator call happened.
    pub fn is_quiet(&self) -> bool {
        self.allocations == 0 && self.deallocations == 0 && self.reallocations == 0
    }
}

thread_local! {
    static COUNTS: Cell<AllocCounts> = const { Cell::new(AllocCounts::ZERO) };
}

fn record(update: impl FnOnce(&mut AllocCounts)) {
    // `try_with` fails during thread teardown; those calls go uncounted.
    let _ = COUNTS.try_with(|cell| {
        let mut counts = cell.get();
        update(&mut counts);
        cell.set(counts);
    });
}

/// A [`System`]-backed allocator that counts calls and bytes per thread.
pub struct CountingAllocator;

impl CountingAllocator {
    /// Counts for the calling thread since it started.
    pub fn current() -> AllocCounts {
        COUNTS.try_with(Cell::get).unwrap_or_default()
    }
}

// SAFETY: every method forwards to `System` with the caller's arguments
// unchanged; the counters are thread-local `Cell`s with a const
// initializer, so recording never allocates or re-enters the allocator.
unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: forwarded contract.
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record(|c| {
                c.allocations += 1;
                c.bytes_allocated += layout.size() as u64;
            });
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        // SAFETY: forwarded contract.
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record(|c| {
                c.allocations += 1;
                c.bytes_allocated += layout.size() as u64;
            });
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: forwarded contract.
        unsafe { System.dealloc(ptr, layout) };
        record(|c| {
            c.deallocations += 1;
            c.bytes_freed += layout.size() as u64;
        });
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: forwarded contract.
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            record(|c| {
                c.reallocations += 1;
                c.bytes_freed += layout.size() as u64;
                c.bytes_allocated += new_size as u64;
            });
        }
        new_ptr
    }
}
