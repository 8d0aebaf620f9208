//! Heap allocation counting for steady-state checks.
//!
//! With the `alloc-track` feature the crate installs `stats_alloc` as the global allocator and
//! [`count_allocations`] reports what a closure allocated. Without it every count is zero.
#![allow(dead_code)]

/// Heap activity observed while a closure ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct AllocCount {
    pub(crate) allocations: usize,
    pub(crate) reallocations: usize,
    pub(crate) bytes_allocated: usize,
}

#[cfg(feature = "alloc-track")]
mod imp {
    use super::AllocCount;
    use stats_alloc::{INSTRUMENTED_SYSTEM, Region, StatsAlloc};
    use std::alloc::System;

    #[global_allocator]
    static GLOBAL: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

    pub(crate) fn count_allocations<R>(f: impl FnOnce() -> R) -> (R, AllocCount) {
        let region = Region::new(GLOBAL);
        let out = f();
        let s = region.change();
        (
            out,
            AllocCount {
                allocations: s.allocations,
                reallocations: s.reallocations,
                bytes_allocated: s.bytes_allocated,
            },
        )
    }
}

#[cfg(not(feature = "alloc-track"))]
mod imp {
    use super::AllocCount;

    pub(crate) fn count_allocations<R>(f: impl FnOnce() -> R) -> (R, AllocCount) {
        (f(), AllocCount::default())
    }
}

pub(crate) use imp::count_allocations;
