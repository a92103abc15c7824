// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Monotonic time source for bounding measurement intervals.
//!
//! The harness is generic over [`Clock`] so tests can substitute a
//! deterministic clock. Production code uses [`MonotonicClock`], which is
//! backed by `std::time::Instant` and never observes wall-clock adjustments.

use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock {
    /// Opaque timestamp type.
    type Instant: Copy;

    /// Current timestamp. Never decreases between calls.
    fn now(&self) -> Self::Instant;

    /// Non-negative duration between two timestamps.
    fn elapsed(&self, start: Self::Instant, end: Self::Instant) -> Duration;
}

/// Steady clock backed by `std::time::Instant`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    type Instant = Instant;

    #[inline(always)]
    fn now(&self) -> Instant {
        Instant::now()
    }

    #[inline]
    fn elapsed(&self, start: Instant, end: Instant) -> Duration {
        end.saturating_duration_since(start)
    }
}

/// Measure the execution time of a closure.
pub fn measure<F, T>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    (result, elapsed)
}
