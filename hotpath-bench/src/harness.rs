// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark harness for timing kernel calls.
//!
//! One timed pass per workload per mode: no warmup, no repetitions. Between
//! the two clock reads only the loop counter, the kernel call and the
//! checksum update execute. Logging happens after the second clock read.

use std::hint::black_box;

use hotpath_core::kernels::FAST_SUM8_ARGS;
use hotpath_core::{BenchPlan, Clock, ForeignKernels, Kernels, MonotonicClock, NativeKernels, Workload};

use crate::metrics::{BenchmarkResult, WorkloadOutcome};

/// Drives the fixed-iteration timing loops of a [`BenchPlan`].
pub struct BenchmarkHarness<C: Clock = MonotonicClock> {
    plan: BenchPlan,
    clock: C,
}

impl BenchmarkHarness {
    /// Create a harness using the monotonic clock.
    pub fn new(plan: BenchPlan) -> Self {
        Self {
            plan,
            clock: MonotonicClock,
        }
    }
}

impl Default for BenchmarkHarness {
    fn default() -> Self {
        Self::new(BenchPlan::default())
    }
}

impl<C: Clock> BenchmarkHarness<C> {
    /// Create a harness with a custom clock.
    pub fn with_clock(plan: BenchPlan, clock: C) -> Self {
        Self { plan, clock }
    }

    /// Time `fast_sum8` calls with the fixed inputs `1..=8`.
    pub fn run_fast_sum8<K: Kernels + ?Sized>(&self, kernels: &K) -> BenchmarkResult {
        let calls = self.plan.fast_sum8_calls;
        let [a, b, c, d, e, f, g, h] = FAST_SUM8_ARGS;
        let mut checksum: u64 = 0;

        let start = self.clock.now();
        for _ in 0..calls.get() {
            let out = kernels.fast_sum8(
                black_box(a),
                black_box(b),
                black_box(c),
                black_box(d),
                black_box(e),
                black_box(f),
                black_box(g),
                black_box(h),
            );
            checksum = checksum.wrapping_add(black_box(out) as u64);
        }
        let end = self.clock.now();

        let result = BenchmarkResult::new(
            Workload::FastSum8,
            kernels.mode(),
            calls,
            self.clock.elapsed(start, end),
            black_box(checksum),
        );
        tracing::debug!(
            mode = %result.mode,
            calls = calls.get(),
            elapsed_ns = result.elapsed_ns,
            per_call_ns = result.per_call_ns,
            "fast_sum8 timed"
        );
        result
    }

    /// Time `slow_compute` calls; call `i` uses seed `i`.
    pub fn run_slow_compute<K: Kernels + ?Sized>(&self, kernels: &K) -> BenchmarkResult {
        let calls = self.plan.slow_compute_calls;
        let inner = self.plan.slow_compute_inner.get();
        let mut checksum: u64 = 0;

        let start = self.clock.now();
        for seed in 0..calls.get() {
            let out = kernels.slow_compute(black_box(seed), black_box(inner));
            checksum = checksum.wrapping_add(black_box(out));
        }
        let end = self.clock.now();

        let result = BenchmarkResult::new(
            Workload::SlowCompute,
            kernels.mode(),
            calls,
            self.clock.elapsed(start, end),
            black_box(checksum),
        );
        tracing::debug!(
            mode = %result.mode,
            calls = calls.get(),
            inner_iterations = inner,
            elapsed_ns = result.elapsed_ns,
            per_call_ns = result.per_call_ns,
            "slow_compute timed"
        );
        result
    }

    /// Time one workload.
    pub fn run_workload<K: Kernels + ?Sized>(&self, workload: Workload, kernels: &K) -> BenchmarkResult {
        match workload {
            Workload::FastSum8 => self.run_fast_sum8(kernels),
            Workload::SlowCompute => self.run_slow_compute(kernels),
        }
    }

    /// Run one workload natively, and against `foreign` when present.
    ///
    /// A foreign run whose checksum differs from the native one is kept in
    /// the outcome but logged as an error; its comparison carries no verdict.
    pub fn run_outcome<F: Kernels + ?Sized>(&self, workload: Workload, foreign: Option<&F>) -> WorkloadOutcome {
        let native = self.run_workload(workload, &NativeKernels);
        let foreign = foreign.map(|kernels| self.run_workload(workload, kernels));

        if let Some(foreign) = &foreign {
            if foreign.checksum != native.checksum {
                tracing::error!(
                    %workload,
                    native_checksum = format_args!("{:#018x}", native.checksum),
                    foreign_checksum = format_args!("{:#018x}", foreign.checksum),
                    "foreign kernel results differ from native, comparison is invalid"
                );
            }
        }

        WorkloadOutcome {
            workload,
            inner_iterations: match workload {
                Workload::FastSum8 => None,
                Workload::SlowCompute => Some(self.plan.slow_compute_inner),
            },
            native,
            foreign,
        }
    }

    /// Run every workload natively, and against `foreign` when present.
    pub fn run_suite(&self, foreign: Option<&ForeignKernels>) -> Vec<WorkloadOutcome> {
        Workload::ALL
            .iter()
            .map(|&workload| self.run_outcome(workload, foreign))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotpath_core::kernels::FAST_SUM8_EXPECTED;
    use hotpath_core::probe::verify_conformance;
    use hotpath_core::{IterationCount, Mode};
    use std::cell::Cell;
    use std::time::Duration;

    /// Advances by a fixed step on every read.
    struct SteppingClock {
        ticks: Cell<u64>,
        step_ns: u64,
    }

    impl Clock for SteppingClock {
        type Instant = u64;

        fn now(&self) -> u64 {
            let t = self.ticks.get();
            self.ticks.set(t + self.step_ns);
            t
        }

        fn elapsed(&self, start: u64, end: u64) -> Duration {
            Duration::from_nanos(end.saturating_sub(start))
        }
    }

    /// Agrees with the native kernels up to 1000 rounds, then stops mixing.
    struct CappedRoundsKernels;

    impl Kernels for CappedRoundsKernels {
        fn mode(&self) -> Mode {
            Mode::Foreign
        }

        fn fast_sum8(&self, a: i64, b: i64, c: i64, d: i64, e: i64, f: i64, g: i64, h: i64) -> i64 {
            hotpath_core::kernels::fast_sum8(a, b, c, d, e, f, g, h)
        }

        fn slow_compute(&self, seed: u64, iterations: u64) -> u64 {
            hotpath_core::kernels::slow_compute(seed, iterations.min(1_000))
        }
    }

    fn small_plan() -> BenchPlan {
        BenchPlan {
            fast_sum8_calls: IterationCount::new(1_000).unwrap(),
            slow_compute_calls: IterationCount::new(4).unwrap(),
            slow_compute_inner: IterationCount::new(16).unwrap(),
        }
    }

    #[test]
    fn test_fast_sum8_every_call_returns_36() {
        let harness = BenchmarkHarness::new(small_plan());
        let result = harness.run_fast_sum8(&NativeKernels);

        assert_eq!(result.workload, Workload::FastSum8);
        assert_eq!(result.mode, Mode::Native);
        assert_eq!(result.iterations.get(), 1_000);
        assert_eq!(result.checksum, FAST_SUM8_EXPECTED as u64 * 1_000);
    }

    #[test]
    fn test_slow_compute_checksum_covers_all_seeds() {
        let harness = BenchmarkHarness::new(small_plan());
        let result = harness.run_slow_compute(&NativeKernels);

        let expected = (0..4u64)
            .map(|seed| hotpath_core::kernels::slow_compute(seed, 16))
            .fold(0u64, u64::wrapping_add);
        assert_eq!(result.checksum, expected);
        assert_eq!(result.iterations.get(), 4);
    }

    #[test]
    fn test_per_call_derived_from_clock() {
        let clock = SteppingClock {
            ticks: Cell::new(0),
            step_ns: 2_000_000,
        };
        let harness = BenchmarkHarness::with_clock(small_plan(), clock);

        let result = harness.run_slow_compute(&NativeKernels);
        assert_eq!(result.elapsed_ns, 2_000_000);
        assert!((result.per_call_ns - 500_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_real_clock_positive_cost() {
        let harness = BenchmarkHarness::new(small_plan());
        for workload in Workload::ALL {
            let result = harness.run_workload(workload, &NativeKernels);
            assert!(result.per_call_ns > 0.0, "{workload} per-call cost was zero");
        }
    }

    #[test]
    fn test_suite_without_foreign_is_native_only() {
        let harness = BenchmarkHarness::new(small_plan());
        let outcomes = harness.run_suite(None);

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].workload, Workload::FastSum8);
        assert_eq!(outcomes[1].workload, Workload::SlowCompute);
        assert_eq!(outcomes[1].inner_iterations.map(|c| c.get()), Some(16));
        for outcome in &outcomes {
            assert_eq!(outcome.native.mode, Mode::Native);
            assert!(outcome.foreign.is_none());
            assert!(outcome.comparison().is_none());
        }
    }

    #[test]
    fn test_diverging_foreign_results_have_no_verdict() {
        // Short conformance vectors cannot tell this module apart.
        assert!(verify_conformance(&CappedRoundsKernels).is_ok());

        let plan = BenchPlan {
            slow_compute_inner: IterationCount::new(2_000).unwrap(),
            ..small_plan()
        };
        let harness = BenchmarkHarness::new(plan);

        let slow = harness.run_outcome(Workload::SlowCompute, Some(&CappedRoundsKernels));
        let foreign = slow.foreign.as_ref().unwrap();
        assert_ne!(foreign.checksum, slow.native.checksum);
        let cmp = slow.comparison().unwrap();
        assert!(!cmp.results_match);
        assert_eq!(cmp.verdict(), None);

        // fast_sum8 is unaffected and still gets a verdict.
        let fast = harness.run_outcome(Workload::FastSum8, Some(&CappedRoundsKernels));
        let cmp = fast.comparison().unwrap();
        assert!(cmp.results_match);
        assert!(cmp.verdict().is_some());
    }
}
