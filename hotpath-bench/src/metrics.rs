// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Result types for native vs foreign runs.
//!
//! This module defines the data structures used to capture and serialize
//! benchmark measurements.

use std::time::Duration;

use chrono::{DateTime, Utc};
use hotpath_core::{IterationCount, Mode, Workload};
use serde::{Deserialize, Serialize};
use sysinfo::System;

/// One timed loop of one workload on one side of the FFI boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Workload that was timed
    pub workload: Workload,
    /// Native or foreign kernels
    pub mode: Mode,
    /// Number of timed (outer) calls
    pub iterations: IterationCount,
    /// Total elapsed time of the timed loop in nanoseconds
    pub elapsed_ns: u64,
    /// `elapsed_ns / iterations`, kept fractional
    pub per_call_ns: f64,
    /// Wrapping sum of every kernel output in the loop
    pub checksum: u64,
}

impl BenchmarkResult {
    /// Derive a result from a finished timed loop.
    pub fn new(
        workload: Workload,
        mode: Mode,
        iterations: IterationCount,
        elapsed: Duration,
        checksum: u64,
    ) -> Self {
        let elapsed_ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        Self {
            workload,
            mode,
            iterations,
            elapsed_ns,
            per_call_ns: elapsed_ns as f64 / iterations.get() as f64,
            checksum,
        }
    }

    /// Total elapsed time in milliseconds.
    pub fn total_ms(&self) -> f64 {
        self.elapsed_ns as f64 / 1_000_000.0
    }

    /// Per-call cost in the workload's reporting unit.
    pub fn per_call_in_unit(&self) -> f64 {
        self.workload.per_call_unit().from_nanos(self.per_call_ns)
    }
}

/// Native vs foreign verdict for one workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub native: BenchmarkResult,
    pub foreign: BenchmarkResult,
    /// `native.per_call_ns / foreign.per_call_ns`; above 1.0 means FFI is faster.
    /// `None` when the foreign run measured no time at all.
    pub speedup_ratio: Option<f64>,
    /// Mode with the smaller per-call cost
    pub winner: Mode,
    /// Both loops produced the same checksum. When false the timings
    /// compare different computations and carry no verdict.
    pub results_match: bool,
}

impl ComparisonResult {
    /// Compare two runs of the same workload.
    pub fn new(native: BenchmarkResult, foreign: BenchmarkResult) -> Self {
        debug_assert_eq!(native.workload, foreign.workload);
        let speedup_ratio =
            (foreign.per_call_ns > 0.0).then(|| native.per_call_ns / foreign.per_call_ns);
        // Native has to be strictly cheaper to win.
        let winner = if native.per_call_ns < foreign.per_call_ns {
            Mode::Native
        } else {
            Mode::Foreign
        };
        let results_match = native.checksum == foreign.checksum;
        Self {
            native,
            foreign,
            speedup_ratio,
            winner,
            results_match,
        }
    }

    /// Winner, or `None` when the two runs disagree on their results.
    pub fn verdict(&self) -> Option<Mode> {
        self.results_match.then_some(self.winner)
    }
}

/// Both runs (or just the native one) for a single workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadOutcome {
    pub workload: Workload,
    /// Mixing rounds per call (`slow_compute` only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_iterations: Option<IterationCount>,
    pub native: BenchmarkResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign: Option<BenchmarkResult>,
}

impl WorkloadOutcome {
    /// Comparison, present only when the foreign run exists.
    pub fn comparison(&self) -> Option<ComparisonResult> {
        self.foreign
            .as_ref()
            .map(|foreign| ComparisonResult::new(self.native.clone(), foreign.clone()))
    }
}

/// System information captured at benchmark time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name
    pub os: String,
    /// OS version
    pub os_version: String,
    /// Kernel version (Linux)
    pub kernel_version: Option<String>,
    /// CPU model name
    pub cpu_model: String,
    /// Number of CPU cores
    pub cpu_cores: usize,
    /// Hostname
    pub hostname: String,
}

impl SystemInfo {
    /// Collect current system information.
    pub fn collect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu();

        Self {
            os: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version(),
            cpu_model: sys
                .cpus()
                .first()
                .map(|cpu| cpu.brand().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            cpu_cores: sys.cpus().len(),
            hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Complete record of one benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Suite identifier ("ffi-bench", "native-bench", ...)
    pub benchmark_suite: String,
    /// Crate version
    pub version: String,
    /// Timestamp when benchmarks were run
    pub timestamp: DateTime<Utc>,
    /// System information
    pub system_info: SystemInfo,
    /// Foreign library the comparative runs used, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_library: Option<String>,
    /// Per-workload outcomes in run order
    pub outcomes: Vec<WorkloadOutcome>,
}

impl SuiteReport {
    /// Wrap outcomes with run metadata.
    pub fn new(
        suite: impl Into<String>,
        foreign_library: Option<String>,
        outcomes: Vec<WorkloadOutcome>,
    ) -> Self {
        Self {
            benchmark_suite: suite.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            system_info: SystemInfo::collect(),
            foreign_library,
            outcomes,
        }
    }

    /// Whether any workload has a foreign run.
    pub fn has_foreign(&self) -> bool {
        self.outcomes.iter().any(|o| o.foreign.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(mode: Mode, elapsed_ns: u64, iterations: u64) -> BenchmarkResult {
        checked_result(mode, elapsed_ns, iterations, 36 * iterations)
    }

    fn checked_result(mode: Mode, elapsed_ns: u64, iterations: u64, checksum: u64) -> BenchmarkResult {
        BenchmarkResult::new(
            Workload::FastSum8,
            mode,
            IterationCount::new(iterations).unwrap(),
            Duration::from_nanos(elapsed_ns),
            checksum,
        )
    }

    #[test]
    fn test_per_call_is_fractional() {
        let r = result(Mode::Native, 1_500_000, 1_000_000);
        assert!((r.per_call_ns - 1.5).abs() < 1e-9);
        assert!((r.total_ms() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_per_call_in_unit() {
        let r = BenchmarkResult::new(
            Workload::SlowCompute,
            Mode::Native,
            IterationCount::new(100).unwrap(),
            Duration::from_millis(250),
            0,
        );
        assert!((r.per_call_in_unit() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_comparison_foreign_wins() {
        let cmp = ComparisonResult::new(
            result(Mode::Native, 4_000, 1_000),
            result(Mode::Foreign, 2_000, 1_000),
        );
        assert_eq!(cmp.winner, Mode::Foreign);
        assert!(cmp.results_match);
        assert_eq!(cmp.verdict(), Some(Mode::Foreign));
        assert!((cmp.speedup_ratio.unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_comparison_native_wins() {
        let cmp = ComparisonResult::new(
            result(Mode::Native, 1_000, 1_000),
            result(Mode::Foreign, 5_000, 1_000),
        );
        assert_eq!(cmp.winner, Mode::Native);
        assert!((cmp.speedup_ratio.unwrap() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_comparison_tie_goes_to_foreign() {
        let cmp = ComparisonResult::new(
            result(Mode::Native, 1_000, 1_000),
            result(Mode::Foreign, 1_000, 1_000),
        );
        assert_eq!(cmp.winner, Mode::Foreign);
    }

    #[test]
    fn test_checksum_disagreement_has_no_verdict() {
        let cmp = ComparisonResult::new(
            checked_result(Mode::Native, 4_000, 1_000, 0x98d9_6961_7c71_c950),
            checked_result(Mode::Foreign, 1_000, 1_000, 0x9f44_014a_83ab_4c3b),
        );
        assert!(!cmp.results_match);
        assert_eq!(cmp.verdict(), None);
    }

    #[test]
    fn test_zero_foreign_time_has_no_speedup() {
        let cmp = ComparisonResult::new(
            result(Mode::Native, 1_000, 1_000),
            result(Mode::Foreign, 0, 1_000),
        );
        assert_eq!(cmp.speedup_ratio, None);
        assert_eq!(cmp.winner, Mode::Foreign);

        let both_zero = ComparisonResult::new(
            result(Mode::Native, 0, 1_000),
            result(Mode::Foreign, 0, 1_000),
        );
        assert_eq!(both_zero.speedup_ratio, None);
    }

    #[test]
    fn test_zero_native_time_is_finite() {
        let cmp = ComparisonResult::new(
            result(Mode::Native, 0, 1_000),
            result(Mode::Foreign, 1_000, 1_000),
        );
        assert_eq!(cmp.speedup_ratio, Some(0.0));
        assert_eq!(cmp.winner, Mode::Native);
    }

    #[test]
    fn test_outcome_without_foreign_has_no_comparison() {
        let outcome = WorkloadOutcome {
            workload: Workload::FastSum8,
            inner_iterations: None,
            native: result(Mode::Native, 1_000, 1_000),
            foreign: None,
        };
        assert!(outcome.comparison().is_none());
    }

    #[test]
    fn test_system_info_collect() {
        let info = SystemInfo::collect();
        assert!(!info.os.is_empty());
        assert!(info.cpu_cores > 0);
    }

    #[test]
    fn test_result_serialization() {
        let json = serde_json::to_string_pretty(&result(Mode::Foreign, 10, 10)).unwrap();
        assert!(json.contains("\"fast_sum8\""));
        assert!(json.contains("\"foreign\""));
        assert!(json.contains("per_call_ns"));
    }
}
