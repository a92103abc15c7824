// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Hotpath Benchmarking Harness
//!
//! Measures the per-call cost of two workload kernels implemented natively
//! in Rust and, when a foreign module is available, behind the C ABI.
//!
//! # Workloads
//!
//! - **fast_sum8**: eight-integer sum; the time is almost all call overhead
//! - **slow_compute**: iterated 64-bit mix; compute dominates the call cost
//!
//! # Executables
//!
//! - `ffi-bench`: native vs foreign comparison with a speedup verdict
//! - `native-bench`: native baseline only
//! - `fast-sum` / `slow-compute`: one-line single-kernel runs

pub mod cli;
pub mod harness;
pub mod metrics;
pub mod reporter;

pub use harness::BenchmarkHarness;
pub use metrics::{BenchmarkResult, ComparisonResult, SuiteReport, SystemInfo, WorkloadOutcome};
pub use reporter::{JsonReporter, Layout, TextReporter};
