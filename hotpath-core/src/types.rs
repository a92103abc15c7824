// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Newtype wrappers and enums shared across the harness.
//!
//! Following the "Newtype" pattern to ensure valid state by construction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HardValidationError;

/// The two synthetic workloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Workload {
    /// Sum of eight integers; isolates call dispatch overhead
    #[serde(rename = "fast_sum8")]
    FastSum8,
    /// Iterated avalanche mix; amortizes dispatch under real compute
    SlowCompute,
}

impl Workload {
    /// All workloads in report order.
    pub const ALL: [Workload; 2] = [Workload::FastSum8, Workload::SlowCompute];

    /// Unit used when reporting per-call cost.
    pub fn per_call_unit(&self) -> TimeUnit {
        match self {
            Workload::FastSum8 => TimeUnit::Nanos,
            Workload::SlowCompute => TimeUnit::Millis,
        }
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Workload::FastSum8 => write!(f, "fast_sum8"),
            Workload::SlowCompute => write!(f, "slow_compute"),
        }
    }
}

/// Which side of the FFI boundary a kernel lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Native,
    Foreign,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Native => write!(f, "Native"),
            Mode::Foreign => write!(f, "FFI"),
        }
    }
}

/// Display unit for a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Nanos,
    Millis,
}

impl TimeUnit {
    /// Convert a nanosecond quantity into this unit.
    pub fn from_nanos(&self, ns: f64) -> f64 {
        match self {
            TimeUnit::Nanos => ns,
            TimeUnit::Millis => ns / 1_000_000.0,
        }
    }

    /// Short suffix ("ns", "ms").
    pub fn suffix(&self) -> &'static str {
        match self {
            TimeUnit::Nanos => "ns",
            TimeUnit::Millis => "ms",
        }
    }
}

/// Validated loop iteration count.
/// Must be positive; a zero-length timed loop has no per-call cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct IterationCount(u64);

impl IterationCount {
    /// Create a new IterationCount with validation.
    pub fn new(count: u64) -> Result<Self, HardValidationError> {
        if count == 0 {
            return Err(HardValidationError::InvalidFieldValue {
                field: "iterations",
                value: "0".to_string(),
                reason: "Iteration count must be greater than 0".to_string(),
            });
        }
        Ok(Self(count))
    }

    /// Build from a compile-time constant.
    ///
    /// Panics at compile time when used in a `const` with zero.
    pub const fn from_const(count: u64) -> Self {
        assert!(count > 0, "iteration count must be positive");
        Self(count)
    }

    /// Get the inner value.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// Compact label used in report headings ("1M", "100K", "250").
    pub fn short_label(&self) -> String {
        let n = self.0;
        if n % 1_000_000 == 0 {
            format!("{}M", n / 1_000_000)
        } else if n % 1_000 == 0 {
            format!("{}K", n / 1_000)
        } else {
            n.to_string()
        }
    }
}

impl fmt::Display for IterationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for IterationCount {
    type Error = HardValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IterationCount> for u64 {
    fn from(count: IterationCount) -> Self {
        count.0
    }
}
