// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark plan and optional YAML configuration.
//!
//! Running with no configuration reproduces the reference protocol:
//! 1M `fast_sum8` calls and 100 `slow_compute` calls of 1M rounds each.
//! Any invalid field results in a HardValidationError.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{HardValidationError, HotpathError, HotpathResult};
use crate::types::IterationCount;

/// Default number of timed `fast_sum8` calls.
pub const FAST_SUM8_CALLS: u64 = 1_000_000;
/// Default number of timed `slow_compute` calls.
pub const SLOW_COMPUTE_CALLS: u64 = 100;
/// Default mixing rounds inside each `slow_compute` call.
pub const SLOW_COMPUTE_INNER_ITERATIONS: u64 = 1_000_000;

/// Iteration counts for one benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchPlan {
    /// Timed `fast_sum8` calls
    pub fast_sum8_calls: IterationCount,
    /// Timed `slow_compute` calls; call `i` uses seed `i`
    pub slow_compute_calls: IterationCount,
    /// Mixing rounds per `slow_compute` call
    pub slow_compute_inner: IterationCount,
}

impl BenchPlan {
    /// Reduced plan for smoke runs.
    pub fn quick() -> Self {
        Self {
            fast_sum8_calls: IterationCount::from_const(100_000),
            slow_compute_calls: IterationCount::from_const(10),
            slow_compute_inner: IterationCount::from_const(100_000),
        }
    }
}

impl Default for BenchPlan {
    fn default() -> Self {
        Self {
            fast_sum8_calls: IterationCount::from_const(FAST_SUM8_CALLS),
            slow_compute_calls: IterationCount::from_const(SLOW_COMPUTE_CALLS),
            slow_compute_inner: IterationCount::from_const(SLOW_COMPUTE_INNER_ITERATIONS),
        }
    }
}

/// Raw `fast_sum8` section as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFastSumConfig {
    #[serde(default = "default_fast_calls")]
    calls: u64,
}

fn default_fast_calls() -> u64 {
    FAST_SUM8_CALLS
}

impl Default for RawFastSumConfig {
    fn default() -> Self {
        Self {
            calls: default_fast_calls(),
        }
    }
}

/// Raw `slow_compute` section.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSlowComputeConfig {
    #[serde(default = "default_slow_calls")]
    calls: u64,
    #[serde(default = "default_inner_iterations")]
    inner_iterations: u64,
}

fn default_slow_calls() -> u64 {
    SLOW_COMPUTE_CALLS
}

fn default_inner_iterations() -> u64 {
    SLOW_COMPUTE_INNER_ITERATIONS
}

impl Default for RawSlowComputeConfig {
    fn default() -> Self {
        Self {
            calls: default_slow_calls(),
            inner_iterations: default_inner_iterations(),
        }
    }
}

/// Raw root configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    library: Option<String>,
    #[serde(default)]
    fast_sum8: RawFastSumConfig,
    #[serde(default)]
    slow_compute: RawSlowComputeConfig,
}

/// Complete validated configuration.
#[derive(Debug, Clone, Default)]
pub struct BenchConfig {
    pub plan: BenchPlan,
    /// Explicit foreign library path; `None` searches the default locations
    pub library: Option<PathBuf>,
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> HotpathResult<BenchConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(HotpathError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| HotpathError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> HotpathResult<BenchConfig> {
        // An empty document means "all defaults".
        if content.trim().is_empty() {
            return Self::validate(RawConfig::default());
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| HotpathError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?;

        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> HotpathResult<BenchConfig> {
        let plan = BenchPlan {
            fast_sum8_calls: count("fast_sum8.calls", raw.fast_sum8.calls)?,
            slow_compute_calls: count("slow_compute.calls", raw.slow_compute.calls)?,
            slow_compute_inner: count(
                "slow_compute.inner_iterations",
                raw.slow_compute.inner_iterations,
            )?,
        };

        let library = match raw.library {
            Some(path) if path.trim().is_empty() => {
                return Err(HardValidationError::InvalidFieldValue {
                    field: "library",
                    value: path,
                    reason: "Library path cannot be empty".to_string(),
                }
                .into());
            }
            Some(path) => Some(PathBuf::from(path)),
            None => None,
        };

        Ok(BenchConfig { plan, library })
    }
}

fn count(field: &'static str, value: u64) -> Result<IterationCount, HardValidationError> {
    IterationCount::new(value).map_err(|_| HardValidationError::InvalidFieldValue {
        field,
        value: value.to_string(),
        reason: "Must be greater than 0".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CONFIG: &str = r#"
library: /opt/hotpath/libhotpath.so
fast_sum8:
  calls: 5000
slow_compute:
  calls: 4
  inner_iterations: 250
"#;

    #[test]
    fn test_valid_config() {
        let config = ConfigLoader::load_string(VALID_CONFIG).unwrap();
        assert_eq!(config.plan.fast_sum8_calls.get(), 5000);
        assert_eq!(config.plan.slow_compute_calls.get(), 4);
        assert_eq!(config.plan.slow_compute_inner.get(), 250);
        assert_eq!(
            config.library,
            Some(PathBuf::from("/opt/hotpath/libhotpath.so"))
        );
    }

    #[test]
    fn test_defaults_applied() {
        let config = ConfigLoader::load_string("fast_sum8:\n  calls: 10\n").unwrap();
        assert_eq!(config.plan.fast_sum8_calls.get(), 10);
        assert_eq!(config.plan.slow_compute_calls.get(), SLOW_COMPUTE_CALLS);
        assert_eq!(
            config.plan.slow_compute_inner.get(),
            SLOW_COMPUTE_INNER_ITERATIONS
        );
        assert!(config.library.is_none());
    }

    #[test]
    fn test_empty_document_is_default_plan() {
        let config = ConfigLoader::load_string("").unwrap();
        assert_eq!(config.plan, BenchPlan::default());
    }

    #[test]
    fn test_zero_calls_rejected() {
        let yaml = r#"
slow_compute:
  calls: 0
"#;
        let err = ConfigLoader::load_string(yaml).unwrap_err();
        assert!(matches!(
            err,
            HotpathError::HardValidation(HardValidationError::InvalidFieldValue {
                field: "slow_compute.calls",
                ..
            })
        ));
    }

    #[test]
    fn test_empty_library_rejected() {
        let result = ConfigLoader::load_string("library: \"  \"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = ConfigLoader::load_string("warmup: 10\n");
        assert!(matches!(result, Err(HotpathError::ConfigParse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::load_file("/nonexistent/hotpath.yaml");
        assert!(matches!(result, Err(HotpathError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_reference_plan() {
        let plan = BenchPlan::default();
        assert_eq!(plan.fast_sum8_calls.get(), 1_000_000);
        assert_eq!(plan.slow_compute_calls.get(), 100);
        assert_eq!(plan.slow_compute_inner.get(), 1_000_000);
    }
}
