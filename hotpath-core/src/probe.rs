// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Capability probe for the optional foreign kernel module.
//!
//! [`try_acquire_foreign_kernels`] is the single place where a missing or
//! misbehaving module is reported. It never fails: callers get `None` and
//! run native-only.

use std::path::PathBuf;

use crate::clock::measure;
use crate::error::ForeignUnavailable;
use crate::foreign::ForeignKernels;
use crate::kernels::{Kernels, NativeKernels, FAST_SUM8_ARGS};

/// Base name of the foreign kernel library (`libhotpath.so` on Linux).
pub const LIBRARY_STEM: &str = "hotpath";

/// `slow_compute` inputs checked bit-for-bit before a module is trusted.
pub const CONFORMANCE_VECTORS: [(u64, u64); 4] = [
    (0, 0),
    (42, 5),
    (u64::MAX, 1),
    (0x9e37_79b9_7f4a_7c15, 1_000),
];

/// Where the probe looks for the foreign module.
#[derive(Debug, Clone, Default)]
pub struct ProbeConfig {
    /// Explicit library path. When set, no other location is tried.
    pub library: Option<PathBuf>,
}

impl ProbeConfig {
    /// Probe only the given library path.
    pub fn with_library(path: impl Into<PathBuf>) -> Self {
        Self {
            library: Some(path.into()),
        }
    }

    /// Candidate paths, in the order they are tried.
    pub fn candidates(&self) -> Vec<PathBuf> {
        if let Some(path) = &self.library {
            return vec![path.clone()];
        }

        let file_name = library_file_name();
        let mut candidates = Vec::with_capacity(3);

        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        {
            candidates.push(dir.join(&file_name));
        }
        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(&file_name));
        }
        // Bare name: resolved through the platform loader search path.
        candidates.push(PathBuf::from(&file_name));

        candidates.dedup();
        candidates
    }
}

/// Platform file name of the foreign library, e.g. `libhotpath.so`.
pub fn library_file_name() -> String {
    format!(
        "{}{}{}",
        std::env::consts::DLL_PREFIX,
        LIBRARY_STEM,
        std::env::consts::DLL_SUFFIX
    )
}

/// Try each candidate location and return the first conforming module.
///
/// A candidate that exists but fails to load, lacks a symbol, or disagrees
/// with the native kernels stops the search; that error is what the caller
/// sees. Candidates that don't exist are skipped.
pub fn acquire_foreign_kernels(config: &ProbeConfig) -> Result<ForeignKernels, ForeignUnavailable> {
    let candidates = config.candidates();
    let explicit = config.library.is_some();

    for path in &candidates {
        // Bare names have no parent directory; let dlopen search for them.
        let is_bare = path.parent().map_or(true, |p| p.as_os_str().is_empty());
        if !explicit && !is_bare && !path.exists() {
            tracing::debug!(path = %path.display(), "foreign kernel candidate not present");
            continue;
        }

        match ForeignKernels::load(path) {
            Ok(kernels) => {
                let (verdict, took) = measure(|| verify_conformance(&kernels));
                tracing::debug!(
                    path = %path.display(),
                    elapsed_us = took.as_micros() as u64,
                    passed = verdict.is_ok(),
                    "foreign kernel conformance check"
                );
                verdict?;
                return Ok(kernels);
            }
            // A bare-name lookup that fails just means nothing is installed.
            Err(ForeignUnavailable::LoadFailed { .. }) if is_bare && !explicit => {
                tracing::debug!(path = %path.display(), "foreign kernel not on loader search path");
            }
            Err(e) => return Err(e),
        }
    }

    Err(ForeignUnavailable::NotFound {
        searched: candidates,
    })
}

/// Probe for the foreign module, degrading to `None` on any failure.
///
/// Emits exactly one diagnostic describing the outcome.
pub fn try_acquire_foreign_kernels(config: &ProbeConfig) -> Option<ForeignKernels> {
    match acquire_foreign_kernels(config) {
        Ok(kernels) => {
            tracing::info!(
                library = %kernels
                    .library_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
                "foreign kernel loaded"
            );
            Some(kernels)
        }
        Err(e) => {
            tracing::warn!(error = %e, "foreign kernel unavailable, skipping comparative run");
            None
        }
    }
}

/// Check that `candidate` agrees bit-for-bit with the native kernels.
pub fn verify_conformance<K: Kernels + ?Sized>(candidate: &K) -> Result<(), ForeignUnavailable> {
    let native = NativeKernels;
    let [a, b, c, d, e, f, g, h] = FAST_SUM8_ARGS;

    let expected = native.fast_sum8(a, b, c, d, e, f, g, h);
    let actual = candidate.fast_sum8(a, b, c, d, e, f, g, h);
    if expected != actual {
        return Err(ForeignUnavailable::Mismatch {
            kernel: "fast_sum8",
            input: format!("{:?}", FAST_SUM8_ARGS),
            native: expected as u64,
            foreign: actual as u64,
        });
    }

    for (seed, iterations) in CONFORMANCE_VECTORS {
        let expected = native.slow_compute(seed, iterations);
        let actual = candidate.slow_compute(seed, iterations);
        if expected != actual {
            return Err(ForeignUnavailable::Mismatch {
                kernel: "slow_compute",
                input: format!("({}, {})", seed, iterations),
                native: expected,
                foreign: actual,
            });
        }
    }

    Ok(())
}
