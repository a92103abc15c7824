// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Command-line plumbing shared by the benchmark executables.

use std::path::PathBuf;

use clap::Parser;
use hotpath_core::{BenchConfig, BenchPlan, ConfigLoader, HotpathResult, ProbeConfig};
use tracing_subscriber::EnvFilter;

use crate::metrics::{SuiteReport, WorkloadOutcome};
use crate::reporter::{JsonReporter, ReporterError};

/// Flags accepted by every benchmark executable. All are optional.
#[derive(Debug, Parser)]
pub struct BenchArgs {
    /// YAML file overriding iteration counts and the library path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Foreign kernel library to load instead of searching for libhotpath
    #[arg(short, long)]
    pub library: Option<PathBuf>,

    /// Run a reduced plan (100K fast calls, 10 slow calls of 100K rounds)
    #[arg(long)]
    pub quick: bool,

    /// Also write the results as JSON to this file (or, for a directory,
    /// to a timestamped file inside it)
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl BenchArgs {
    /// Merge the config file (if any) with command-line overrides.
    pub fn resolve(&self) -> HotpathResult<BenchConfig> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_file(path)?,
            None => BenchConfig::default(),
        };

        if self.quick {
            config.plan = BenchPlan::quick();
        }
        if let Some(library) = &self.library {
            config.library = Some(library.clone());
        }

        tracing::debug!(
            fast_sum8_calls = config.plan.fast_sum8_calls.get(),
            slow_compute_calls = config.plan.slow_compute_calls.get(),
            slow_compute_inner = config.plan.slow_compute_inner.get(),
            library = ?config.library,
            "benchmark configuration resolved"
        );
        Ok(config)
    }
}

/// Probe settings for a resolved configuration.
pub fn probe_config(config: &BenchConfig) -> ProbeConfig {
    ProbeConfig {
        library: config.library.clone(),
    }
}

/// Write `outcomes` as a JSON suite report when `--json` was given.
///
/// A directory target gets a timestamped `<suite>_<time>.json` file inside
/// it; any other path is written as-is. Returns the file written, if any.
pub fn write_json_report(
    args: &BenchArgs,
    suite: &str,
    foreign_library: Option<String>,
    outcomes: Vec<WorkloadOutcome>,
) -> Result<Option<PathBuf>, ReporterError> {
    let Some(path) = &args.json else {
        return Ok(None);
    };
    let report = SuiteReport::new(suite, foreign_library, outcomes);
    let written = if path.is_dir() {
        JsonReporter::new(path)?.save(&report)?
    } else {
        JsonReporter::save_to(&report, path)?;
        path.clone()
    };
    tracing::info!(
        path = %written.display(),
        comparative = report.has_foreign(),
        "JSON report written"
    );
    Ok(Some(written))
}

/// [`write_json_report`] for executables: the text report is already out,
/// so a failed write is logged and the run still succeeds.
pub fn save_json(
    args: &BenchArgs,
    suite: &str,
    foreign_library: Option<String>,
    outcomes: Vec<WorkloadOutcome>,
) {
    if let Err(e) = write_json_report(args, suite, foreign_library, outcomes) {
        tracing::error!(error = %e, "failed to write JSON report");
    }
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
