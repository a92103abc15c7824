// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Report generation for benchmark results.
//!
//! [`TextReporter`] writes the human-readable report to any stream.
//! [`JsonReporter`] saves a [`SuiteReport`] to disk on request.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use hotpath_core::Workload;
use thiserror::Error;

use crate::metrics::{BenchmarkResult, ComparisonResult, SuiteReport, WorkloadOutcome};

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Text layout of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `Native:` / `FFI:` / `Speedup:` lines per workload
    Comparative,
    /// `Total time:` / `Per call:` lines for the native run only
    Baseline,
}

/// Human-readable report writer.
pub struct TextReporter<W: Write> {
    out: W,
    layout: Layout,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W, layout: Layout) -> Self {
        Self { out, layout }
    }

    /// Title underlined with `=`.
    pub fn write_header(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "{}", title)?;
        writeln!(self.out, "{}", "=".repeat(title.chars().count()))?;
        writeln!(self.out)
    }

    /// All workload sections, separated by blank lines.
    pub fn write_outcomes(&mut self, outcomes: &[WorkloadOutcome]) -> io::Result<()> {
        for (i, outcome) in outcomes.iter().enumerate() {
            if i > 0 {
                writeln!(self.out)?;
            }
            self.write_outcome(outcome)?;
        }
        self.out.flush()
    }

    /// One workload section.
    pub fn write_outcome(&mut self, outcome: &WorkloadOutcome) -> io::Result<()> {
        writeln!(self.out, "{}:", heading(outcome))?;

        match self.layout {
            Layout::Baseline => {
                let native = &outcome.native;
                let unit = native.workload.per_call_unit();
                writeln!(self.out, "  Total time:  {:8.2} ms", native.total_ms())?;
                writeln!(
                    self.out,
                    "  Per call:    {:8.2} {}",
                    native.per_call_in_unit(),
                    unit.suffix()
                )?;
            }
            Layout::Comparative => {
                self.write_run_line(&outcome.native)?;
                if let Some(foreign) = &outcome.foreign {
                    self.write_run_line(foreign)?;
                }
                if let Some(cmp) = outcome.comparison() {
                    self.write_verdict_line(&cmp)?;
                }
            }
        }
        Ok(())
    }

    fn write_verdict_line(&mut self, cmp: &ComparisonResult) -> io::Result<()> {
        let Some(winner) = cmp.verdict() else {
            return writeln!(
                self.out,
                "  Speedup: INVALID (checksums differ: Native {:#018x}, FFI {:#018x})",
                cmp.native.checksum, cmp.foreign.checksum
            );
        };
        match cmp.speedup_ratio {
            Some(ratio) => writeln!(self.out, "  Speedup: {:.1}x ({} wins)", ratio, winner),
            None => writeln!(self.out, "  Speedup: n/a ({} wins)", winner),
        }
    }

    fn write_run_line(&mut self, result: &BenchmarkResult) -> io::Result<()> {
        let label = format!("{}:", result.mode);
        writeln!(
            self.out,
            "  {:<8} {:8.2} ms total, {:8.2} {}/call",
            label,
            result.total_ms(),
            result.per_call_in_unit(),
            result.workload.per_call_unit().suffix()
        )
    }

    /// One-line summary used by the single-kernel micro-apps.
    pub fn write_summary_line(&mut self, result: &BenchmarkResult) -> io::Result<()> {
        writeln!(
            self.out,
            "{}: {:.2} ms total, {:.2} {}/call",
            result.workload,
            result.total_ms(),
            result.per_call_in_unit(),
            result.workload.per_call_unit().suffix()
        )?;
        self.out.flush()
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Section heading, e.g. `slow_compute (100 calls, 1M iters each)`.
pub fn heading(outcome: &WorkloadOutcome) -> String {
    let calls = outcome.native.iterations.short_label();
    match (outcome.workload, outcome.inner_iterations) {
        (Workload::SlowCompute, Some(inner)) => format!(
            "{} ({} calls, {} iters each)",
            outcome.workload,
            calls,
            inner.short_label()
        ),
        _ => format!("{} ({} calls)", outcome.workload, calls),
    }
}

/// JSON reporter for benchmark results.
pub struct JsonReporter {
    /// Output directory for benchmark data
    output_dir: PathBuf,
}

impl JsonReporter {
    /// Create a new JSON reporter with the specified output directory.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, ReporterError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Save a report to `<suite>_<timestamp>.json` in the output directory.
    ///
    /// Returns the path to the created file.
    pub fn save(&self, report: &SuiteReport) -> Result<PathBuf, ReporterError> {
        let timestamp = report.timestamp.format("%Y-%m-%dT%H-%M-%SZ");
        let filename = format!("{}_{}.json", report.benchmark_suite, timestamp);
        let filepath = self.output_dir.join(&filename);
        Self::save_to(report, &filepath)?;
        Ok(filepath)
    }

    /// Save a report to an exact file path.
    pub fn save_to(report: &SuiteReport, path: impl AsRef<Path>) -> Result<(), ReporterError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.flush()?;
        Ok(())
    }

    /// Load an existing benchmark report from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<SuiteReport, ReporterError> {
        let file = File::open(path)?;
        let report = serde_json::from_reader(file)?;
        Ok(report)
    }
}
