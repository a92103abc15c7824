// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Single-kernel run: native `slow_compute`, one summary line.

use std::io;

use clap::Parser;
use hotpath_bench::cli::{self, BenchArgs};
use hotpath_bench::{BenchmarkHarness, Layout, TextReporter, WorkloadOutcome};
use hotpath_core::{NativeKernels, Workload};

#[derive(Parser)]
#[command(name = "slow-compute")]
#[command(about = "Time native slow_compute calls")]
struct Args {
    #[command(flatten)]
    bench: BenchArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    cli::init_tracing(args.bench.verbose);

    let config = args.bench.resolve()?;
    let harness = BenchmarkHarness::new(config.plan);
    let result = harness.run_slow_compute(&NativeKernels);

    TextReporter::new(io::stdout().lock(), Layout::Baseline).write_summary_line(&result)?;

    let outcome = WorkloadOutcome {
        workload: Workload::SlowCompute,
        inner_iterations: Some(config.plan.slow_compute_inner),
        native: result,
        foreign: None,
    };
    cli::save_json(&args.bench, "slow-compute", None, vec![outcome]);

    Ok(())
}
