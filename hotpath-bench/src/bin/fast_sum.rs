// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Single-kernel run: native `fast_sum8`, one summary line.

use std::io;

use clap::Parser;
use hotpath_bench::cli::{self, BenchArgs};
use hotpath_bench::{BenchmarkHarness, Layout, TextReporter, WorkloadOutcome};
use hotpath_core::{NativeKernels, Workload};

#[derive(Parser)]
#[command(name = "fast-sum")]
#[command(about = "Time native fast_sum8 calls")]
struct Args {
    #[command(flatten)]
    bench: BenchArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    cli::init_tracing(args.bench.verbose);

    let config = args.bench.resolve()?;
    let harness = BenchmarkHarness::new(config.plan);
    let result = harness.run_fast_sum8(&NativeKernels);

    TextReporter::new(io::stdout().lock(), Layout::Baseline).write_summary_line(&result)?;

    let outcome = WorkloadOutcome {
        workload: Workload::FastSum8,
        inner_iterations: None,
        native: result,
        foreign: None,
    };
    cli::save_json(&args.bench, "fast-sum", None, vec![outcome]);

    Ok(())
}
