// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Native-only baseline. Never loads a foreign module.

use std::io;

use clap::Parser;
use hotpath_bench::cli::{self, BenchArgs};
use hotpath_bench::{BenchmarkHarness, Layout, TextReporter};

#[derive(Parser)]
#[command(name = "native-bench")]
#[command(about = "Time the native Rust kernels without any FFI")]
struct Args {
    #[command(flatten)]
    bench: BenchArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    cli::init_tracing(args.bench.verbose);

    let config = args.bench.resolve()?;
    if config.library.is_some() {
        tracing::warn!("native-bench ignores the foreign library setting");
    }

    let harness = BenchmarkHarness::new(config.plan);
    let outcomes = harness.run_suite(None);

    let mut reporter = TextReporter::new(io::stdout().lock(), Layout::Baseline);
    reporter.write_header("Rust Native Benchmark")?;
    reporter.write_outcomes(&outcomes)?;

    cli::save_json(&args.bench, "native-bench", None, outcomes);

    Ok(())
}
