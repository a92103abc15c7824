// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Native vs FFI comparison. Runs native-only when no foreign kernel module
//! can be loaded.

use std::io;

use clap::Parser;
use hotpath_bench::cli::{self, BenchArgs};
use hotpath_bench::{BenchmarkHarness, Layout, TextReporter};
use hotpath_core::try_acquire_foreign_kernels;

#[derive(Parser)]
#[command(name = "ffi-bench")]
#[command(about = "Compare native Rust kernels against the same kernels behind the C ABI")]
struct Args {
    #[command(flatten)]
    bench: BenchArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    cli::init_tracing(args.bench.verbose);

    let config = args.bench.resolve()?;
    let foreign = try_acquire_foreign_kernels(&cli::probe_config(&config));

    let harness = BenchmarkHarness::new(config.plan);
    let outcomes = harness.run_suite(foreign.as_ref());

    let mut reporter = TextReporter::new(io::stdout().lock(), Layout::Comparative);
    reporter.write_header("Rust FFI Benchmark")?;
    reporter.write_outcomes(&outcomes)?;

    let library = foreign
        .as_ref()
        .and_then(|k| k.library_path())
        .map(|p| p.display().to_string());
    cli::save_json(&args.bench, "ffi-bench", library, outcomes);

    Ok(())
}
