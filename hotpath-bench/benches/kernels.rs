// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Criterion view of the native vs foreign kernel call cost.
//!
//! The foreign side is the reference module linked as an rlib and called
//! through C ABI function pointers, which is the same indirect call the
//! dlopen path makes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hotpath_core::kernels::FAST_SUM8_ARGS;
use hotpath_core::{ForeignKernels, Kernels, NativeKernels};
use std::time::Duration;

/// `slow_compute` round counts to sweep.
const MIX_ROUNDS: &[u64] = &[1, 1_000, 100_000];

fn linked_foreign() -> ForeignKernels {
    // SAFETY: the hotpath crate exports exactly the C ABI these pointers describe.
    unsafe { ForeignKernels::from_symbols(hotpath::fast_sum8, hotpath::slow_compute) }
}

/// Per-call cost of `fast_sum8`: almost entirely dispatch.
fn bench_fast_sum8(c: &mut Criterion) {
    let mut group = c.benchmark_group("fast_sum8");
    group.measurement_time(Duration::from_secs(3));

    let native = NativeKernels;
    let foreign = linked_foreign();
    let [a, b, c8, d, e, f, g, h] = FAST_SUM8_ARGS;

    group.bench_function("native", |bench| {
        bench.iter(|| {
            native.fast_sum8(
                black_box(a),
                black_box(b),
                black_box(c8),
                black_box(d),
                black_box(e),
                black_box(f),
                black_box(g),
                black_box(h),
            )
        });
    });

    group.bench_function("ffi", |bench| {
        bench.iter(|| {
            foreign.fast_sum8(
                black_box(a),
                black_box(b),
                black_box(c8),
                black_box(d),
                black_box(e),
                black_box(f),
                black_box(g),
                black_box(h),
            )
        });
    });

    group.finish();
}

/// `slow_compute` at increasing round counts; dispatch cost amortizes away.
fn bench_slow_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("slow_compute");
    group.measurement_time(Duration::from_secs(5));

    let native = NativeKernels;
    let foreign = linked_foreign();

    for &rounds in MIX_ROUNDS {
        group.bench_with_input(BenchmarkId::new("native", rounds), &rounds, |bench, &rounds| {
            bench.iter(|| native.slow_compute(black_box(42), black_box(rounds)));
        });
        group.bench_with_input(BenchmarkId::new("ffi", rounds), &rounds, |bench, &rounds| {
            bench.iter(|| foreign.slow_compute(black_box(42), black_box(rounds)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fast_sum8, bench_slow_compute);

criterion_main!(benches);
