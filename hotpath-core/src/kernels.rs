// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Workload kernels and the capability set the harness drives.
//!
//! Both kernels are pure and deterministic. `slow_compute` must be bit-exact
//! across every implementation of [`Kernels`]; the foreign probe checks this
//! before a foreign handle is accepted.

use crate::types::Mode;

/// Fixed `fast_sum8` benchmark inputs.
pub const FAST_SUM8_ARGS: [i64; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

/// Expected `fast_sum8` result for [`FAST_SUM8_ARGS`].
pub const FAST_SUM8_EXPECTED: i64 = 36;

const MIX_MUL_1: u64 = 0xff51_afd7_ed55_8ccd;
const MIX_MUL_2: u64 = 0xc4ce_b9fe_1a85_ec53;

/// Sum of eight integers, wrapping on overflow.
///
/// Kept out of line so a timed loop pays for a real call.
#[inline(never)]
#[allow(clippy::too_many_arguments)]
pub fn fast_sum8(a: i64, b: i64, c: i64, d: i64, e: i64, f: i64, g: i64, h: i64) -> i64 {
    a.wrapping_add(b)
        .wrapping_add(c)
        .wrapping_add(d)
        .wrapping_add(e)
        .wrapping_add(f)
        .wrapping_add(g)
        .wrapping_add(h)
}

/// `iterations` rounds of the MurmurHash3 64-bit finalizer.
///
/// `iterations == 0` returns `seed` unchanged.
#[inline(never)]
pub fn slow_compute(seed: u64, iterations: u64) -> u64 {
    let mut h = seed;
    for _ in 0..iterations {
        h ^= h >> 33;
        h = h.wrapping_mul(MIX_MUL_1);
        h ^= h >> 33;
        h = h.wrapping_mul(MIX_MUL_2);
        h ^= h >> 33;
    }
    h
}

/// A capability set exposing both benchmark kernels.
///
/// The harness is generic over this trait and only distinguishes
/// implementations by [`Kernels::mode`].
pub trait Kernels {
    /// Which side of the FFI boundary these kernels run on.
    fn mode(&self) -> Mode;

    #[allow(clippy::too_many_arguments)]
    fn fast_sum8(&self, a: i64, b: i64, c: i64, d: i64, e: i64, f: i64, g: i64, h: i64) -> i64;

    fn slow_compute(&self, seed: u64, iterations: u64) -> u64;
}

/// Kernels compiled into this binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeKernels;

impl Kernels for NativeKernels {
    fn mode(&self) -> Mode {
        Mode::Native
    }

    #[inline(always)]
    fn fast_sum8(&self, a: i64, b: i64, c: i64, d: i64, e: i64, f: i64, g: i64, h: i64) -> i64 {
        fast_sum8(a, b, c, d, e, f, g, h)
    }

    #[inline(always)]
    fn slow_compute(&self, seed: u64, iterations: u64) -> u64 {
        slow_compute(seed, iterations)
    }
}
