// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Hotpath foreign kernel module.
//!
//! Exports the two benchmark kernels over the C ABI so the harness can
//! resolve them with `dlopen`/`dlsym`:
//!
//! ```c
//! int64_t  fast_sum8(int64_t a, int64_t b, int64_t c, int64_t d,
//!                    int64_t e, int64_t f, int64_t g, int64_t h);
//! uint64_t slow_compute(uint64_t seed, uint64_t iterations);
//! ```
//!
//! This crate deliberately has no dependency on `hotpath-core`: it stands in
//! for an extension built by someone else, and the harness checks it against
//! its own native kernels before trusting it.

const MIX_MUL_1: u64 = 0xff51_afd7_ed55_8ccd;
const MIX_MUL_2: u64 = 0xc4ce_b9fe_1a85_ec53;

/// FAST: sums eight integers. All work fits in registers, so the measured
/// cost is dominated by the call itself.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn fast_sum8(a: i64, b: i64, c: i64, d: i64, e: i64, f: i64, g: i64, h: i64) -> i64 {
    a.wrapping_add(b)
        .wrapping_add(c)
        .wrapping_add(d)
        .wrapping_add(e)
        .wrapping_add(f)
        .wrapping_add(g)
        .wrapping_add(h)
}

/// SLOW: `iterations` rounds of a Murmur3-style finalizer.
///
/// Shifts are logical; a signed `long long` port would shift arithmetically
/// and disagree with the native kernel for seeds with the top bit set.
#[no_mangle]
pub extern "C" fn slow_compute(seed: u64, iterations: u64) -> u64 {
    let mut h = seed;
    let mut remaining = iterations;
    while remaining > 0 {
        h ^= h >> 33;
        h = h.wrapping_mul(MIX_MUL_1);
        h ^= h >> 33;
        h = h.wrapping_mul(MIX_MUL_2);
        h ^= h >> 33;
        remaining -= 1;
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_sum8_fixed_inputs() {
        assert_eq!(fast_sum8(1, 2, 3, 4, 5, 6, 7, 8), 36);
    }

    #[test]
    fn test_fast_sum8_wraps() {
        assert_eq!(fast_sum8(i64::MAX, 1, 0, 0, 0, 0, 0, 0), i64::MIN);
    }

    #[test]
    fn test_slow_compute_zero_iterations() {
        assert_eq!(slow_compute(0xdead_beef, 0), 0xdead_beef);
    }

    #[test]
    fn test_slow_compute_single_round() {
        // fmix64(1) from MurmurHash3
        let mut h: u64 = 1;
        h ^= h >> 33;
        h = h.wrapping_mul(MIX_MUL_1);
        h ^= h >> 33;
        h = h.wrapping_mul(MIX_MUL_2);
        h ^= h >> 33;
        assert_eq!(slow_compute(1, 1), h);
    }

    #[test]
    fn test_slow_compute_high_bit_seed() {
        // Logical shift: the top bit must not smear into the high half.
        let out = slow_compute(1 << 63, 1);
        assert_ne!(out, 0);
        assert_eq!(slow_compute(1 << 63, 1), out);
    }
}
