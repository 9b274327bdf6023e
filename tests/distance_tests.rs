//! Hamming distance behaviour and popcount strategy agreement.

use phash_rs::core::distance::{
    hamming_similarity, popcount, popcount_hardware, popcount_portable, ACTIVE_POPCOUNT,
};
use phash_rs::{features, hamming_distance, hamming_weight, PopcountStrategy};
use proptest::prelude::*;

/// SplitMix64, enough to sweep a large deterministic sample of bit patterns.
struct SplitMix64(u64);

impl Iterator for SplitMix64 {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        Some(z ^ (z >> 31))
    }
}

#[test]
fn documented_scenarios() {
    assert_eq!(
        hamming_distance(0b1010_1010_1010_1010u64, 0b1010_1010_1010_1011u64),
        1
    );
    assert_eq!(hamming_distance(0u64, 0xFFFF_FFFF_FFFF_FFFFu64), 64);
}

#[test]
fn strategies_agree_on_boundaries_and_single_bits() {
    for v in [0u64, u64::MAX, 1, 1 << 63, 0x00FF_00FF_00FF_00FF] {
        assert_eq!(popcount_portable(v), popcount_hardware(v));
    }
    for bit in 0..64 {
        let v = 1u64 << bit;
        assert_eq!(popcount_portable(v), 1, "bit {bit}");
        assert_eq!(popcount_hardware(v), 1, "bit {bit}");
        assert_eq!(popcount_portable(!v), 63, "bit {bit}");
    }
}

#[test]
fn strategies_agree_on_large_random_sample() {
    for v in SplitMix64(0xDEAD_BEEF).take(1_000_000) {
        assert_eq!(popcount_portable(v), popcount_hardware(v), "value {v:#018x}");
    }
}

#[test]
fn strategies_agree_on_all_16_bit_patterns_at_every_byte_lane() {
    for low in 0..=u16::MAX {
        for shift in [0u32, 16, 32, 48] {
            let v = u64::from(low) << shift;
            assert_eq!(popcount_portable(v), u32::from(low).count_ones());
        }
    }
}

#[test]
fn active_strategy_is_reported() {
    assert_eq!(features::popcount_strategy(), ACTIVE_POPCOUNT);
    if !features::has_simd() {
        assert_eq!(ACTIVE_POPCOUNT, PopcountStrategy::Portable);
    }
}

#[test]
fn signed_and_unsigned_overloads_agree() {
    for v in SplitMix64(7).take(10_000) {
        let signed = v as i64;
        assert_eq!(hamming_weight(signed), hamming_weight(v));
        assert_eq!(hamming_distance(signed, !signed), 64);
    }
}

#[test]
fn similarity_reflects_distance() {
    assert_eq!(hamming_similarity(0u64, 0xFFu64), 1.0 - 8.0 / 64.0);
}

proptest! {
    #[test]
    fn prop_identity_and_complement(x in any::<u64>()) {
        prop_assert_eq!(hamming_distance(x, x), 0);
        prop_assert_eq!(hamming_distance(x, !x), 64);
    }

    #[test]
    fn prop_symmetric(x in any::<u64>(), y in any::<u64>()) {
        prop_assert_eq!(hamming_distance(x, y), hamming_distance(y, x));
    }

    #[test]
    fn prop_triangle_inequality(x in any::<u64>(), y in any::<u64>(), z in any::<u64>()) {
        prop_assert!(hamming_distance(x, z) <= hamming_distance(x, y) + hamming_distance(y, z));
    }

    #[test]
    fn prop_two_argument_form_is_weight_of_xor(x in any::<i64>(), y in any::<i64>()) {
        prop_assert_eq!(hamming_distance(x, y), hamming_weight(x ^ y));
        prop_assert!(hamming_distance(x, y) <= 64);
    }

    #[test]
    fn prop_dispatch_matches_both_strategies(v in any::<u64>()) {
        prop_assert_eq!(popcount(v), popcount_portable(v));
        prop_assert_eq!(popcount(v), popcount_hardware(v));
    }
}
