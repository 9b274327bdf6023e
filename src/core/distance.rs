//! Hamming distance between fixed-width perceptual hashes.
//!
//! Two popcount strategies sit behind [`popcount`]: the native instruction
//! and a portable SWAR reduction. Which one is compiled in is decided by the
//! build (`simd` feature plus target support); both return the exact number
//! of set bits for every 64-bit pattern.

use serde::{Deserialize, Serialize};

/// Number of bits in a [`HashBits`] pattern.
pub const HASH_BITS: u32 = 64;

const M1: u64 = 0x5555_5555_5555_5555;
const M2: u64 = 0x3333_3333_3333_3333;
const M4: u64 = 0x0F0F_0F0F_0F0F_0F0F;
const H01: u64 = 0x0101_0101_0101_0101;

/// Fixed-width integers that can be compared as raw bit patterns.
///
/// Signed values keep their two's-complement bits at their own width, so
/// `-1i32` carries 32 set bits rather than 64.
pub trait HashBits: Copy {
    /// The value's bit pattern, zero-extended to 64 bits.
    fn to_bits(self) -> u64;
}

impl HashBits for u64 {
    #[inline]
    fn to_bits(self) -> u64 {
        self
    }
}

impl HashBits for i64 {
    #[inline]
    #[allow(clippy::cast_sign_loss)]
    fn to_bits(self) -> u64 {
        self as u64
    }
}

impl HashBits for u32 {
    #[inline]
    fn to_bits(self) -> u64 {
        u64::from(self)
    }
}

impl HashBits for i32 {
    #[inline]
    #[allow(clippy::cast_sign_loss)]
    fn to_bits(self) -> u64 {
        u64::from(self as u32)
    }
}

/// Popcount implementation selected for this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopcountStrategy {
    /// Native population-count instruction
    Hardware,
    /// Parallel bit-counting over pairs, nibbles and bytes
    Portable,
}

impl std::fmt::Display for PopcountStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hardware => write!(f, "hardware"),
            Self::Portable => write!(f, "portable"),
        }
    }
}

/// Strategy used by [`popcount`] in this build.
#[cfg(all(
    feature = "simd",
    any(
        all(any(target_arch = "x86_64", target_arch = "x86"), target_feature = "popcnt"),
        target_arch = "aarch64"
    )
))]
pub const ACTIVE_POPCOUNT: PopcountStrategy = PopcountStrategy::Hardware;

/// Strategy used by [`popcount`] in this build.
#[cfg(not(all(
    feature = "simd",
    any(
        all(any(target_arch = "x86_64", target_arch = "x86"), target_feature = "popcnt"),
        target_arch = "aarch64"
    )
)))]
pub const ACTIVE_POPCOUNT: PopcountStrategy = PopcountStrategy::Portable;

/// Number of differing bits between two hashes.
#[inline]
pub fn hamming_distance<T: HashBits>(x: T, y: T) -> u32 {
    popcount(x.to_bits() ^ y.to_bits())
}

/// Number of set bits in a value that has already been XORed.
#[inline]
pub fn hamming_weight<T: HashBits>(v: T) -> u32 {
    popcount(v.to_bits())
}

/// Fraction of agreeing bits between two 64-bit hashes, in `[0, 1]`.
#[allow(clippy::cast_precision_loss)]
pub fn hamming_similarity<T: HashBits>(x: T, y: T) -> f32 {
    1.0 - hamming_distance(x, y) as f32 / HASH_BITS as f32
}

/// Count set bits using the strategy compiled into this build.
#[inline]
pub fn popcount(v: u64) -> u32 {
    match ACTIVE_POPCOUNT {
        PopcountStrategy::Hardware => popcount_hardware(v),
        PopcountStrategy::Portable => popcount_portable(v),
    }
}

/// Native population count.
#[inline]
pub fn popcount_hardware(v: u64) -> u32 {
    v.count_ones()
}

/// Branch-free popcount: sum adjacent bit pairs, then nibbles, then bytes,
/// and fold the byte counts with a single multiply.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn popcount_portable(v: u64) -> u32 {
    let v = v - ((v >> 1) & M1);
    let v = (v & M2) + ((v >> 2) & M2);
    let v = (v + (v >> 4)) & M4;
    (v.wrapping_mul(H01) >> 56) as u32
}

/// Whether the running CPU advertises a population-count instruction.
///
/// Informational only; [`popcount`] is fixed at build time.
pub fn hardware_popcount_detected() -> bool {
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    {
        is_x86_feature_detected!("popcnt")
    }

    #[cfg(target_arch = "aarch64")]
    {
        true
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
    {
        false
    }
}
