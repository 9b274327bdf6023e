//! Normalized circular cross-correlation between coefficient rows.
//!
//! Each input row is centered on its own mean, then the second row is
//! circularly shifted against the first for every offset in `0..L`. The
//! per-offset statistic is the squared cosine between the centered rows
//! (floored to zero for anti-correlated alignments) and the score is the
//! square root of the best offset.
//!
//! Rows of different lengths are compared on their common prefix. A row with
//! zero variance scores `0.0` against everything, itself included.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

#[cfg(feature = "simd")]
use wide::f32x4;

use crate::core::errors::{PhashError, Result};

/// Sequence length from which the offset search is spread across the rayon pool.
pub const PARALLEL_OFFSET_THRESHOLD: usize = 256;

/// Shortest contiguous run that is accumulated with 4-lane vectors.
#[cfg(feature = "simd")]
const SIMD_MIN_RUN: usize = 16;

/// Score two coefficient rows, truncating both to the shorter length.
///
/// The score is symmetric up to float rounding: swapping `a` and `b` walks
/// the same products in a different order, so the two results can differ in
/// the last few bits.
///
/// # Panics
///
/// Panics if either row is empty. Use [`try_cross_correlation`] for input that
/// has not been checked yet.
pub fn cross_correlation(a: &[u8], b: &[u8]) -> f32 {
    cross_correlation_prefix(a, b, a.len().min(b.len()))
}

/// Score the first `length` elements of two coefficient buffers.
///
/// # Panics
///
/// Panics if `length` is zero or exceeds either buffer.
pub fn cross_correlation_prefix(a: &[u8], b: &[u8], length: usize) -> f32 {
    assert!(
        length > 0,
        "cross-correlation requires non-empty coefficient sequences"
    );
    assert!(
        length <= a.len() && length <= b.len(),
        "prefix length {length} exceeds coefficient buffers ({} and {})",
        a.len(),
        b.len()
    );

    let x = center(&a[..length]);
    let y = center(&b[..length]);
    let score = centered_correlation(&x, &y);

    trace!(length, score, "cross-correlation computed");
    score
}

/// Checked variant of [`cross_correlation`] that reports empty input as an error.
pub fn try_cross_correlation(a: &[u8], b: &[u8]) -> Result<f32> {
    if a.is_empty() {
        return Err(PhashError::validation_field(
            "coefficient sequence must not be empty",
            "a",
        ));
    }
    if b.is_empty() {
        return Err(PhashError::validation_field(
            "coefficient sequence must not be empty",
            "b",
        ));
    }
    Ok(cross_correlation(a, b))
}

/// Subtract the arithmetic mean of `values` from every element.
#[allow(clippy::cast_precision_loss)]
pub fn center(values: &[u8]) -> Vec<f32> {
    if values.is_empty() {
        return Vec::new();
    }

    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    let mean = sum as f32 / values.len() as f32;

    values.iter().map(|&v| f32::from(v) - mean).collect()
}

/// Best-offset score for two centered sequences of equal length.
///
/// The result is clamped to `1.0` so float rounding in the per-offset ratio
/// cannot push the score past the Cauchy-Schwarz bound.
pub fn centered_correlation(x: &[f32], y: &[f32]) -> f32 {
    assert_eq!(
        x.len(),
        y.len(),
        "centered sequences must have equal length"
    );

    best_offset_statistic(x, y).sqrt().min(1.0)
}

fn best_offset_statistic(x: &[f32], y: &[f32]) -> f32 {
    #[cfg(feature = "parallel")]
    if x.len() >= PARALLEL_OFFSET_THRESHOLD {
        return (0..x.len())
            .into_par_iter()
            .map(|offset| correlation_for_offset(x, y, offset))
            .reduce(|| 0.0, f32::max);
    }

    (0..x.len())
        .map(|offset| correlation_for_offset(x, y, offset))
        .fold(0.0, f32::max)
}

/// Squared-cosine statistic with `y` circularly shifted by `offset` against `x`.
///
/// Position `i` of `x` is paired with `(i + offset) % L` of `y`, walked as two
/// non-wrapping runs.
///
/// # Panics
///
/// Panics if the sequences differ in length or `offset >= x.len()`.
pub fn correlation_for_offset(x: &[f32], y: &[f32], offset: usize) -> f32 {
    assert_eq!(x.len(), y.len(), "centered sequences must have equal length");
    assert!(
        offset < x.len(),
        "offset {offset} out of range for length {}",
        x.len()
    );

    let split = x.len() - offset;
    let mut sums = OffsetSums::default();
    sums.accumulate(&x[..split], &y[offset..]);
    sums.accumulate(&x[split..], &y[..offset]);
    sums.statistic()
}

/// Running sums for a single offset.
#[derive(Debug, Default, Clone, Copy)]
struct OffsetSums {
    num: f32,
    denx: f32,
    deny: f32,
}

impl OffsetSums {
    fn accumulate(&mut self, xs: &[f32], ys: &[f32]) {
        debug_assert_eq!(xs.len(), ys.len());

        #[cfg(feature = "simd")]
        if xs.len() >= SIMD_MIN_RUN {
            self.accumulate_simd(xs, ys);
            return;
        }

        self.accumulate_scalar(xs, ys);
    }

    fn accumulate_scalar(&mut self, xs: &[f32], ys: &[f32]) {
        for (&dx, &dy) in xs.iter().zip(ys) {
            self.num += dx * dy;
            self.denx += dx * dx;
            self.deny += dy * dy;
        }
    }

    #[cfg(feature = "simd")]
    fn accumulate_simd(&mut self, xs: &[f32], ys: &[f32]) {
        let x_chunks = xs.chunks_exact(4);
        let y_chunks = ys.chunks_exact(4);
        let (x_tail, y_tail) = (x_chunks.remainder(), y_chunks.remainder());

        let mut num = f32x4::splat(0.0);
        let mut denx = f32x4::splat(0.0);
        let mut deny = f32x4::splat(0.0);

        for (cx, cy) in x_chunks.zip(y_chunks) {
            let vx = f32x4::from([cx[0], cx[1], cx[2], cx[3]]);
            let vy = f32x4::from([cy[0], cy[1], cy[2], cy[3]]);
            num = num + vx * vy;
            denx = denx + vx * vx;
            deny = deny + vy * vy;
        }

        self.num += num.to_array().iter().sum::<f32>();
        self.denx += denx.to_array().iter().sum::<f32>();
        self.deny += deny.to_array().iter().sum::<f32>();

        self.accumulate_scalar(x_tail, y_tail);
    }

    #[allow(clippy::float_cmp)]
    fn statistic(self) -> f32 {
        if self.num < 0.0 || self.denx == 0.0 || self.deny == 0.0 {
            0.0
        } else {
            self.num * self.num / (self.denx * self.deny)
        }
    }
}
