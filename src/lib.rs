//! # phash-rs: Perceptual Fingerprint Similarity Engine
//!
//! Similarity scoring for fingerprints that were already extracted from
//! images, used to find near-duplicate photos and group a photo stream into
//! stacks of near-identical shots. The library provides:
//!
//! - **Cross-correlation**: normalized, offset-searched correlation between
//!   two rows of quantized transform coefficients
//! - **Hamming distance**: bit distance between 64-bit perceptual hashes with
//!   a hardware and a portable popcount that agree on every input
//! - **Matching**: pairwise duplicate decisions and stack grouping on top of
//!   the two primitives
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 phash CLI                    │
//! ├──────────────────────────────────────────────┤
//! │   Matching            │   Core               │
//! │ • SimilarityMatcher   │ • Correlation        │
//! │ • Stacks              │ • Distance           │
//! │                       │ • Config / Errors    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use phash_rs::{cross_correlation, hamming_distance};
//!
//! let score = cross_correlation(&[1, 2, 3, 4, 5, 6, 7, 8], &[2, 3, 4, 5, 6, 7, 8, 9]);
//! assert!((score - 1.0).abs() < 1e-6);
//!
//! assert_eq!(hamming_distance(0u64, u64::MAX), 64);
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Memory allocator selection (mutually exclusive)
#[cfg(all(feature = "mimalloc", not(feature = "jemalloc")))]
#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[cfg(all(feature = "jemalloc", not(feature = "mimalloc")))]
#[global_allocator]
static ALLOC: jemallocator::Jemalloc = jemallocator::Jemalloc;

// Similarity primitives and shared infrastructure
pub mod core {
    //! Similarity primitives, configuration and error types.

    pub mod config;
    pub mod correlation;
    pub mod distance;
    pub mod errors;
}

// Duplicate detection over batches of fingerprints
pub mod matching;

// Re-export primary types for convenience
pub use crate::core::config::{MatchMode, PhashConfig, SimilarityConfig};
pub use crate::core::correlation::{cross_correlation, cross_correlation_prefix, try_cross_correlation};
pub use crate::core::distance::{hamming_distance, hamming_weight, HashBits, PopcountStrategy};
pub use crate::core::errors::{PhashError, PhashResultExt, Result};
pub use matching::{PairScore, PhotoFingerprint, PhotoStack, SimilarityMatcher};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build-time feature detection
pub mod features {
    //! Runtime feature detection.

    /// Check if SIMD acceleration (vector accumulation, hardware popcount) is enabled
    pub const fn has_simd() -> bool {
        cfg!(feature = "simd")
    }

    /// Check if parallel processing is enabled
    pub const fn has_parallel() -> bool {
        cfg!(feature = "parallel")
    }

    /// Popcount strategy compiled into this build
    pub const fn popcount_strategy() -> crate::core::distance::PopcountStrategy {
        crate::core::distance::ACTIVE_POPCOUNT
    }
}
