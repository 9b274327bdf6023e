//! Pairwise duplicate detection over a batch of photo fingerprints.
//!
//! The matcher only orchestrates the two similarity primitives: it decides
//! which signals are available for a pair, applies the configured thresholds
//! and hands duplicate pairs to [`build_stacks`].

pub mod stacks;
pub mod types;

use std::collections::HashSet;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use crate::core::config::{MatchMode, PhashConfig, SimilarityConfig};
use crate::core::correlation::cross_correlation;
use crate::core::distance::hamming_distance;
use crate::core::errors::{PhashError, Result};

pub use stacks::build_stacks;
pub use types::{PairScore, PhotoFingerprint, PhotoStack};

/// Scores photo pairs and decides which ones are duplicates.
#[derive(Debug, Clone)]
pub struct SimilarityMatcher {
    config: SimilarityConfig,
    parallel: bool,
}

impl SimilarityMatcher {
    /// Create a matcher from validated similarity thresholds.
    pub fn new(config: SimilarityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            parallel: cfg!(feature = "parallel"),
        })
    }

    /// Create a matcher from a full configuration.
    pub fn from_config(config: &PhashConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.similarity.clone(),
            parallel: config.performance.parallel,
        })
    }

    /// Toggle scoring pairs on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Thresholds in use.
    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Score a single pair outside of a batch.
    pub fn compare(&self, left: &PhotoFingerprint, right: &PhotoFingerprint) -> PairScore {
        self.compare_indexed(0, left, 1, right)
    }

    fn compare_indexed(
        &self,
        left_index: usize,
        left: &PhotoFingerprint,
        right_index: usize,
        right: &PhotoFingerprint,
    ) -> PairScore {
        let distance = match (left.hash, right.hash) {
            (Some(x), Some(y)) => Some(hamming_distance(x, y)),
            _ => None,
        };

        let wants_correlation = self.config.mode != MatchMode::Hash;
        let correlation = (wants_correlation
            && !left.coefficients.is_empty()
            && !right.coefficients.is_empty())
        .then(|| cross_correlation(&left.coefficients, &right.coefficients));

        PairScore {
            left: left.id.clone(),
            right: right.id.clone(),
            left_index,
            right_index,
            distance,
            correlation,
            duplicate: self.is_duplicate(distance, correlation),
        }
    }

    /// Apply the configured thresholds to whichever signals are present.
    ///
    /// A missing signal never counts as a match.
    pub fn is_duplicate(&self, distance: Option<u32>, correlation: Option<f32>) -> bool {
        let hash_match = distance.is_some_and(|d| d <= self.config.max_hamming_distance);
        let correlation_match =
            correlation.is_some_and(|c| c >= self.config.correlation_threshold);

        match self.config.mode {
            MatchMode::Hash => hash_match,
            MatchMode::Correlation => correlation_match,
            MatchMode::Either => hash_match || correlation_match,
            MatchMode::Both => hash_match && correlation_match,
        }
    }

    /// Score every `i < j` pair in batch order.
    pub fn score_pairs(&self, fingerprints: &[PhotoFingerprint]) -> Vec<PairScore> {
        let score_row = |i: usize| -> Vec<PairScore> {
            ((i + 1)..fingerprints.len())
                .map(|j| self.compare_indexed(i, &fingerprints[i], j, &fingerprints[j]))
                .collect()
        };

        #[cfg(feature = "parallel")]
        if self.parallel {
            return (0..fingerprints.len())
                .into_par_iter()
                .flat_map_iter(score_row)
                .collect();
        }

        (0..fingerprints.len()).flat_map(score_row).collect()
    }

    /// Duplicate pairs only, in batch order.
    pub fn find_duplicates(&self, fingerprints: &[PhotoFingerprint]) -> Vec<PairScore> {
        let duplicates: Vec<PairScore> = self
            .score_pairs(fingerprints)
            .into_iter()
            .filter(|pair| pair.duplicate)
            .collect();

        debug!(
            photos = fingerprints.len(),
            duplicates = duplicates.len(),
            "Duplicate search completed"
        );
        duplicates
    }

    /// Validate a batch, score it and merge duplicates into stacks.
    pub fn group_stacks(&self, fingerprints: &[PhotoFingerprint]) -> Result<Vec<PhotoStack>> {
        validate_fingerprints(fingerprints)?;

        let start = Instant::now();
        let duplicates = self.find_duplicates(fingerprints);
        let stacks = build_stacks(fingerprints, &duplicates, self.config.include_singletons);

        info!(
            photos = fingerprints.len(),
            duplicates = duplicates.len(),
            stacks = stacks.len(),
            elapsed = ?start.elapsed(),
            "Grouped photos into stacks"
        );
        Ok(stacks)
    }
}

/// Reject batches with blank or repeated ids and photos without any signal.
pub fn validate_fingerprints(fingerprints: &[PhotoFingerprint]) -> Result<()> {
    let mut seen = HashSet::with_capacity(fingerprints.len());

    for (index, fingerprint) in fingerprints.iter().enumerate() {
        if fingerprint.id.trim().is_empty() {
            return Err(PhashError::validation_field(
                format!("fingerprint at position {index} has an empty id"),
                "id",
            ));
        }
        if !seen.insert(fingerprint.id.as_str()) {
            return Err(PhashError::validation_field(
                format!("duplicate fingerprint id '{}'", fingerprint.id),
                "id",
            ));
        }
        if !fingerprint.has_signal() {
            return Err(PhashError::validation(format!(
                "fingerprint '{}' has neither a hash nor coefficients",
                fingerprint.id
            )));
        }
    }

    Ok(())
}
