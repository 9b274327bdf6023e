//! Configuration types and management for phash-rs.
//!
//! The similarity primitives take no configuration; these types drive the
//! matcher that turns scores into duplicate decisions and the resources it
//! may use while doing so.

pub mod validation;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::distance::HASH_BITS;
use crate::core::errors::{PhashError, PhashResultExt, Result};

pub use validation::{validate_at_most_u32, validate_positive_usize, validate_unit_range};

/// Main configuration for the phash matcher
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhashConfig {
    /// Duplicate decision thresholds
    #[serde(default)]
    pub similarity: SimilarityConfig,

    /// Performance and resource limits
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl PhashConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            PhashError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.similarity.validate()?;
        self.performance.validate()?;
        Ok(())
    }
}

/// Which similarity signals decide that two photos are duplicates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Hamming distance between hashes only
    Hash,
    /// Coefficient cross-correlation only
    Correlation,
    /// Any available signal that matches
    #[default]
    Either,
    /// Both signals present and matching
    Both,
}

impl std::str::FromStr for MatchMode {
    type Err = PhashError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hash" => Ok(Self::Hash),
            "correlation" | "corr" => Ok(Self::Correlation),
            "either" | "any" => Ok(Self::Either),
            "both" | "all" => Ok(Self::Both),
            _ => Err(PhashError::parse(
                format!("Unknown match mode: {}", s),
                s,
            )),
        }
    }
}

/// Thresholds applied to correlation scores and hash distances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Minimum cross-correlation score for a coefficient match
    pub correlation_threshold: f32,

    /// Maximum Hamming distance for a hash match
    pub max_hamming_distance: u32,

    /// How the two signals are combined
    #[serde(default)]
    pub mode: MatchMode,

    /// Emit photos without any duplicate as single-member stacks
    #[serde(default)]
    pub include_singletons: bool,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            correlation_threshold: 0.9,
            max_hamming_distance: 10,
            mode: MatchMode::Either,
            include_singletons: false,
        }
    }
}

impl SimilarityConfig {
    /// Validate similarity thresholds
    pub fn validate(&self) -> Result<()> {
        validate_unit_range(self.correlation_threshold, "correlation_threshold")?;
        validate_at_most_u32(self.max_hamming_distance, HASH_BITS, "max_hamming_distance")?;
        Ok(())
    }
}

/// Performance and resource configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Maximum number of worker threads for pairwise scoring
    pub max_threads: Option<usize>,

    /// Score candidate pairs on the rayon pool
    pub parallel: bool,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_threads: None, // Use system default
            parallel: cfg!(feature = "parallel"),
        }
    }
}

impl PerformanceConfig {
    /// Validate performance configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(threads) = self.max_threads {
            validate_positive_usize(threads, "max_threads")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
