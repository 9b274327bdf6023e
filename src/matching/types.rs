//! Data types exchanged with callers of the matcher.

use serde::{Deserialize, Deserializer, Serialize};

/// Features already extracted from one photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoFingerprint {
    /// Caller-assigned identifier, unique within a batch
    pub id: String,

    /// 64-bit perceptual hash; signed input keeps its two's-complement bits
    #[serde(
        default,
        deserialize_with = "deserialize_hash",
        skip_serializing_if = "Option::is_none"
    )]
    pub hash: Option<u64>,

    /// Quantized transform coefficients for one row
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coefficients: Vec<u8>,
}

impl PhotoFingerprint {
    /// Create a fingerprint with no features attached yet
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            hash: None,
            coefficients: Vec::new(),
        }
    }

    /// Attach a perceptual hash
    pub fn with_hash(mut self, hash: u64) -> Self {
        self.hash = Some(hash);
        self
    }

    /// Attach a coefficient row
    pub fn with_coefficients(mut self, coefficients: impl Into<Vec<u8>>) -> Self {
        self.coefficients = coefficients.into();
        self
    }

    /// Whether the fingerprint carries at least one comparable signal
    pub fn has_signal(&self) -> bool {
        self.hash.is_some() || !self.coefficients.is_empty()
    }
}

/// Accept hashes stored as either unsigned or signed 64-bit integers.
#[allow(clippy::cast_sign_loss)]
fn deserialize_hash<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawHash {
        Unsigned(u64),
        Signed(i64),
    }

    Ok(
        Option::<RawHash>::deserialize(deserializer)?.map(|raw| match raw {
            RawHash::Unsigned(bits) => bits,
            RawHash::Signed(value) => value as u64,
        }),
    )
}

/// Scores for one candidate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairScore {
    /// Id of the earlier photo in the batch
    pub left: String,
    /// Id of the later photo in the batch
    pub right: String,
    /// Batch position of `left`
    pub left_index: usize,
    /// Batch position of `right`
    pub right_index: usize,
    /// Hamming distance, when both photos carry a hash
    pub distance: Option<u32>,
    /// Cross-correlation, when both photos carry coefficients and the mode uses it
    pub correlation: Option<f32>,
    /// Outcome of the duplicate decision
    pub duplicate: bool,
}

/// A group of near-identical photos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoStack {
    /// Member ids in batch order
    pub members: Vec<String>,
    /// Largest Hamming distance among the duplicate pairs joining the stack
    pub max_distance: Option<u32>,
    /// Smallest correlation among the duplicate pairs joining the stack
    pub min_correlation: Option<f32>,
}

impl PhotoStack {
    /// Number of photos in the stack
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the stack has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the stack holds a single unmatched photo
    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }
}
