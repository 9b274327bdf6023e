//! Grouping duplicate pairs into stacks.

use indexmap::IndexMap;
use petgraph::unionfind::UnionFind;
use tracing::debug;

use super::types::{PairScore, PhotoFingerprint, PhotoStack};

#[derive(Debug, Default, Clone, Copy)]
struct EdgeBounds {
    max_distance: Option<u32>,
    min_correlation: Option<f32>,
}

impl EdgeBounds {
    fn absorb(&mut self, pair: &PairScore) {
        if let Some(distance) = pair.distance {
            self.max_distance = Some(self.max_distance.map_or(distance, |d| d.max(distance)));
        }
        if let Some(correlation) = pair.correlation {
            self.min_correlation = Some(
                self.min_correlation
                    .map_or(correlation, |c| c.min(correlation)),
            );
        }
    }
}

/// Merge photos connected by duplicate pairs into stacks.
///
/// Stacks are ordered by the batch position of their first member and list
/// members in batch order. Pairs whose indices fall outside `fingerprints`
/// are ignored.
pub fn build_stacks(
    fingerprints: &[PhotoFingerprint],
    pairs: &[PairScore],
    include_singletons: bool,
) -> Vec<PhotoStack> {
    let count = fingerprints.len();
    let mut sets = UnionFind::<usize>::new(count);

    let duplicates: Vec<&PairScore> = pairs
        .iter()
        .filter(|pair| pair.duplicate)
        .filter(|pair| {
            let in_range = pair.left_index < count && pair.right_index < count;
            if !in_range {
                debug!(
                    left = pair.left_index,
                    right = pair.right_index,
                    "Skipping pair outside the fingerprint batch"
                );
            }
            in_range
        })
        .collect();

    for pair in &duplicates {
        sets.union(pair.left_index, pair.right_index);
    }

    let mut groups: IndexMap<usize, Vec<usize>> = IndexMap::new();
    for index in 0..count {
        groups.entry(sets.find(index)).or_default().push(index);
    }

    let mut bounds: IndexMap<usize, EdgeBounds> = IndexMap::new();
    for pair in &duplicates {
        bounds
            .entry(sets.find(pair.left_index))
            .or_default()
            .absorb(pair);
    }

    groups
        .into_iter()
        .filter(|(_, members)| include_singletons || members.len() > 1)
        .map(|(root, members)| {
            let edge = bounds.get(&root).copied().unwrap_or_default();
            PhotoStack {
                members: members
                    .into_iter()
                    .map(|index| fingerprints[index].id.clone())
                    .collect(),
                max_distance: edge.max_distance,
                min_correlation: edge.min_correlation,
            }
        })
        .collect()
}
