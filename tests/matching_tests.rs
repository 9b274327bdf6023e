//! End-to-end duplicate detection and stack grouping.

use phash_rs::matching::validate_fingerprints;
use phash_rs::{
    MatchMode, PhashConfig, PhotoFingerprint, SimilarityConfig, SimilarityMatcher,
};

fn burst() -> Vec<PhotoFingerprint> {
    vec![
        PhotoFingerprint::new("IMG_0001")
            .with_hash(0xF0F0_F0F0_0000_FFFF)
            .with_coefficients(vec![12, 80, 33, 150, 9, 64, 200, 41]),
        // same shot, exposure nudged up
        PhotoFingerprint::new("IMG_0002")
            .with_hash(0xF0F0_F0F0_0000_FFFE)
            .with_coefficients(vec![22, 90, 43, 160, 19, 74, 210, 51]),
        PhotoFingerprint::new("IMG_0003")
            .with_hash(0x0F0F_0F0F_FFFF_0000)
            .with_coefficients(vec![200, 3, 180, 7, 90, 250, 1, 66]),
        PhotoFingerprint::new("IMG_0004")
            .with_hash(0xF0F0_F0F0_0000_FFF0)
            .with_coefficients(vec![12, 80, 33, 150, 9, 64, 200, 41]),
    ]
}

fn matcher(mode: MatchMode, include_singletons: bool) -> SimilarityMatcher {
    SimilarityMatcher::new(SimilarityConfig {
        correlation_threshold: 0.95,
        max_hamming_distance: 8,
        mode,
        include_singletons,
    })
    .expect("valid thresholds")
}

#[test]
fn burst_shots_form_one_stack() {
    let stacks = matcher(MatchMode::Either, false)
        .group_stacks(&burst())
        .expect("valid batch");

    assert_eq!(stacks.len(), 1);
    assert_eq!(stacks[0].members, vec!["IMG_0001", "IMG_0002", "IMG_0004"]);
    assert_eq!(stacks[0].max_distance, Some(4));
}

#[test]
fn singletons_are_listed_on_request() {
    let stacks = matcher(MatchMode::Either, true)
        .group_stacks(&burst())
        .expect("valid batch");

    assert_eq!(stacks.len(), 2);
    assert_eq!(stacks[1].members, vec!["IMG_0003"]);
    assert!(stacks[1].is_singleton());
}

#[test]
fn both_mode_requires_hash_and_coefficients() {
    let mut photos = burst();
    photos[3].coefficients.clear();

    let stacks = matcher(MatchMode::Both, false)
        .group_stacks(&photos)
        .expect("valid batch");

    assert_eq!(stacks.len(), 1);
    assert_eq!(stacks[0].members, vec!["IMG_0001", "IMG_0002"]);
    let min_correlation = stacks[0].min_correlation.expect("correlation scored");
    assert!((min_correlation - 1.0).abs() < 1e-6);
}

#[test]
fn duplicate_pairs_are_reported_in_batch_order() {
    let pairs = matcher(MatchMode::Hash, false).find_duplicates(&burst());
    let ids: Vec<(&str, &str)> = pairs
        .iter()
        .map(|p| (p.left.as_str(), p.right.as_str()))
        .collect();

    assert_eq!(
        ids,
        vec![
            ("IMG_0001", "IMG_0002"),
            ("IMG_0001", "IMG_0004"),
            ("IMG_0002", "IMG_0004"),
        ]
    );
    assert!(pairs.iter().all(|p| p.correlation.is_none()));
}

#[test]
fn every_pair_is_scored_once() {
    let photos = burst();
    let pairs = matcher(MatchMode::Either, false).score_pairs(&photos);
    assert_eq!(pairs.len(), photos.len() * (photos.len() - 1) / 2);
    assert!(pairs.iter().all(|p| p.left_index < p.right_index));
}

#[test]
fn invalid_batches_are_rejected_before_scoring() {
    let mut photos = burst();
    photos.push(PhotoFingerprint::new("IMG_0001").with_hash(1));

    let err = matcher(MatchMode::Either, false)
        .group_stacks(&photos)
        .unwrap_err();
    assert!(err.to_string().contains("IMG_0001"));
    assert!(validate_fingerprints(&burst()).is_ok());
}

#[test]
fn fingerprints_deserialize_from_json() {
    let json = r#"[
        {"id": "a", "hash": 18446744073709551615},
        {"id": "b", "coefficients": [1, 2, 3]}
    ]"#;
    let photos: Vec<PhotoFingerprint> = serde_json::from_str(json).expect("parse");

    assert_eq!(photos[0].hash, Some(u64::MAX));
    assert!(photos[0].coefficients.is_empty());
    assert_eq!(photos[1].hash, None);
    assert_eq!(photos[1].coefficients, vec![1, 2, 3]);
}

#[test]
fn signed_hashes_keep_their_bit_pattern() {
    let json = r#"[
        {"id": "a", "hash": -1},
        {"id": "b", "hash": -9223372036854775808},
        {"id": "c", "hash": null}
    ]"#;
    let photos: Vec<PhotoFingerprint> = serde_json::from_str(json).expect("parse");
    assert_eq!(photos[0].hash, Some(u64::MAX));
    assert_eq!(photos[1].hash, Some(1u64 << 63));
    assert_eq!(photos[2].hash, None);

    let yaml = "- id: a\n  hash: -2\n- id: b\n  hash: 18446744073709551614\n";
    let photos: Vec<PhotoFingerprint> = serde_yaml::from_str(yaml).expect("parse yaml");
    assert_eq!(photos[0].hash, photos[1].hash);

    let stacks = matcher(MatchMode::Hash, false)
        .group_stacks(&photos)
        .expect("group");
    assert_eq!(stacks.len(), 1);
    assert_eq!(stacks[0].max_distance, Some(0));
}

#[test]
fn matcher_honours_full_configuration() {
    let mut config = PhashConfig::default();
    config.similarity.max_hamming_distance = 0;
    config.similarity.mode = MatchMode::Hash;
    config.performance.parallel = false;

    let stacks = SimilarityMatcher::from_config(&config)
        .expect("valid config")
        .group_stacks(&burst())
        .expect("valid batch");
    assert!(stacks.is_empty());
}
