use super::*;
use tempfile::tempdir;

#[test]
fn default_configs_validate_successfully() {
    PhashConfig::default().validate().expect("phash default");
    SimilarityConfig::default()
        .validate()
        .expect("similarity default");
    PerformanceConfig::default()
        .validate()
        .expect("performance default");
}

#[test]
fn similarity_config_rejects_out_of_range_values() {
    let mut config = SimilarityConfig::default();
    config.correlation_threshold = 1.5;
    let err = config.validate().expect_err("threshold above 1");
    assert!(matches!(
        err,
        PhashError::Config { field: Some(ref f), .. } if f == "correlation_threshold"
    ));
    assert!(
        format!("{err}").starts_with("Configuration error: correlation_threshold"),
        "unexpected error message: {err}"
    );

    config.correlation_threshold = 0.8;
    config.max_hamming_distance = 65;
    let err = config.validate().expect_err("distance above 64");
    assert!(
        format!("{err}").contains("max_hamming_distance"),
        "unexpected error message: {err}"
    );

    config.max_hamming_distance = 64;
    assert!(config.validate().is_ok());
}

#[test]
fn performance_config_rejects_zero_threads() {
    let config = PerformanceConfig {
        max_threads: Some(0),
        parallel: true,
    };
    let err = config.validate().expect_err("zero threads");
    assert!(matches!(
        err,
        PhashError::Config { field: Some(ref f), .. } if f == "max_threads"
    ));
}

#[test]
fn match_mode_parses_aliases() {
    assert_eq!("hash".parse::<MatchMode>().unwrap(), MatchMode::Hash);
    assert_eq!("CORR".parse::<MatchMode>().unwrap(), MatchMode::Correlation);
    assert_eq!("any".parse::<MatchMode>().unwrap(), MatchMode::Either);
    assert_eq!("both".parse::<MatchMode>().unwrap(), MatchMode::Both);
    assert!("nearest".parse::<MatchMode>().is_err());
}

#[test]
fn partial_yaml_fills_defaults() {
    let yaml = r#"
similarity:
  correlation_threshold: 0.75
  max_hamming_distance: 6
  mode: both
"#;
    let config: PhashConfig = serde_yaml::from_str(yaml).expect("parse yaml");
    assert_eq!(config.similarity.mode, MatchMode::Both);
    assert_eq!(config.similarity.max_hamming_distance, 6);
    assert!(!config.similarity.include_singletons);
    assert_eq!(config.performance, PerformanceConfig::default());
}

#[test]
fn yaml_file_round_trip() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("phash.yml");

    let mut config = PhashConfig::default();
    config.similarity.include_singletons = true;
    config.performance.max_threads = Some(2);
    config.to_yaml_file(&path).expect("write config");

    let loaded = PhashConfig::from_yaml_file(&path).expect("read config");
    assert_eq!(loaded, config);
}

#[test]
fn missing_config_file_is_io_error() {
    let err = PhashConfig::from_yaml_file("/nonexistent/phash.yml").unwrap_err();
    assert!(matches!(err, PhashError::Io { .. }));
    assert!(
        err.to_string().contains("/nonexistent/phash.yml"),
        "unexpected error message: {err}"
    );
}

#[test]
fn malformed_config_file_names_the_path() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.yml");
    std::fs::write(&path, "similarity: [not, a, map").expect("write config");

    let err = PhashConfig::from_yaml_file(&path).unwrap_err();
    assert!(matches!(
        err,
        PhashError::Serialization { data_type: Some(ref kind), .. } if kind == "YAML"
    ));
    assert!(err.to_string().contains("Failed to parse config file"));
    assert!(err.to_string().contains("broken.yml"));
}
