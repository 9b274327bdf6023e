//! Command Execution Logic
//!
//! Each subcommand loads what it needs, calls into the library and prints
//! the rendered result to stdout. Diagnostics go through tracing to stderr.

use std::path::Path;

use anyhow::{bail, Context};
use owo_colors::OwoColorize;
use phash_rs::core::distance::{hamming_similarity, hardware_popcount_detected};
use phash_rs::{
    features, hamming_distance, hamming_weight, try_cross_correlation, PhashConfig,
    PhotoFingerprint, SimilarityMatcher,
};
use tracing::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::cli::parse::{parse_coefficients, parse_hash};

/// Score two coefficient rows
pub fn correlate_command(args: CorrelateArgs) -> anyhow::Result<()> {
    let a = parse_coefficients(&args.a)?;
    let b = parse_coefficients(&args.b)?;

    if a.len() != b.len() {
        debug!(
            left = a.len(),
            right = b.len(),
            "Coefficient rows differ in length; comparing common prefix"
        );
    }

    let score = try_cross_correlation(&a, &b)?;
    println!(
        "{}",
        render_correlation(score, a.len().min(b.len()), args.format)?
    );
    Ok(())
}

/// Hamming distance between two hashes, or the popcount of one
pub fn distance_command(args: DistanceArgs) -> anyhow::Result<()> {
    let x = parse_hash(&args.x)?;

    let (distance, similarity) = match args.y.as_deref() {
        Some(raw) => {
            let y = parse_hash(raw)?;
            (hamming_distance(x, y), hamming_similarity(x, y))
        }
        None => (hamming_weight(x), hamming_similarity(x, 0u64)),
    };

    println!("{}", render_distance(distance, similarity, args.format)?);
    Ok(())
}

/// Group a batch of fingerprints into stacks
pub async fn stacks_command(args: StacksArgs) -> anyhow::Result<()> {
    let mut config = load_configuration(args.config.as_deref()).await?;
    apply_overrides(&mut config, &args);
    config.validate().context("Invalid similarity settings")?;

    if let Some(threads) = config.performance.max_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let fingerprints = load_fingerprints(&args.input).await?;
    info!(
        photos = fingerprints.len(),
        input = %args.input.display(),
        "Loaded fingerprints"
    );

    let matcher = SimilarityMatcher::from_config(&config)?;
    let stacks = tokio::task::spawn_blocking(move || matcher.group_stacks(&fingerprints))
        .await
        .context("Stack grouping task failed")??;

    println!("{}", render_stacks(&stacks, args.format)?);
    Ok(())
}

fn apply_overrides(config: &mut PhashConfig, args: &StacksArgs) {
    if let Some(mode) = args.mode {
        config.similarity.mode = mode;
    }
    if let Some(max_distance) = args.max_distance {
        config.similarity.max_hamming_distance = max_distance;
    }
    if let Some(threshold) = args.threshold {
        config.similarity.correlation_threshold = threshold;
    }
    if args.include_singletons {
        config.similarity.include_singletons = true;
    }
    if let Some(threads) = args.threads {
        config.performance.max_threads = Some(threads);
    }
}

/// Load configuration from file or fall back to defaults
pub async fn load_configuration(path: Option<&Path>) -> anyhow::Result<PhashConfig> {
    let Some(path) = path else {
        return Ok(PhashConfig::default());
    };

    let path = path.to_path_buf();
    let config = tokio::task::spawn_blocking(move || PhashConfig::from_yaml_file(path))
        .await
        .context("Configuration loading task failed")??;
    Ok(config)
}

/// Read fingerprints as YAML (`.yml`/`.yaml`) or JSON (anything else)
async fn load_fingerprints(path: &Path) -> anyhow::Result<Vec<PhotoFingerprint>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read fingerprints: {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));

    let fingerprints = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML fingerprints: {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON fingerprints: {}", path.display()))?
    };
    Ok(fingerprints)
}

/// Print default configuration
pub fn print_default_config() -> anyhow::Result<()> {
    println!("{}", "# Default phash configuration".dimmed());
    println!("{}", "# Usage: phash stacks --config your-config.yml photos.json".dimmed());
    println!();
    println!("{}", serde_yaml::to_string(&PhashConfig::default())?);
    Ok(())
}

/// Initialize a configuration file with defaults
pub async fn init_config(args: InitConfigArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "Configuration file already exists: {} (use --force to overwrite)",
            args.output.display()
        );
    }

    let output = args.output.clone();
    tokio::task::spawn_blocking(move || PhashConfig::default().to_yaml_file(output))
        .await
        .context("Configuration writing task failed")??;

    println!(
        "{} {}",
        "✅ Configuration saved to:".bright_green().bold(),
        args.output.display().to_string().cyan()
    );
    Ok(())
}

/// Validate a configuration file
pub async fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    let config = load_configuration(Some(args.config.as_path())).await?;
    config
        .validate()
        .with_context(|| format!("Configuration is invalid: {}", args.config.display()))?;

    println!("{}", "✅ Configuration file is valid!".bright_green().bold());
    println!();
    println!("{}", render_config_summary(&config, args.detailed));
    Ok(())
}

/// Report the popcount strategy and enabled features
pub fn capabilities_command() {
    println!(
        "{}",
        render_capabilities(
            &features::popcount_strategy().to_string(),
            hardware_popcount_detected(),
            features::has_simd(),
            features::has_parallel(),
        )
    );
}
