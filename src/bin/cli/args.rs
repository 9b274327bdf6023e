//! CLI Argument Structures
//!
//! Command and argument definitions for the phash binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use phash_rs::MatchMode;
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Perceptual fingerprint similarity engine
#[derive(Parser)]
#[command(name = "phash")]
#[command(version = VERSION)]
#[command(about = "Score perceptual fingerprints and group near-duplicate photos")]
#[command(long_about = "
Score coefficient rows and perceptual hashes, and group batches of
fingerprints into stacks of near-identical photos.

Common Usage:

  # Cross-correlation between two coefficient rows
  phash correlate 1,2,3,4,5,6,7,8 2,3,4,5,6,7,8,9

  # Hamming distance between two hashes (decimal, 0x hex or 0b binary)
  phash distance 0xAAAA 0xAAAB

  # Popcount of an already-XORed value
  phash distance 0xFF00

  # Group a JSON batch of fingerprints into stacks
  phash stacks photos.json --format json

  # Show which popcount strategy this build uses
  phash capabilities
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cross-correlation score between two coefficient rows
    Correlate(CorrelateArgs),

    /// Hamming distance between two hashes, or popcount of one
    Distance(DistanceArgs),

    /// Group a batch of fingerprints into near-duplicate stacks
    Stacks(StacksArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Initialize a configuration file with defaults
    #[command(name = "init-config")]
    InitConfig(InitConfigArgs),

    /// Validate a phash configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),

    /// Show popcount strategy and enabled build features
    Capabilities,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text and tables
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

#[derive(Args)]
pub struct CorrelateArgs {
    /// First coefficient row (comma or space separated bytes)
    pub a: String,

    /// Second coefficient row (comma or space separated bytes)
    pub b: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct DistanceArgs {
    /// First hash, or the already-XORed value when no second hash is given
    #[arg(allow_negative_numbers = true)]
    pub x: String,

    /// Second hash
    #[arg(allow_negative_numbers = true)]
    pub y: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct StacksArgs {
    /// JSON or YAML file holding an array of fingerprints
    pub input: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Which signals decide a duplicate (hash, correlation, either, both)
    #[arg(long)]
    pub mode: Option<MatchMode>,

    /// Maximum Hamming distance for a hash match (0-64)
    #[arg(long)]
    pub max_distance: Option<u32>,

    /// Minimum correlation for a coefficient match (0.0-1.0)
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Also list photos that have no duplicate
    #[arg(long)]
    pub include_singletons: bool,

    /// Worker threads for pairwise scoring
    #[arg(long)]
    pub threads: Option<usize>,
}

#[derive(Args)]
pub struct InitConfigArgs {
    /// Output configuration file name
    #[arg(short, long, default_value = "phash.yml")]
    pub output: PathBuf,

    /// Overwrite existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Configuration file to validate
    pub config: PathBuf,

    /// Show detailed configuration breakdown
    #[arg(long)]
    pub detailed: bool,
}
