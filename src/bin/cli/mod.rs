//! CLI Module Organization
//!
//! - args: CLI argument structures
//! - commands: command execution
//! - output: table/JSON/YAML rendering
//! - parse: parsing of hashes and coefficient lists

pub mod args;
pub mod commands;
pub mod output;
pub mod parse;

// Re-export commonly used items for convenience
pub use args::*;
pub use commands::*;
