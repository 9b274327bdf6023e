//! Output formatting for command results.

use owo_colors::OwoColorize;
use phash_rs::{PhashConfig, PhotoStack};
use serde::Serialize;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use crate::cli::args::OutputFormat;

/// Render any serializable payload as JSON or YAML.
fn render_structured<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        OutputFormat::Json | OutputFormat::Table => Ok(serde_json::to_string_pretty(value)?),
    }
}

#[derive(Serialize)]
struct CorrelationReport {
    score: f32,
    length: usize,
}

/// Render a correlation score.
pub fn render_correlation(
    score: f32,
    length: usize,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(format!("{score:.6}")),
        _ => render_structured(&CorrelationReport { score, length }, format),
    }
}

#[derive(Serialize)]
struct DistanceReport {
    distance: u32,
    similarity: f32,
}

/// Render a Hamming distance.
pub fn render_distance(
    distance: u32,
    similarity: f32,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(distance.to_string()),
        _ => render_structured(
            &DistanceReport {
                distance,
                similarity,
            },
            format,
        ),
    }
}

/// Row used when printing stacks as a table.
#[derive(Tabled)]
struct StackRow {
    #[tabled(rename = "Stack")]
    stack: usize,
    #[tabled(rename = "Size")]
    size: usize,
    #[tabled(rename = "Members")]
    members: String,
    #[tabled(rename = "Max Distance")]
    max_distance: String,
    #[tabled(rename = "Min Correlation")]
    min_correlation: String,
}

/// Render grouped stacks.
pub fn render_stacks(stacks: &[PhotoStack], format: OutputFormat) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render_structured(&stacks, format);
    }

    if stacks.is_empty() {
        return Ok(format!("{}", "No near-duplicate stacks found".dimmed()));
    }

    let rows: Vec<StackRow> = stacks
        .iter()
        .enumerate()
        .map(|(index, stack)| StackRow {
            stack: index + 1,
            size: stack.len(),
            members: stack.members.join(", "),
            max_distance: stack
                .max_distance
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
            min_correlation: stack
                .min_correlation
                .map_or_else(|| "-".to_string(), |c| format!("{c:.4}")),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    Ok(table.to_string())
}

/// Row used for key/value summaries.
#[derive(Tabled)]
struct SettingRow {
    #[tabled(rename = "Setting")]
    setting: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn settings_table(rows: Vec<(&str, String)>) -> String {
    let rows: Vec<SettingRow> = rows
        .into_iter()
        .map(|(setting, value)| SettingRow {
            setting: setting.to_string(),
            value,
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    table.to_string()
}

/// Summarize the thresholds of a configuration.
pub fn render_config_summary(config: &PhashConfig, detailed: bool) -> String {
    let mut rows = vec![
        (
            "Correlation threshold",
            format!("{:.3}", config.similarity.correlation_threshold),
        ),
        (
            "Max Hamming distance",
            config.similarity.max_hamming_distance.to_string(),
        ),
        ("Match mode", format!("{:?}", config.similarity.mode).to_lowercase()),
    ];

    if detailed {
        rows.push((
            "Include singletons",
            config.similarity.include_singletons.to_string(),
        ));
        rows.push((
            "Max threads",
            config
                .performance
                .max_threads
                .map_or_else(|| "auto".to_string(), |t| t.to_string()),
        ));
        rows.push(("Parallel scoring", config.performance.parallel.to_string()));
    }

    settings_table(rows)
}

/// Describe the build's popcount strategy and features.
pub fn render_capabilities(
    strategy: &str,
    cpu_popcount: bool,
    simd: bool,
    parallel: bool,
) -> String {
    settings_table(vec![
        ("Version", phash_rs::VERSION.to_string()),
        ("Popcount strategy", strategy.to_string()),
        ("CPU popcount instruction", cpu_popcount.to_string()),
        ("SIMD feature", simd.to_string()),
        ("Parallel feature", parallel.to_string()),
    ])
}
