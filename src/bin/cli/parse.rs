//! Parsing of hash literals and coefficient lists given on the command line.

use phash_rs::{PhashError, Result};

/// Parse a 64-bit hash written in decimal, `0x` hex or `0b` binary.
///
/// Negative decimal values are taken as `i64` and keep their two's-complement
/// bit pattern. Underscore separators are accepted.
#[allow(clippy::cast_sign_loss)]
pub fn parse_hash(raw: &str) -> Result<u64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();

    let parsed = if let Some(hex) = lower.strip_prefix("0x") {
        u64::from_str_radix(hex, 16)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u64::from_str_radix(bin, 2)
    } else if lower.starts_with('-') {
        lower.parse::<i64>().map(|v| v as u64)
    } else {
        lower.parse::<u64>()
    };

    parsed.map_err(|e| PhashError::parse(format!("Invalid hash '{raw}': {e}"), raw))
}

/// Parse a coefficient row such as `1,2,3` or `"1 2 3"`.
pub fn parse_coefficients(raw: &str) -> Result<Vec<u8>> {
    let coefficients = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<u8>().map_err(|e| {
                PhashError::parse(format!("Invalid coefficient '{token}': {e}"), raw)
            })
        })
        .collect::<Result<Vec<u8>>>()?;

    if coefficients.is_empty() {
        return Err(PhashError::validation(
            "coefficient sequence must not be empty",
        ));
    }
    Ok(coefficients)
}
