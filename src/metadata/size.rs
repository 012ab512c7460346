//! Byte-size parsing, unit conversion, and human-readable formatting.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder shown when no size is known.
pub const UNKNOWN_SIZE: &str = "Unknown size";

/// Default size used when an extension has no entry in the static table.
pub const FALLBACK_DEFAULT_SIZE: u64 = 100 * 1024;

/// Units displayed by [`human_file_size`], smallest first.
const DISPLAY_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// `<number><unit>` with optional thousands separators and decimals.
///
/// The number must start a word, and a bare `B` needs a space before it, so
/// labels like "Appendix 2B" or "A4B" are not sizes.
#[allow(clippy::expect_used)]
static SIZE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,3}(?:,\d{3})+|\d+)(?:\.(\d+))?(?:\s*(bytes|[kmgt]b)|\s+(b))\b")
        .expect("size regex is valid")
});

/// How an estimated size was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeSource {
    /// Measured with a network probe.
    Exact,
    /// Read from page markup.
    Heuristic,
    /// Taken from the per-extension default table.
    Default,
}

/// Units accepted in size text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    /// `B` or `bytes`.
    Bytes,
    /// `KB` (2^10 bytes).
    Kilobytes,
    /// `MB` (2^20 bytes).
    Megabytes,
    /// `GB` (2^30 bytes).
    Gigabytes,
    /// `TB` (2^40 bytes).
    Terabytes,
}

impl SizeUnit {
    /// Parses a unit label case-insensitively.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "b" | "bytes" => Some(Self::Bytes),
            "kb" => Some(Self::Kilobytes),
            "mb" => Some(Self::Megabytes),
            "gb" => Some(Self::Gigabytes),
            "tb" => Some(Self::Terabytes),
            _ => None,
        }
    }

    /// Bytes per unit, as a power of 1024.
    #[must_use]
    pub fn multiplier(self) -> u64 {
        match self {
            Self::Bytes => 1,
            Self::Kilobytes => 1 << 10,
            Self::Megabytes => 1 << 20,
            Self::Gigabytes => 1 << 30,
            Self::Terabytes => 1 << 40,
        }
    }
}

/// Converts `value` in `unit` to bytes, rounded to the nearest integer.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn to_bytes(value: f64, unit: SizeUnit) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value * unit.multiplier() as f64).round() as u64
}

/// Finds the first `<number><unit>` in `text` and returns it in bytes.
///
/// Zero sizes are treated as "not found".
#[must_use]
pub fn parse_size_text(text: &str) -> Option<u64> {
    let caps = SIZE_PATTERN.captures(text)?;
    let integer = caps.get(1)?.as_str().replace(',', "");
    let number = match caps.get(2) {
        Some(fraction) => format!("{integer}.{}", fraction.as_str()),
        None => integer,
    };
    let value: f64 = number.parse().ok()?;
    let unit = SizeUnit::parse(caps.get(3).or_else(|| caps.get(4))?.as_str())?;
    let bytes = to_bytes(value, unit);
    (bytes > 0).then_some(bytes)
}

/// Parses a size attribute value: a plain byte count or size text.
#[must_use]
pub fn parse_size_attribute(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed.parse::<u64>().ok().filter(|bytes| *bytes > 0);
    }
    parse_size_text(trimmed)
}

/// Formats a byte count with one decimal in the largest unit keeping the
/// magnitude at least 1. `None` and zero render as [`UNKNOWN_SIZE`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn human_file_size(bytes: Option<u64>) -> String {
    let Some(bytes) = bytes.filter(|b| *b > 0) else {
        return UNKNOWN_SIZE.to_string();
    };
    let mut size = bytes as f64;
    let mut unit_index = 0;
    while size >= 1024.0 && unit_index < DISPLAY_UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }
    format!("{size:.1} {}", DISPLAY_UNITS[unit_index])
}

/// Plausible size for a file of the given extension.
#[must_use]
pub fn default_size_for_extension(extension: &str) -> u64 {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    match extension.to_ascii_lowercase().as_str() {
        "pdf" => 500 * KB,
        "doc" | "rtf" => 100 * KB,
        "docx" | "odt" => 80 * KB,
        "xls" => 120 * KB,
        "xlsx" | "ods" => 60 * KB,
        "ppt" => 1536 * KB,
        "pptx" | "odp" => MB,
        "txt" | "csv" => 50 * KB,
        "zip" => 2 * MB,
        "jpg" | "jpeg" => 200 * KB,
        "png" => 150 * KB,
        "gif" => 80 * KB,
        "svg" => 20 * KB,
        "mp3" => 5 * MB,
        "wav" => 20 * MB,
        "mp4" => 25 * MB,
        "avi" | "mov" => 30 * MB,
        _ => FALLBACK_DEFAULT_SIZE,
    }
}
