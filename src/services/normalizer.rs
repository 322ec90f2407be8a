//! Field normalization: trimming, timestamp parsing and page-count coercion
//!
//! Nothing in here fails. Malformed input degrades to a neutral value (an
//! empty name, a missing timestamp, zero pages) so a single bad field never
//! aborts a report.

use chrono::NaiveDateTime;

use crate::types::{PrintEntry, RawRecord};

/// Default print timestamp format (`dd/mm/yyyy HH:MM`)
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Group key for a person: surrounding whitespace removed.
///
/// # Examples
/// ```
/// use pagetally::services::normalizer::normalize_name;
///
/// assert_eq!(normalize_name("  Ana Souza "), "Ana Souza");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.trim().to_string()
}

/// Parse a print timestamp, `None` when it does not match `format`.
pub fn parse_timestamp(value: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), format).ok()
}

/// Parse a page count, defaulting to 0.
///
/// Accepts plain integers and integral decimals ("5", "5.0"). Blank,
/// negative, fractional and non-numeric values all coerce to 0.
///
/// # Examples
/// ```
/// use pagetally::services::normalizer::coerce_pages;
///
/// assert_eq!(coerce_pages("5"), 5);
/// assert_eq!(coerce_pages(""), 0);
/// assert_eq!(coerce_pages("abc"), 0);
/// ```
pub fn coerce_pages(value: &str) -> u64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0;
    }
    if let Ok(n) = trimmed.parse::<u64>() {
        return n;
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
            f as u64
        }
        _ => 0,
    }
}

/// Turn a raw log row into a typed entry using `timestamp_format`
pub fn normalize_record(record: &RawRecord, timestamp_format: &str) -> PrintEntry {
    PrintEntry {
        name: normalize_name(&record.full_name),
        color_pages: coerce_pages(&record.color_pages),
        mono_pages: coerce_pages(&record.mono_pages),
        printed_at: parse_timestamp(&record.printed_at, timestamp_format),
    }
}
