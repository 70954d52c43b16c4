//! Cell parsing utilities for violation datasets.
//!
//! Portal exports are inconsistent about date formats, and counts
//! sometimes come back float-formatted from spreadsheet round trips, so
//! each parser accepts the handful of shapes seen in practice.

use chrono::{NaiveDate, NaiveDateTime};

/// Cell values treated as missing, in addition to empty cells.
///
/// Matches the NA markers that spreadsheet and dataframe exports write
/// for absent values.
pub const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a cell holds no value: empty, whitespace, or an NA marker.
#[must_use]
pub fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || NA_TOKENS.contains(&cell)
}

/// Parses a violation date cell, discarding any time-of-day component.
///
/// Accepts `YYYY-MM-DD`, Socrata-style `YYYY-MM-DDTHH:MM:SS[.fff]`, and
/// the portal CSV export's `MM/DD/YYYY`.
#[must_use]
pub fn parse_violation_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.date());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.date());
    }
    NaiveDate::parse_from_str(s, "%m/%d/%Y").ok()
}

/// Parses a coordinate cell. Returns `None` if unparseable or non-finite.
#[must_use]
pub fn parse_coordinate(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a non-negative violation count.
///
/// Integral floats (`"3.0"`) are accepted; fractional or negative values
/// are rejected.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
pub fn parse_count(s: &str) -> Option<u64> {
    let s = s.trim();
    if let Ok(count) = s.parse::<u64>() {
        return Some(count);
    }
    let value = s.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}
