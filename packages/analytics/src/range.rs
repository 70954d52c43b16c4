//! Date-range filtering of aggregate views.
//!
//! Filtering never fails: an empty or inverted range simply selects
//! nothing. The only fallible step is parsing the bounds a caller sends.

use chrono::{NaiveDate, NaiveDateTime};
use red_light_analytics_models::{DailyTotals, DateRange, IntersectionDailyTotals};

use crate::AnalyticsError;

/// An aggregate view keyed by date that can be sliced to a date range.
pub trait DateKeyed: Sized {
    /// Returns the entries whose date falls within `range` (inclusive).
    #[must_use]
    fn filter_by_range(&self, range: &DateRange) -> Self;
}

impl DateKeyed for DailyTotals {
    fn filter_by_range(&self, range: &DateRange) -> Self {
        if range.is_inverted() {
            return Self::default();
        }
        Self::from_map(
            self.as_map()
                .range(range.start..=range.end)
                .map(|(d, c)| (*d, *c))
                .collect(),
        )
    }
}

impl DateKeyed for IntersectionDailyTotals {
    fn filter_by_range(&self, range: &DateRange) -> Self {
        if range.is_inverted() {
            return Self::default();
        }
        Self::from_map(
            self.as_map()
                .range(range.start..=range.end)
                .map(|(d, by_name)| (*d, by_name.clone()))
                .collect(),
        )
    }
}

/// Slices `view` to the dates within `range`.
#[must_use]
pub fn filter_by_range<V: DateKeyed>(view: &V, range: &DateRange) -> V {
    view.filter_by_range(range)
}

/// Parses a date bound sent by the dashboard's date picker.
///
/// Accepts `YYYY-MM-DD` and `YYYY-MM-DDTHH:MM:SS[.fff]`. Blank input is
/// treated as an absent bound.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidDate`] if the value is neither blank
/// nor in a supported format.
pub fn parse_date_param(value: Option<&str>) -> Result<Option<NaiveDate>, AnalyticsError> {
    let Some(s) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| Some(dt.date()))
        .map_err(|e| AnalyticsError::InvalidDate {
            message: format!("Invalid date '{s}': {e}. Expected format: YYYY-MM-DD"),
        })
}
