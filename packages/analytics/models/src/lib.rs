#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregate view types derived from violation records.
//!
//! Views are built once from the cleaned record set and are read-only
//! afterwards; date-range filtering produces new, transient views.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive `[start, end]` date interval.
///
/// A range with `start > end` is inverted and contains no dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First day of the range (inclusive).
    pub start: NaiveDate,
    /// Last day of the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new range. Inverted ranges are allowed and empty.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `start` comes after `end`.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Whether `date` falls within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Fills missing bounds from `span` (the dataset's first and last
    /// dates).
    ///
    /// Returns `None` when a bound is missing and there is no span to take
    /// it from, i.e. the dataset is empty.
    #[must_use]
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        span: Option<Self>,
    ) -> Option<Self> {
        let start = start.or_else(|| span.map(|s| s.start))?;
        let end = end.or_else(|| span.map(|s| s.end))?;
        Some(Self::new(start, end))
    }
}

/// Row-level geographic projection of a record, used for density maps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Violations recorded at this point on its day.
    pub violation_count: u64,
}

/// Total violations per day, ordered by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyTotals(BTreeMap<NaiveDate, u64>);

impl DailyTotals {
    /// Wraps an already-aggregated map.
    #[must_use]
    pub const fn from_map(map: BTreeMap<NaiveDate, u64>) -> Self {
        Self(map)
    }

    /// Borrows the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &BTreeMap<NaiveDate, u64> {
        &self.0
    }

    /// Total for `date`, if any records fell on it.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<u64> {
        self.0.get(&date).copied()
    }

    /// Iterates `(date, total)` pairs in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u64)> + '_ {
        self.0.iter().map(|(d, c)| (*d, *c))
    }

    /// Number of distinct dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the view has no dates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all daily totals, saturating at `u64::MAX`.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().fold(0, |acc, c| acc.saturating_add(*c))
    }

    /// First and last dates present, or `None` if empty.
    #[must_use]
    pub fn span(&self) -> Option<DateRange> {
        let (first, _) = self.0.first_key_value()?;
        let (last, _) = self.0.last_key_value()?;
        Some(DateRange::new(*first, *last))
    }
}

/// Total violations per intersection per day, keyed by date then
/// intersection name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntersectionDailyTotals(BTreeMap<NaiveDate, BTreeMap<String, u64>>);

impl IntersectionDailyTotals {
    /// Wraps an already-aggregated map.
    #[must_use]
    pub const fn from_map(map: BTreeMap<NaiveDate, BTreeMap<String, u64>>) -> Self {
        Self(map)
    }

    /// Borrows the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &BTreeMap<NaiveDate, BTreeMap<String, u64>> {
        &self.0
    }

    /// Total for `intersection` on `date`, if any.
    #[must_use]
    pub fn get(&self, date: NaiveDate, intersection: &str) -> Option<u64> {
        self.0.get(&date)?.get(intersection).copied()
    }

    /// Iterates `(date, intersection, total)` rows, ordered by date then
    /// intersection.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &str, u64)> + '_ {
        self.0.iter().flat_map(|(date, by_name)| {
            by_name
                .iter()
                .map(move |(name, count)| (*date, name.as_str(), *count))
        })
    }

    /// Number of `(date, intersection)` rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    /// Whether the view has no rows. Dates with no intersections count as
    /// empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeMap::is_empty)
    }

    /// Sum over all rows, saturating at `u64::MAX`.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0
            .values()
            .flat_map(BTreeMap::values)
            .fold(0, |acc, c| acc.saturating_add(*c))
    }
}

/// A single `(date, count)` point of a time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// Day of the point.
    pub date: NaiveDate,
    /// Violations on that day.
    pub count: u64,
}

/// Violation total for one intersection over some range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntersectionCount {
    /// Intersection name.
    pub intersection: String,
    /// Violations summed over the range.
    pub count: u64,
}
