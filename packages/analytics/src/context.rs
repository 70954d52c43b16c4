//! Immutable dashboard context.
//!
//! The dataset is loaded and aggregated exactly once at startup; request
//! handlers receive a shared reference to the resulting
//! [`DashboardContext`] and only ever read from it.

use red_light_analytics_models::{DailyTotals, DateRange, GeoPoint, IntersectionDailyTotals};
use red_light_violation_models::{MapCenter, ViolationRecord};

use crate::aggregate::{build_daily_totals, build_geo_points, build_intersection_totals};

/// Pre-aggregated views of one loaded dataset.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    source_name: String,
    map_center: MapCenter,
    record_count: usize,
    points: Vec<GeoPoint>,
    daily: DailyTotals,
    by_intersection: IntersectionDailyTotals,
}

impl DashboardContext {
    /// Aggregates `records` into every view the dashboard serves.
    #[must_use]
    pub fn from_records(
        source_name: impl Into<String>,
        map_center: MapCenter,
        records: &[ViolationRecord],
    ) -> Self {
        let context = Self {
            source_name: source_name.into(),
            map_center,
            record_count: records.len(),
            points: build_geo_points(records),
            daily: build_daily_totals(records),
            by_intersection: build_intersection_totals(records),
        };

        log::info!(
            "Aggregated {} records into {} days and {} intersection-days",
            context.record_count,
            context.daily.len(),
            context.by_intersection.len()
        );

        context
    }

    /// Human-readable dataset name.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Where map views are centered.
    #[must_use]
    pub const fn map_center(&self) -> MapCenter {
        self.map_center
    }

    /// Number of cleaned records the views were built from.
    #[must_use]
    pub const fn record_count(&self) -> usize {
        self.record_count
    }

    /// Row-level points for the density map.
    #[must_use]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Per-day totals.
    #[must_use]
    pub const fn daily(&self) -> &DailyTotals {
        &self.daily
    }

    /// Per-day, per-intersection totals.
    #[must_use]
    pub const fn by_intersection(&self) -> &IntersectionDailyTotals {
        &self.by_intersection
    }

    /// First and last dates in the dataset.
    #[must_use]
    pub fn span(&self) -> Option<DateRange> {
        self.daily.span()
    }

    /// Resolves optional request bounds against the dataset span.
    #[must_use]
    pub fn resolve_range(
        &self,
        start: Option<chrono::NaiveDate>,
        end: Option<chrono::NaiveDate>,
    ) -> Option<DateRange> {
        DateRange::resolve(start, end, self.span())
    }
}
