//! Builds the aggregate views from cleaned records.
//!
//! Every function here is pure: the same records always produce the same
//! view, and each record lands in exactly one date bucket. Sums saturate
//! at `u64::MAX` instead of overflowing.

use std::collections::BTreeMap;

use red_light_analytics_models::{DailyTotals, GeoPoint, IntersectionDailyTotals};
use red_light_violation_models::ViolationRecord;

/// Projects every record onto its location and count.
#[must_use]
pub fn build_geo_points(records: &[ViolationRecord]) -> Vec<GeoPoint> {
    records
        .iter()
        .map(|r| GeoPoint {
            latitude: r.latitude,
            longitude: r.longitude,
            violation_count: r.violation_count,
        })
        .collect()
}

/// Groups records by date and sums their violation counts.
#[must_use]
pub fn build_daily_totals(records: &[ViolationRecord]) -> DailyTotals {
    let mut by_date: BTreeMap<_, u64> = BTreeMap::new();
    for record in records {
        let total = by_date.entry(record.date).or_default();
        *total = total.saturating_add(record.violation_count);
    }
    DailyTotals::from_map(by_date)
}

/// Groups records by `(date, intersection)` and sums their violation
/// counts.
#[must_use]
pub fn build_intersection_totals(records: &[ViolationRecord]) -> IntersectionDailyTotals {
    let mut by_date: BTreeMap<_, BTreeMap<String, u64>> = BTreeMap::new();
    for record in records {
        let by_name = by_date.entry(record.date).or_default();
        // Only clone the name on first sight.
        if let Some(count) = by_name.get_mut(&record.intersection) {
            *count = count.saturating_add(record.violation_count);
        } else {
            by_name.insert(record.intersection.clone(), record.violation_count);
        }
    }
    IntersectionDailyTotals::from_map(by_date)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate, intersection: &str, count: u64) -> ViolationRecord {
        ViolationRecord::new(date, 41.88, -87.63, intersection, count)
    }

    fn sample() -> Vec<ViolationRecord> {
        vec![
            record(ymd(2020, 1, 2), "A", 1),
            record(ymd(2020, 1, 1), "A", 3),
            record(ymd(2020, 1, 1), "B", 5),
            record(ymd(2020, 1, 2), "A", 4),
            record(ymd(2020, 1, 3), "C", 0),
        ]
    }

    #[test]
    fn daily_totals_sum_per_date() {
        let records = vec![record(ymd(2020, 1, 1), "A", 3), record(ymd(2020, 1, 1), "B", 5)];
        let daily = build_daily_totals(&records);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily.get(ymd(2020, 1, 1)), Some(8));
    }

    #[test]
    fn daily_totals_preserve_overall_sum() {
        let records = sample();
        let expected: u64 = records.iter().map(|r| r.violation_count).sum();
        assert_eq!(build_daily_totals(&records).total(), expected);
    }

    #[test]
    fn daily_totals_are_date_ordered() {
        let dates: Vec<_> = build_daily_totals(&sample()).iter().map(|(d, _)| d).collect();
        assert_eq!(dates, vec![ymd(2020, 1, 1), ymd(2020, 1, 2), ymd(2020, 1, 3)]);
    }

    #[test]
    fn intersection_totals_group_by_date_and_name() {
        let totals = build_intersection_totals(&sample());
        assert_eq!(totals.get(ymd(2020, 1, 1), "A"), Some(3));
        assert_eq!(totals.get(ymd(2020, 1, 1), "B"), Some(5));
        assert_eq!(totals.get(ymd(2020, 1, 2), "A"), Some(5));
        assert_eq!(totals.get(ymd(2020, 1, 2), "B"), None);
        assert_eq!(totals.len(), 4);
        assert_eq!(totals.total(), build_daily_totals(&sample()).total());
    }

    #[test]
    fn sums_saturate_instead_of_overflowing() {
        let records = vec![
            record(ymd(2020, 1, 1), "A", u64::MAX),
            record(ymd(2020, 1, 1), "B", 1),
            record(ymd(2020, 1, 1), "A", 2),
        ];

        let daily = build_daily_totals(&records);
        assert_eq!(daily.get(ymd(2020, 1, 1)), Some(u64::MAX));
        assert_eq!(daily.total(), u64::MAX);

        let totals = build_intersection_totals(&records);
        assert_eq!(totals.get(ymd(2020, 1, 1), "A"), Some(u64::MAX));
        assert_eq!(totals.total(), u64::MAX);
    }

    #[test]
    fn geo_points_keep_one_point_per_record() {
        let points = build_geo_points(&sample());
        assert_eq!(points.len(), 5);
        assert_eq!(points[2].violation_count, 5);
    }

    #[test]
    fn empty_records_give_empty_views() {
        assert!(build_daily_totals(&[]).is_empty());
        assert!(build_intersection_totals(&[]).is_empty());
        assert!(build_geo_points(&[]).is_empty());
    }
}
