//! Turns filtered aggregate views into chart specifications.
//!
//! Styling is fixed: colors, marker sizes and the theme are presentation
//! constants, never derived from the data.

use std::collections::BTreeMap;

use red_light_analytics::range::filter_by_range;
use red_light_analytics_models::{
    DailyTotals, DateRange, GeoPoint, IntersectionCount, IntersectionDailyTotals, TimeSeriesPoint,
};
use red_light_chart_models::{
    Axis, BarTrace, ChartSpec, DensityMapTrace, LatLon, Layout, MapLayout, Marker, ScatterTrace,
    Theme, Title, Trace,
};
use red_light_violation_models::MapCenter;

/// Number of intersections shown in the top-intersections chart.
pub const TOP_INTERSECTIONS: usize = 5;

const THEME: Theme = Theme::PlotlyWhite;

const SCATTER_COLOR: &str = "#d4af4a";
const SCATTER_SIZE: u32 = 12;

const BAR_COLOR: &str = "gold";
const BAR_WIDTH: f64 = 0.4;

const DENSITY_RADIUS: u32 = 10;
const DENSITY_COLORSCALE: &str = "Hot";
const MAP_STYLE: &str = "open-street-map";

/// Ordered `(date, count)` points of `daily` within `range`.
#[must_use]
pub fn violations_points(daily: &DailyTotals, range: &DateRange) -> Vec<TimeSeriesPoint> {
    filter_by_range(daily, range)
        .iter()
        .map(|(date, count)| TimeSeriesPoint { date, count })
        .collect()
}

/// Renders daily points as the violations scatter chart.
#[must_use]
pub fn violations_chart(points: &[TimeSeriesPoint]) -> ChartSpec {
    ChartSpec {
        data: vec![Trace::Scatter(ScatterTrace {
            name: "Violations".to_string(),
            mode: "markers".to_string(),
            x: points.iter().map(|p| p.date).collect(),
            y: points.iter().map(|p| p.count).collect(),
            marker: Marker {
                color: SCATTER_COLOR.to_string(),
                size: Some(SCATTER_SIZE),
            },
        })],
        layout: Layout {
            title: Title::new("Violations Chart"),
            xaxis: Some(Axis::titled("Date")),
            yaxis: Some(Axis::titled("Violations")),
            showlegend: false,
            template: THEME,
            mapbox: None,
        },
    }
}

/// Builds the violations scatter chart for `range`.
#[must_use]
pub fn build_violations_series(daily: &DailyTotals, range: &DateRange) -> ChartSpec {
    violations_chart(&violations_points(daily, range))
}

/// The `limit` intersections with the most violations within `range`.
///
/// Rows are re-aggregated by intersection only and sorted by descending
/// count. Equal counts keep intersection name order.
#[must_use]
pub fn top_intersections(
    totals: &IntersectionDailyTotals,
    range: &DateRange,
    limit: usize,
) -> Vec<IntersectionCount> {
    let filtered = filter_by_range(totals, range);

    let mut by_name: BTreeMap<&str, u64> = BTreeMap::new();
    for (_, name, count) in filtered.iter() {
        let total = by_name.entry(name).or_default();
        *total = total.saturating_add(count);
    }

    let mut ranked: Vec<IntersectionCount> = by_name
        .into_iter()
        .map(|(name, count)| IntersectionCount {
            intersection: name.to_string(),
            count,
        })
        .collect();

    // Stable, so ties stay in name order.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

/// Renders ranked intersections as the top-intersections bar chart.
#[must_use]
pub fn top_intersections_chart(ranked: &[IntersectionCount]) -> ChartSpec {
    ChartSpec {
        data: vec![Trace::Bar(BarTrace {
            name: "Violations".to_string(),
            x: ranked.iter().map(|r| r.intersection.clone()).collect(),
            y: ranked.iter().map(|r| r.count).collect(),
            marker: Marker {
                color: BAR_COLOR.to_string(),
                size: None,
            },
            width: Some(BAR_WIDTH),
        })],
        layout: Layout {
            title: Title::new("Intersections with Maximum Violations"),
            xaxis: Some(Axis::titled("Intersection")),
            yaxis: Some(Axis::titled("Violations")),
            showlegend: false,
            template: THEME,
            mapbox: None,
        },
    }
}

/// Builds the top-intersections bar chart for `range`.
#[must_use]
pub fn build_top_intersections(totals: &IntersectionDailyTotals, range: &DateRange) -> ChartSpec {
    top_intersections_chart(&top_intersections(totals, range, TOP_INTERSECTIONS))
}

/// Builds the violation density heat map over every loaded point.
#[must_use]
pub fn build_density_map(points: &[GeoPoint], center: MapCenter) -> ChartSpec {
    ChartSpec {
        data: vec![Trace::DensityMap(DensityMapTrace {
            name: "Violations".to_string(),
            lat: points.iter().map(|p| p.latitude).collect(),
            lon: points.iter().map(|p| p.longitude).collect(),
            z: points.iter().map(|p| p.violation_count).collect(),
            radius: DENSITY_RADIUS,
            colorscale: DENSITY_COLORSCALE.to_string(),
        })],
        layout: Layout {
            title: Title::new("Violation Density"),
            xaxis: None,
            yaxis: None,
            showlegend: false,
            template: THEME,
            mapbox: Some(MapLayout {
                style: MAP_STYLE.to_string(),
                center: LatLon {
                    lat: center.lat,
                    lon: center.lon,
                },
                zoom: center.zoom,
            }),
        },
    }
}
