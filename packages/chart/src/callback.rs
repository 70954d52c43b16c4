//! Named chart callbacks.
//!
//! Each [`ChartCallback`] is an explicit handler bound to a chart id in
//! the frontend. The hosting shell invokes it with the current date-range
//! selection whenever that selection changes, and replaces the chart with
//! the returned [`ChartSpec`].

use chrono::NaiveDate;
use red_light_analytics::context::DashboardContext;
use red_light_chart_models::ChartSpec;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::builders::{
    build_top_intersections, build_violations_series, top_intersections_chart, violations_chart,
};

/// The date-range selection sent with a callback invocation.
///
/// Missing bounds default to the dataset's first and last dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeRequest {
    /// Requested first day (inclusive).
    pub start: Option<NaiveDate>,
    /// Requested last day (inclusive).
    pub end: Option<NaiveDate>,
}

/// A range-driven chart the dashboard can re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ChartCallback {
    /// Daily violations scatter chart.
    ViolationsChart,
    /// Top intersections bar chart.
    TopIntersectionsChart,
}

impl ChartCallback {
    /// Every registered callback.
    pub const ALL: &[Self] = &[Self::ViolationsChart, Self::TopIntersectionsChart];

    /// Short human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ViolationsChart => "Daily violation counts over the selected range",
            Self::TopIntersectionsChart => "Intersections with the most violations in the range",
        }
    }

    /// Renders this callback's chart for `request` against `ctx`.
    #[must_use]
    pub fn invoke(self, ctx: &DashboardContext, request: &RangeRequest) -> ChartSpec {
        let range = ctx.resolve_range(request.start, request.end);

        log::debug!("Invoking {self} for range {range:?}");

        match (self, range) {
            (Self::ViolationsChart, Some(range)) => build_violations_series(ctx.daily(), &range),
            (Self::ViolationsChart, None) => violations_chart(&[]),
            (Self::TopIntersectionsChart, Some(range)) => {
                build_top_intersections(ctx.by_intersection(), &range)
            }
            (Self::TopIntersectionsChart, None) => top_intersections_chart(&[]),
        }
    }
}
