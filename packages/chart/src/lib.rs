#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Chart builders and named chart callbacks for the dashboard.

pub mod builders;
pub mod callback;

pub use builders::{
    TOP_INTERSECTIONS, build_density_map, build_top_intersections, build_violations_series,
};
pub use callback::{ChartCallback, RangeRequest};
