#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Chart specification types consumed by the dashboard frontend.
//!
//! A [`ChartSpec`] is a list of data traces plus a layout descriptor. The
//! JSON shape matches Plotly's figure format so the frontend can hand it
//! to `Plotly.react` unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A complete chart: data traces and layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Data series to render.
    pub data: Vec<Trace>,
    /// Title, axes, legend and theme.
    pub layout: Layout,
}

/// A single data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    /// Point series over dates.
    Scatter(ScatterTrace),
    /// Categorical bar series.
    Bar(BarTrace),
    /// Weighted point density on a map.
    #[serde(rename = "densitymapbox")]
    DensityMap(DensityMapTrace),
}

/// Scatter trace over dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterTrace {
    /// Legend name.
    pub name: String,
    /// Drawing mode (`"markers"`, `"lines"`, `"lines+markers"`).
    pub mode: String,
    /// Dates along the x axis.
    pub x: Vec<NaiveDate>,
    /// Values along the y axis.
    pub y: Vec<u64>,
    /// Marker styling.
    pub marker: Marker,
}

/// Bar trace over named categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTrace {
    /// Legend name.
    pub name: String,
    /// Category labels.
    pub x: Vec<String>,
    /// Bar heights.
    pub y: Vec<u64>,
    /// Bar styling.
    pub marker: Marker,
    /// Bar width as a fraction of the category slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

/// Density heat map trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityMapTrace {
    /// Legend name.
    pub name: String,
    /// Point latitudes.
    pub lat: Vec<f64>,
    /// Point longitudes.
    pub lon: Vec<f64>,
    /// Point weights.
    pub z: Vec<u64>,
    /// Influence radius of each point, in pixels.
    pub radius: u32,
    /// Named Plotly colorscale.
    pub colorscale: String,
}

/// Marker styling for scatter and bar traces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// CSS color.
    pub color: String,
    /// Marker size in pixels (scatter only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// Chart-level presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Chart title.
    pub title: Title,
    /// Horizontal axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    /// Vertical axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    /// Whether a legend is drawn.
    pub showlegend: bool,
    /// Named color theme.
    pub template: Theme,
    /// Map viewport, for map traces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapbox: Option<MapLayout>,
}

/// A text title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    /// Displayed text.
    pub text: String,
}

impl Title {
    /// Creates a title from any string-like value.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// An axis descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    /// Axis label.
    pub title: Title,
}

impl Axis {
    /// Creates an axis with the given label.
    #[must_use]
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title::new(text),
        }
    }
}

/// Map viewport for density map charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLayout {
    /// Base map style (e.g. `"open-street-map"`).
    pub style: String,
    /// Initial center.
    pub center: LatLon,
    /// Initial zoom level.
    pub zoom: f64,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

/// Named color theme applied to every chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Plotly's default light theme.
    Plotly,
    /// Plotly's dark theme.
    #[default]
    PlotlyDark,
    /// Plotly's white-background theme.
    PlotlyWhite,
}
