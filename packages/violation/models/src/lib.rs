#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Red-light-camera violation record types.
//!
//! A [`ViolationRecord`] is one cleaned row of the camera violations
//! dataset. Records are produced once by the loader and never mutated;
//! every derived view is computed from a slice of them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One logged red-light-camera entry: a camera location, the day the
/// violations were recorded, and how many there were.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationRecord {
    /// Calendar day the violations were recorded on.
    pub date: NaiveDate,
    /// Camera latitude.
    pub latitude: f64,
    /// Camera longitude.
    pub longitude: f64,
    /// Intersection name (e.g. `"HALSTED AND NORTH"`).
    pub intersection: String,
    /// Number of violations recorded by the camera on `date`.
    pub violation_count: u64,
}

impl ViolationRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        intersection: impl Into<String>,
        violation_count: u64,
    ) -> Self {
        Self {
            date,
            latitude,
            longitude,
            intersection: intersection.into(),
            violation_count,
        }
    }
}

/// Geographic center used to frame map views of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapCenter {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Initial map zoom level.
    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

const fn default_zoom() -> f64 {
    8.0
}
