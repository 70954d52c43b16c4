#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the dashboard server.
//!
//! Chart bodies are returned as-is from the chart models; the types here
//! cover query parameters and the small metadata endpoints.

use chrono::NaiveDate;
use red_light_analytics_models::DateRange;
use serde::{Deserialize, Serialize};

/// Query parameters accepted by every range-driven callback.
///
/// Both bounds are ISO dates as emitted by the frontend's date picker;
/// either may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangeQueryParams {
    /// First day of the range (inclusive).
    pub start_date: Option<String>,
    /// Last day of the range (inclusive).
    pub end_date: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Summary of the loaded dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSummary {
    /// Human-readable dataset name.
    pub source_name: String,
    /// Number of cleaned records loaded.
    pub record_count: usize,
    /// Sum of all violation counts.
    pub total_violations: u64,
    /// Earliest date in the dataset.
    pub first_date: Option<NaiveDate>,
    /// Latest date in the dataset.
    pub last_date: Option<NaiveDate>,
}

impl ApiSummary {
    /// Builds a summary, taking the date bounds from `span`.
    #[must_use]
    pub fn new(
        source_name: impl Into<String>,
        record_count: usize,
        total_violations: u64,
        span: Option<DateRange>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            record_count,
            total_violations,
            first_date: span.map(|s| s.start),
            last_date: span.map(|s| s.end),
        }
    }
}

/// A registered chart callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCallbackInfo {
    /// Event name the callback is registered under.
    pub name: String,
    /// What the callback renders.
    pub description: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Description of what went wrong.
    pub error: String,
}
