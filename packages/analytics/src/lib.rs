#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation and date-range filtering of violation records.
//!
//! [`aggregate`] turns cleaned records into the three dashboard views,
//! [`range`] slices those views to a requested date interval, and
//! [`context::DashboardContext`] bundles the views built at startup.

pub mod aggregate;
pub mod context;
pub mod range;

use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A requested date bound could not be parsed.
    #[error("{message}")]
    InvalidDate {
        /// Description of what went wrong.
        message: String,
    },
}
