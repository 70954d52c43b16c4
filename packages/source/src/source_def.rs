//! Config-driven violation dataset definition.
//!
//! Column names differ between datasets (and between portal export
//! vintages), so everything dataset-specific lives in a
//! [`SourceDefinition`] deserialized from TOML rather than in code.

use std::path::{Path, PathBuf};

use red_light_violation_models::MapCenter;
use serde::Deserialize;

use crate::SourceError;

/// A complete, config-driven violation dataset definition.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceDefinition {
    /// Unique identifier (e.g., `"chicago_red_light"`).
    pub id: String,
    /// Human-readable name shown in the dashboard.
    pub name: String,
    /// Optional URL of the data portal page for this dataset.
    #[serde(default)]
    pub portal_url: Option<String>,
    /// Where the CSV is read from when no path override is configured.
    pub default_path: PathBuf,
    /// Field delimiter (default: comma).
    #[serde(default)]
    pub delimiter: Option<String>,
    /// Which cells must be non-empty for a row to be kept.
    #[serde(default)]
    pub drop_incomplete: DropPolicy,
    /// Header names of the mapped columns.
    pub columns: ColumnMapping,
    /// Where map views of this dataset are centered.
    pub map_center: MapCenter,
}

impl SourceDefinition {
    /// Returns the configured delimiter byte, falling back to `,`.
    #[must_use]
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter
            .as_deref()
            .and_then(|d| d.as_bytes().first().copied())
            .unwrap_or(b',')
    }
}

/// Maps CSV header names to violation record fields.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMapping {
    /// Violation date column.
    pub date: String,
    /// Camera latitude column.
    pub latitude: String,
    /// Camera longitude column.
    pub longitude: String,
    /// Intersection name column.
    pub intersection: String,
    /// Violation count column.
    pub violation_count: String,
}

impl ColumnMapping {
    /// Mapped header names in record field order.
    #[must_use]
    pub fn names(&self) -> [&str; 5] {
        [
            &self.date,
            &self.latitude,
            &self.longitude,
            &self.intersection,
            &self.violation_count,
        ]
    }
}

/// Which cells of a row are checked when dropping incomplete rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPolicy {
    /// A row with an empty cell in any column is dropped.
    #[default]
    AnyColumn,
    /// Only the mapped columns are checked; other columns may be empty.
    MappedColumns,
}

/// Parses a TOML string into a [`SourceDefinition`].
///
/// # Errors
///
/// Returns [`SourceError::Config`] if the TOML is malformed or missing
/// required fields.
pub fn parse_source_toml(toml_str: &str) -> Result<SourceDefinition, SourceError> {
    Ok(toml::de::from_str(toml_str)?)
}

/// Reads and parses a source definition TOML file.
///
/// # Errors
///
/// Returns [`SourceError::Io`] if the file cannot be read, or
/// [`SourceError::Config`] if it does not parse.
pub fn load_source_toml(path: &Path) -> Result<SourceDefinition, SourceError> {
    let contents = std::fs::read_to_string(path)?;
    parse_source_toml(&contents)
}
