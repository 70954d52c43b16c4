#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Violation dataset source definitions and CSV loader.
//!
//! A [`SourceDefinition`](source_def::SourceDefinition) names the columns
//! of a dataset; [`load_records`] reads the CSV it points at into
//! [`ViolationRecord`]s, dropping every row that is missing a value.

pub mod parsing;
pub mod registry;
pub mod source_def;

use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use red_light_violation_models::ViolationRecord;

use crate::parsing::{is_missing, parse_coordinate, parse_count, parse_violation_date};
use crate::source_def::{ColumnMapping, DropPolicy, SourceDefinition};

/// Errors that can occur while loading a violation dataset.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error (file open/read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Source definition TOML could not be parsed.
    #[error("Invalid source definition: {0}")]
    Config(#[from] toml::de::Error),

    /// A mapped column is not present in the CSV header row.
    #[error("Column '{column}' not found in CSV header")]
    MissingColumn {
        /// The configured header name that was not found.
        column: String,
    },
}

/// Outcome of loading a dataset.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Cleaned records, in file order.
    pub records: Vec<ViolationRecord>,
    /// Number of data rows read (header excluded).
    pub total_rows: u64,
    /// Rows dropped because a checked cell was empty.
    pub incomplete_rows: u64,
    /// Rows dropped because a mapped cell could not be parsed.
    pub malformed_rows: u64,
}

/// Header positions of the mapped columns.
#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    date: usize,
    latitude: usize,
    longitude: usize,
    intersection: usize,
    violation_count: usize,
}

impl ColumnIndices {
    fn resolve(headers: &[String], columns: &ColumnMapping) -> Result<Self, SourceError> {
        let mut found = [0; 5];
        for (index, name) in found.iter_mut().zip(columns.names()) {
            *index = headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| SourceError::MissingColumn {
                    column: name.to_string(),
                })?;
        }

        let [date, latitude, longitude, intersection, violation_count] = found;
        Ok(Self {
            date,
            latitude,
            longitude,
            intersection,
            violation_count,
        })
    }

    const fn all(self) -> [usize; 5] {
        [
            self.date,
            self.latitude,
            self.longitude,
            self.intersection,
            self.violation_count,
        ]
    }

    fn parse(self, row: &StringRecord) -> Option<ViolationRecord> {
        Some(ViolationRecord {
            date: parse_violation_date(row.get(self.date)?)?,
            latitude: parse_coordinate(row.get(self.latitude)?)?,
            longitude: parse_coordinate(row.get(self.longitude)?)?,
            intersection: row.get(self.intersection)?.trim().to_string(),
            violation_count: parse_count(row.get(self.violation_count)?)?,
        })
    }
}

fn is_blank(cell: Option<&str>) -> bool {
    cell.is_none_or(is_missing)
}

fn is_incomplete(
    row: &StringRecord,
    header_len: usize,
    columns: ColumnIndices,
    policy: DropPolicy,
) -> bool {
    match policy {
        DropPolicy::AnyColumn => {
            (0..header_len.max(row.len())).any(|i| is_blank(row.get(i)))
        }
        DropPolicy::MappedColumns => columns.all().into_iter().any(|i| is_blank(row.get(i))),
    }
}

/// Reads violation records from CSV data.
///
/// The first row must be a header row containing every column named by
/// `definition.columns`. Rows with an empty checked cell (per
/// `definition.drop_incomplete`) are dropped; rows whose mapped cells do
/// not parse are dropped and counted as malformed.
///
/// # Errors
///
/// Returns [`SourceError::MissingColumn`] if a mapped column is absent
/// from the header, or [`SourceError::Csv`] if the data is not valid CSV.
pub fn read_records<R: std::io::Read>(
    reader: R,
    definition: &SourceDefinition,
) -> Result<LoadReport, SourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(definition.delimiter_byte())
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    let columns = ColumnIndices::resolve(&headers, &definition.columns)?;

    let mut report = LoadReport::default();

    for result in csv_reader.records() {
        let row = result?;
        report.total_rows += 1;

        if is_incomplete(&row, headers.len(), columns, definition.drop_incomplete) {
            report.incomplete_rows += 1;
            continue;
        }

        match columns.parse(&row) {
            Some(record) => report.records.push(record),
            None => report.malformed_rows += 1,
        }
    }

    if report.malformed_rows > 0 {
        log::warn!(
            "[{}] Dropped {} rows with unparseable values",
            definition.id,
            report.malformed_rows
        );
    }

    log::info!(
        "[{}] Loaded {} records ({} rows read, {} incomplete)",
        definition.id,
        report.records.len(),
        report.total_rows,
        report.incomplete_rows
    );

    Ok(report)
}

/// Loads violation records from the CSV file at `path`.
///
/// # Errors
///
/// Returns [`SourceError::Io`] if the file cannot be opened, plus any
/// error from [`read_records`].
pub fn load_records(path: &Path, definition: &SourceDefinition) -> Result<LoadReport, SourceError> {
    log::info!("[{}] Reading {}", definition.id, path.display());
    let file = File::open(path)?;
    read_records(std::io::BufReader::new(file), definition)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::registry::{DEFAULT_SOURCE_ID, find_source};

    const HEADER: &str = "INTERSECTION,CAMERA ID,ADDRESS,VIOLATION DATE,VIOLATIONS,LATITUDE,LONGITUDE";

    fn chicago() -> SourceDefinition {
        find_source(DEFAULT_SOURCE_ID).unwrap()
    }

    fn csv(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn loads_complete_rows() {
        let data = csv(&[
            "HALSTED AND NORTH,1234,1600 N HALSTED ST,01/01/2020,3,41.9105,-87.6483",
            "CICERO AND 47TH,5678,4700 S CICERO AVE,2020-01-02T00:00:00.000,5,41.8079,-87.7435",
        ]);
        let report = read_records(data.as_bytes(), &chicago()).unwrap();

        assert_eq!(report.total_rows, 2);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].intersection, "HALSTED AND NORTH");
        assert_eq!(
            report.records[1].date,
            NaiveDate::from_ymd_opt(2020, 1, 2).unwrap()
        );
        assert_eq!(report.records[1].violation_count, 5);
    }

    #[test]
    fn drops_rows_with_any_empty_cell() {
        let data = csv(&[
            "HALSTED AND NORTH,1234,1600 N HALSTED ST,01/01/2020,3,41.9105,-87.6483",
            // Unmapped ADDRESS column empty
            "HALSTED AND NORTH,1234,,01/02/2020,3,41.9105,-87.6483",
            // Mapped LATITUDE empty
            "CICERO AND 47TH,5678,4700 S CICERO AVE,01/02/2020,5,,-87.7435",
            // Short row
            "CICERO AND 47TH,5678,4700 S CICERO AVE,01/02/2020,5",
            "CICERO AND 47TH,5678,4700 S CICERO AVE,01/03/2020,7,41.8079,-87.7435",
        ]);
        let report = read_records(data.as_bytes(), &chicago()).unwrap();

        assert_eq!(report.total_rows, 5);
        assert_eq!(report.incomplete_rows, 3);
        assert_eq!(
            report.records.len() as u64,
            report.total_rows - report.incomplete_rows
        );
    }

    #[test]
    fn na_markers_count_as_incomplete() {
        let data = csv(&[
            "HALSTED AND NORTH,1234,1600 N HALSTED ST,01/01/2020,3,41.9105,-87.6483",
            "HALSTED AND NORTH,1234,N/A,01/02/2020,3,41.9105,-87.6483",
            "NULL,5678,4700 S CICERO AVE,01/02/2020,5,41.8079,-87.7435",
        ]);
        let report = read_records(data.as_bytes(), &chicago()).unwrap();

        assert_eq!(report.total_rows, 3);
        assert_eq!(report.incomplete_rows, 2);
        let names: Vec<&str> = report
            .records
            .iter()
            .map(|r| r.intersection.as_str())
            .collect();
        assert_eq!(names, vec!["HALSTED AND NORTH"]);
    }

    #[test]
    fn mapped_columns_policy_still_drops_na_in_mapped_cells() {
        let mut def = chicago();
        def.drop_incomplete = DropPolicy::MappedColumns;
        let data = csv(&[
            "HALSTED AND NORTH,1234,N/A,01/02/2020,3,41.9105,-87.6483",
            "CICERO AND 47TH,5678,4700 S CICERO AVE,01/02/2020,NaN,41.8079,-87.7435",
        ]);
        let report = read_records(data.as_bytes(), &def).unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.incomplete_rows, 1);
        assert_eq!(report.malformed_rows, 0);
    }

    #[test]
    fn mapped_columns_policy_ignores_unmapped_blanks() {
        let mut def = chicago();
        def.drop_incomplete = DropPolicy::MappedColumns;
        let data = csv(&[
            "HALSTED AND NORTH,1234,,01/02/2020,3,41.9105,-87.6483",
            "CICERO AND 47TH,5678,4700 S CICERO AVE,01/02/2020,5,,-87.7435",
        ]);
        let report = read_records(data.as_bytes(), &def).unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.incomplete_rows, 1);
    }

    #[test]
    fn counts_unparseable_rows_as_malformed() {
        let data = csv(&[
            "HALSTED AND NORTH,1234,1600 N HALSTED ST,yesterday,3,41.9105,-87.6483",
            "HALSTED AND NORTH,1234,1600 N HALSTED ST,01/01/2020,lots,41.9105,-87.6483",
            "HALSTED AND NORTH,1234,1600 N HALSTED ST,01/01/2020,3,41.9105,-87.6483",
        ]);
        let report = read_records(data.as_bytes(), &chicago()).unwrap();

        assert_eq!(report.malformed_rows, 2);
        assert_eq!(report.records.len(), 1);
    }

    #[test]
    fn missing_mapped_column_is_an_error() {
        let data = "INTERSECTION,VIOLATION DATE,VIOLATIONS\nA,01/01/2020,3";
        let err = read_records(data.as_bytes(), &chicago()).unwrap_err();
        assert!(matches!(err, SourceError::MissingColumn { column } if column == "LATITUDE"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_records(Path::new("does/not/exist.csv"), &chicago()).unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[test]
    fn header_only_file_yields_no_records() {
        let report = read_records(HEADER.as_bytes(), &chicago()).unwrap();
        assert_eq!(report.total_rows, 0);
        assert!(report.records.is_empty());
    }
}
