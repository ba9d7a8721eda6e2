//! CSV Import
//!
//! Reads a wide CSV table (one date column, one column per series) into a
//! [`SeriesTable`]. Empty cells are missing values; any other cell that does
//! not parse as a number is a malformed series.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::io::Read;
use std::path::Path;

use super::error::{SeriesError, SeriesResult};
use super::types::{Column, SeriesTable};

/// Formats tried after the configured one
const FALLBACK_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Parse a calendar date, trying `format` first and then common layouts.
///
/// Timestamps (`2024-01-15T00:00:00`, RFC 3339) are truncated to their date.
pub fn parse_date(value: &str, format: Option<&str>) -> Option<NaiveDate> {
    let value = value.trim();

    if let Some(fmt) = format {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in FALLBACK_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

/// CSV reader with configurable date column and format
pub struct CsvTableReader {
    /// Column index for dates; `None` auto-detects from the header
    date_column: Option<usize>,
    /// Preferred strftime format for the date column
    date_format: String,
    /// Field delimiter
    delimiter: u8,
}

impl Default for CsvTableReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvTableReader {
    /// Create a reader with default settings (auto-detected date column, ISO dates, comma)
    pub fn new() -> Self {
        Self {
            date_column: None,
            date_format: "%Y-%m-%d".to_string(),
            delimiter: b',',
        }
    }

    /// Set the date column index
    pub fn with_date_column(mut self, column: usize) -> Self {
        self.date_column = Some(column);
        self
    }

    /// Set the preferred date format
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read a table from a CSV file
    pub fn read_path(&self, path: &Path) -> SeriesResult<SeriesTable> {
        let file = std::fs::File::open(path)?;
        let table = self.read(file)?;
        tracing::debug!(
            path = %path.display(),
            columns = table.width(),
            rows = table.len(),
            "Loaded CSV table"
        );
        Ok(table)
    }

    /// Read a table from a CSV string (useful for testing)
    pub fn read_str(&self, csv_data: &str) -> SeriesResult<SeriesTable> {
        self.read(csv_data.as_bytes())
    }

    /// Read a table from any reader
    pub fn read<R: Read>(&self, source: R) -> SeriesResult<SeriesTable> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        let date_idx = self
            .date_column
            .unwrap_or_else(|| detect_date_column(&headers));

        if date_idx >= headers.len() {
            return Err(SeriesError::malformed(
                "<dates>",
                format!("date column {} out of range", date_idx),
            ));
        }

        let series_columns: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != date_idx)
            .map(|(idx, name)| (idx, name.to_string()))
            .collect();

        let mut dates = Vec::new();
        let mut values: Vec<Vec<Option<f64>>> = vec![Vec::new(); series_columns.len()];

        for (line_num, result) in reader.records().enumerate() {
            // Header is line 1
            let line = line_num + 2;
            let record = result?;

            let raw_date = record.get(date_idx).unwrap_or_default();
            let date = parse_date(raw_date, Some(&self.date_format)).ok_or_else(|| {
                SeriesError::malformed(
                    "<dates>",
                    format!("line {}: could not parse date '{}'", line, raw_date),
                )
            })?;
            dates.push(date);

            for (slot, (col_idx, name)) in values.iter_mut().zip(&series_columns) {
                let cell = record.get(*col_idx).unwrap_or_default();
                slot.push(parse_cell(name, line, cell)?);
            }
        }

        let columns = series_columns
            .into_iter()
            .zip(values)
            .map(|((_, name), values)| Column::new(name, values))
            .collect();

        SeriesTable::new(dates, columns)
    }
}

/// Pick the first header mentioning a date, falling back to column 0
fn detect_date_column(headers: &csv::StringRecord) -> usize {
    headers
        .iter()
        .position(|h| {
            let h = h.to_lowercase();
            h.contains("date") || h.contains("time")
        })
        .unwrap_or(0)
}

fn parse_cell(name: &str, line: usize, cell: &str) -> SeriesResult<Option<f64>> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") || cell.eq_ignore_ascii_case("null") {
        return Ok(None);
    }

    cell.parse::<f64>().map(Some).map_err(|_| {
        SeriesError::malformed(name, format!("line {}: non-numeric value '{}'", line, cell))
    })
}
