//! Series error types
//!
//! Defines all errors that can occur while building or reading series data.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in the series layer
#[derive(Error, Debug)]
pub enum SeriesError {
    /// Structurally malformed input (unordered dates, non-numeric or infinite values, ragged columns)
    #[error("Malformed series '{series}': {reason}")]
    MalformedSeries { series: String, reason: String },

    /// Requested column does not exist in the table
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Invalid date range (start after end)
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Unknown period preset
    #[error("Unknown period: {0}")]
    UnknownPeriod(String),

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SeriesError {
    /// Shorthand for a [`SeriesError::MalformedSeries`]
    pub fn malformed(series: impl Into<String>, reason: impl Into<String>) -> Self {
        SeriesError::MalformedSeries {
            series: series.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for series operations
pub type SeriesResult<T> = Result<T, SeriesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SeriesError::malformed("US_10Y", "dates not strictly ascending");
        assert_eq!(
            err.to_string(),
            "Malformed series 'US_10Y': dates not strictly ascending"
        );

        let err = SeriesError::ColumnNotFound("USD/KRW".to_string());
        assert_eq!(err.to_string(), "Column not found: USD/KRW");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SeriesError = io_err.into();
        assert!(matches!(err, SeriesError::Io(_)));
    }
}
