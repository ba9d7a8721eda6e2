//! Rate Series
//!
//! In-memory representation of the data the dashboard loads:
//!
//! - **types**: `Observation`, `TimeSeries`, `Column`, `SeriesTable`
//! - **period**: `DateRange` and the 1Y/3Y/5Y/10Y presets
//! - **payload**: the JSON wire shape of a table
//! - **csv_import**: wide CSV tables
//! - **error**: error types
//!
//! Tables are built per load and discarded afterwards; nothing is cached.

pub mod csv_import;
pub mod error;
pub mod payload;
pub mod period;
pub mod types;

pub use csv_import::{parse_date, CsvTableReader};
pub use error::{SeriesError, SeriesResult};
pub use payload::{SeriesPayload, TablePayload};
pub use period::{DateRange, Period};
pub use types::{Column, Observation, SeriesTable, TimeSeries};
