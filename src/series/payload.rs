//! Wire shape of a series table
//!
//! Mirrors the rates backend response body:
//!
//! ```json
//! {
//!   "dates": ["2024-10-01", "2024-10-02"],
//!   "series": {
//!     "US_10Y": { "values": [4.01, null], "unit": "%" },
//!     "USD/KRW": { "values": [1350.0, 1352.5], "unit": "KRW" }
//!   }
//! }
//! ```
//!
//! Series keep the JSON object order. Entries are decoded one by one so a
//! bad value is reported as a malformed series naming the column.

use serde::{Deserialize, Serialize};

use super::csv_import::parse_date;
use super::error::{SeriesError, SeriesResult};
use super::types::{Column, SeriesTable};

/// A series table as sent over the wire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TablePayload {
    /// ISO dates (timestamps are truncated to their date)
    pub dates: Vec<String>,
    /// Series keyed by name, in column order
    pub series: serde_json::Map<String, serde_json::Value>,
}

/// One series entry of a [`TablePayload`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesPayload {
    pub values: Vec<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl TablePayload {
    /// Decode and validate into a [`SeriesTable`]
    pub fn into_table(self) -> SeriesResult<SeriesTable> {
        let dates = self
            .dates
            .iter()
            .map(|raw| {
                parse_date(raw, None).ok_or_else(|| {
                    SeriesError::malformed("<dates>", format!("could not parse date '{}'", raw))
                })
            })
            .collect::<SeriesResult<Vec<_>>>()?;

        let columns = self
            .series
            .into_iter()
            .map(|(name, value)| {
                let entry: SeriesPayload = serde_json::from_value(value)
                    .map_err(|e| SeriesError::malformed(name.clone(), e.to_string()))?;
                Ok(Column {
                    name,
                    unit: entry.unit,
                    values: entry.values,
                })
            })
            .collect::<SeriesResult<Vec<_>>>()?;

        SeriesTable::new(dates, columns)
    }

    /// Encode a table back into the wire shape
    pub fn from_table(table: &SeriesTable) -> Self {
        let dates = table
            .dates()
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect();

        let series = table
            .columns()
            .iter()
            .map(|c| {
                let entry = SeriesPayload {
                    values: c.values.clone(),
                    unit: c.unit.clone(),
                };
                // Serializing plain numbers and strings cannot fail
                let value = serde_json::to_value(entry).unwrap_or(serde_json::Value::Null);
                (c.name.clone(), value)
            })
            .collect();

        Self { dates, series }
    }
}

impl TryFrom<TablePayload> for SeriesTable {
    type Error = SeriesError;

    fn try_from(payload: TablePayload) -> Result<Self, Self::Error> {
        payload.into_table()
    }
}
