//! Core data types for rate series
//!
//! This module defines the fundamental types shared by every analysis:
//! - `Observation`: one dated, possibly missing, value
//! - `TimeSeries`: a named sequence of observations with strictly ascending dates
//! - `Column` and `SeriesTable`: several series outer-joined on one date axis
//!
//! Both `TimeSeries` and `SeriesTable` validate on construction, so every
//! analysis routine can assume well-formed input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{SeriesError, SeriesResult};
use super::period::DateRange;

/// A single dated observation
///
/// `None` marks a missing value. Missing values are dropped before any
/// statistic is computed, never interpolated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self {
            date,
            value: Some(value),
        }
    }

    pub fn missing(date: NaiveDate) -> Self {
        Self { date, value: None }
    }
}

/// A named, time-ordered series for one instrument (a bond yield, a currency pair)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<String>,
    observations: Vec<Observation>,
}

impl TimeSeries {
    /// Build a series, rejecting unordered dates and infinite values.
    ///
    /// `NaN` is treated as a missing value.
    pub fn new(name: impl Into<String>, observations: Vec<Observation>) -> SeriesResult<Self> {
        let name = name.into();
        let dates: Vec<NaiveDate> = observations.iter().map(|o| o.date).collect();
        check_ascending(&name, &dates)?;

        let observations = observations
            .into_iter()
            .map(|o| {
                Ok(Observation {
                    date: o.date,
                    value: check_value(&name, o.date, o.value)?,
                })
            })
            .collect::<SeriesResult<Vec<_>>>()?;

        Ok(Self {
            name,
            unit: None,
            observations,
        })
    }

    /// Build a series from parallel date and value slices
    pub fn from_parts(
        name: impl Into<String>,
        dates: &[NaiveDate],
        values: &[Option<f64>],
    ) -> SeriesResult<Self> {
        let name = name.into();
        if dates.len() != values.len() {
            return Err(SeriesError::malformed(
                name,
                format!("{} dates but {} values", dates.len(), values.len()),
            ));
        }

        let observations = dates
            .iter()
            .zip(values)
            .map(|(&date, &value)| Observation { date, value })
            .collect();

        Self::new(name, observations)
    }

    /// Builder method: set the unit tag
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Values in date order with missing entries dropped
    pub fn observed_values(&self) -> Vec<f64> {
        self.observations.iter().filter_map(|o| o.value).collect()
    }
}

/// One column of a [`SeriesTable`]: one value slot per date of the table's axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub values: Vec<Option<f64>>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            unit: None,
            values,
        }
    }

    /// Column with every slot observed
    pub fn from_values(name: impl Into<String>, values: &[f64]) -> Self {
        Self::new(name, values.iter().map(|&v| Some(v)).collect())
    }

    /// Builder method: set the unit tag
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Observed values in date order
    pub fn observed(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|v| *v)
    }

    /// Number of observed (non-missing) values
    pub fn observed_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Several series aligned on a shared, strictly ascending date axis
///
/// Columns keep their input order; ordering ties are broken by it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesTable {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl SeriesTable {
    /// Build a table, validating the date axis, column lengths, names and values
    pub fn new(dates: Vec<NaiveDate>, columns: Vec<Column>) -> SeriesResult<Self> {
        check_ascending("<dates>", &dates)?;

        let mut columns = columns;
        for (idx, column) in columns.iter_mut().enumerate() {
            if column.name.trim().is_empty() {
                return Err(SeriesError::malformed(
                    format!("#{}", idx),
                    "column name is empty",
                ));
            }
            if column.values.len() != dates.len() {
                return Err(SeriesError::malformed(
                    column.name.clone(),
                    format!(
                        "{} values for {} dates",
                        column.values.len(),
                        dates.len()
                    ),
                ));
            }
            for (slot, &date) in column.values.iter_mut().zip(&dates) {
                *slot = check_value(&column.name, date, *slot)?;
            }
        }

        for (idx, column) in columns.iter().enumerate() {
            if columns[..idx].iter().any(|c| c.name == column.name) {
                return Err(SeriesError::malformed(
                    column.name.clone(),
                    "duplicate column name",
                ));
            }
        }

        Ok(Self { dates, columns })
    }

    /// Build a table from already validated parts of another table
    pub(crate) fn from_validated(dates: Vec<NaiveDate>, columns: Vec<Column>) -> Self {
        debug_assert!(columns.iter().all(|c| c.values.len() == dates.len()));
        Self { dates, columns }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of dates on the shared axis
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Extract one column as a standalone series, keeping its unit tag
    pub fn series(&self, name: &str) -> SeriesResult<TimeSeries> {
        let column = self
            .column(name)
            .ok_or_else(|| SeriesError::ColumnNotFound(name.to_string()))?;
        Ok(self.column_series(column))
    }

    /// Every column as a standalone series, in column order
    pub fn iter_series(&self) -> impl Iterator<Item = TimeSeries> + '_ {
        self.columns.iter().map(|c| self.column_series(c))
    }

    /// Keep only the dates inside `range` (inclusive)
    pub fn slice(&self, range: &DateRange) -> SeriesTable {
        let keep: Vec<usize> = self
            .dates
            .iter()
            .enumerate()
            .filter(|(_, d)| range.contains(**d))
            .map(|(i, _)| i)
            .collect();

        let dates = keep.iter().map(|&i| self.dates[i]).collect();
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                unit: c.unit.clone(),
                values: keep.iter().map(|&i| c.values[i]).collect(),
            })
            .collect();

        Self::from_validated(dates, columns)
    }

    fn column_series(&self, column: &Column) -> TimeSeries {
        let observations = self
            .dates
            .iter()
            .zip(&column.values)
            .map(|(&date, &value)| Observation { date, value })
            .collect();

        TimeSeries {
            name: column.name.clone(),
            unit: column.unit.clone(),
            observations,
        }
    }
}

/// Reject duplicate or out-of-order dates
fn check_ascending(name: &str, dates: &[NaiveDate]) -> SeriesResult<()> {
    for pair in dates.windows(2) {
        if pair[1] <= pair[0] {
            return Err(SeriesError::malformed(
                name,
                format!(
                    "dates not strictly ascending: {} followed by {}",
                    pair[0], pair[1]
                ),
            ));
        }
    }
    Ok(())
}

/// NaN becomes missing; infinities are rejected
fn check_value(name: &str, date: NaiveDate, value: Option<f64>) -> SeriesResult<Option<f64>> {
    match value {
        Some(v) if v.is_nan() => Ok(None),
        Some(v) if v.is_infinite() => Err(SeriesError::malformed(
            name,
            format!("non-finite value {} at {}", v, date),
        )),
        other => Ok(other),
    }
}
