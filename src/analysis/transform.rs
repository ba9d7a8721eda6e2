//! Table transforms: rebasing to 100 and two-series spreads

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::statistics::{change, compute_statistics, LookbackOffsets, StatisticsRecord};
use crate::series::{Column, SeriesError, SeriesResult, SeriesTable, TimeSeries};

/// Rebase every column so its first observed value is 100.
///
/// Columns whose first observed value is 0, or that have no observation,
/// are returned unchanged. Missing cells stay missing, and so do cells whose
/// rebased value overflows.
pub fn normalize(table: &SeriesTable) -> SeriesTable {
    let columns = table
        .columns()
        .iter()
        .map(|column| match column.observed().next() {
            Some(base) if base != 0.0 => Column {
                name: column.name.clone(),
                unit: None,
                values: column
                    .values
                    .iter()
                    .map(|v| v.map(|x| x / base * 100.0).filter(|x| x.is_finite()))
                    .collect(),
            },
            _ => column.clone(),
        })
        .collect();

    SeriesTable::from_validated(table.dates().to_vec(), columns)
}

/// How two series are combined into a spread
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SpreadOperation {
    /// `a - b`
    Subtract,
    /// `a / b`
    Divide,
}

impl SpreadOperation {
    /// Axis title for the spread chart
    pub fn axis_title(&self) -> &'static str {
        match self {
            SpreadOperation::Subtract => "Difference",
            SpreadOperation::Divide => "Ratio",
        }
    }

    /// Series label, e.g. `"US_10Y - KR_10Y"`
    pub fn label(&self, a: &str, b: &str) -> String {
        match self {
            SpreadOperation::Subtract => format!("{} - {}", a, b),
            SpreadOperation::Divide => format!("{} / {}", a, b),
        }
    }

    /// Combine two observed values; `None` when dividing by zero or when the
    /// result overflows
    fn apply(&self, a: f64, b: f64) -> Option<f64> {
        let result = match self {
            SpreadOperation::Subtract => a - b,
            SpreadOperation::Divide if b == 0.0 => return None,
            SpreadOperation::Divide => a / b,
        };
        Some(result).filter(|r| r.is_finite())
    }
}

impl Default for SpreadOperation {
    fn default() -> Self {
        SpreadOperation::Subtract
    }
}

impl FromStr for SpreadOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "subtract" | "sub" | "-" => Ok(SpreadOperation::Subtract),
            "divide" | "div" | "/" => Ok(SpreadOperation::Divide),
            _ => Err(format!("unknown spread operation: {}", s)),
        }
    }
}

/// A spread series with its display metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spread {
    pub label: String,
    pub axis_title: String,
    pub series: TimeSeries,
}

/// Statistics of a spread series: the usual record plus a 3-month change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadStatistics {
    #[serde(flatten)]
    pub record: StatisticsRecord,
    /// current - value `three_month` observations back
    pub change_3m: f64,
}

impl Spread {
    /// Summary of the spread series; `None` when no date has both sides observed
    pub fn statistics(&self, offsets: &LookbackOffsets) -> Option<SpreadStatistics> {
        let record = compute_statistics(&self.series, None, offsets)?;
        Some(SpreadStatistics {
            record,
            change_3m: change(&self.series.observed_values(), offsets.three_month),
        })
    }
}

/// Spread of column `a` against column `b`, date by date.
///
/// A date is missing when either side is missing, when the result
/// overflows, or (for a ratio) when `b` is 0.
pub fn compute_spread(
    table: &SeriesTable,
    a: &str,
    b: &str,
    operation: SpreadOperation,
) -> SeriesResult<Spread> {
    let col_a = table
        .column(a)
        .ok_or_else(|| SeriesError::ColumnNotFound(a.to_string()))?;
    let col_b = table
        .column(b)
        .ok_or_else(|| SeriesError::ColumnNotFound(b.to_string()))?;

    let values: Vec<Option<f64>> = col_a
        .values
        .iter()
        .zip(&col_b.values)
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => operation.apply(*x, *y),
            _ => None,
        })
        .collect();

    let label = operation.label(a, b);
    let series = TimeSeries::from_parts(label.clone(), table.dates(), &values)?;

    Ok(Spread {
        label,
        axis_title: operation.axis_title().to_string(),
        series,
    })
}
