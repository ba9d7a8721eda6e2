//! Axis Scaling Advisor
//!
//! Decides whether the series of a table should be split over two y-axes and
//! in which order they are drawn.
//!
//! The ratio of the largest to the smallest positive column median is a cheap
//! proxy for "these series cannot share a linear scale" (a 1300-level exchange
//! rate against a 4% yield). Columns are ordered by observed range so the most
//! visually prominent series anchors the primary axis.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::statistics::median;
use crate::series::SeriesTable;

/// Default median ratio above which a secondary axis is used
pub const DEFAULT_AXIS_THRESHOLD: f64 = 5.0;

/// Outcome of [`advise_axis_scaling`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDecision {
    /// Draw `columns[1..]` on a secondary axis
    pub use_secondary: bool,
    /// Display order, largest range first
    pub columns: Vec<String>,
}

/// Decide on a secondary axis and a display order for `table`.
///
/// - Fewer than 2 columns: no secondary axis, input order.
/// - `use_secondary` is `max_median / min_median > threshold`, where
///   `min_median` is the smallest strictly positive median, or `1` when no
///   column has a positive median.
/// - Order is descending by `max - min`, ties kept in input order. Columns
///   without observations have no median and sort last.
pub fn advise_axis_scaling(table: &SeriesTable, threshold: f64) -> AxisDecision {
    if table.width() < 2 {
        return AxisDecision {
            use_secondary: false,
            columns: table.column_names(),
        };
    }

    let observed: Vec<Vec<f64>> = table
        .columns()
        .iter()
        .map(|c| c.observed().collect())
        .collect();

    let medians: Vec<f64> = observed.iter().filter_map(|v| median(v)).collect();
    let use_secondary = match medians.iter().copied().reduce(f64::max) {
        Some(max_median) => {
            let min_median = medians
                .iter()
                .copied()
                .filter(|m| *m > 0.0)
                .reduce(f64::min)
                .unwrap_or(1.0);
            max_median / min_median > threshold
        }
        None => false,
    };

    let ranges: Vec<Option<f64>> = observed.iter().map(|v| range(v)).collect();
    let mut order: Vec<usize> = (0..table.width()).collect();
    // sort_by is stable: equal ranges keep input order
    order.sort_by(|&a, &b| match (ranges[a], ranges[b]) {
        (Some(ra), Some(rb)) => rb.partial_cmp(&ra).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let columns = order
        .into_iter()
        .map(|idx| table.columns()[idx].name.clone())
        .collect();

    tracing::debug!(
        use_secondary,
        threshold,
        medians = ?medians,
        "Axis scaling decided"
    );

    AxisDecision {
        use_secondary,
        columns,
    }
}

/// `max - min` of observed values
fn range(values: &[f64]) -> Option<f64> {
    let max = values.iter().copied().reduce(f64::max)?;
    let min = values.iter().copied().reduce(f64::min)?;
    Some(max - min)
}

/// Advises on axis scaling with a fixed threshold
#[derive(Debug, Clone, Copy)]
pub struct AxisScalingAdvisor {
    threshold: f64,
}

impl Default for AxisScalingAdvisor {
    fn default() -> Self {
        Self::new(DEFAULT_AXIS_THRESHOLD)
    }
}

impl AxisScalingAdvisor {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn advise(&self, table: &SeriesTable) -> AxisDecision {
        advise_axis_scaling(table, self.threshold)
    }
}
