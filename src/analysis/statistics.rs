//! Statistics Engine
//!
//! Reduces one series to a fixed summary record: descriptive statistics plus
//! point-in-time changes over 1-day, 1-week and 1-month lookbacks.
//!
//! Lookbacks count observations, not calendar days. With the default offsets
//! (1, 5, 20) a "week" is five trading days back, whatever dates those
//! observations carry; gaps in the data are not corrected for.

use serde::{Deserialize, Serialize};

use crate::series::{SeriesTable, TimeSeries};

/// Default 1-day lookback, in observations
pub const DEFAULT_ONE_DAY: usize = 1;
/// Default 1-week lookback (5 trading days), in observations
pub const DEFAULT_ONE_WEEK: usize = 5;
/// Default 1-month lookback (20 trading days), in observations
pub const DEFAULT_ONE_MONTH: usize = 20;
/// Default 3-month lookback (60 trading days), in observations
pub const DEFAULT_THREE_MONTH: usize = 60;

/// Positional lookback offsets used by the change fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookbackOffsets {
    pub one_day: usize,
    pub one_week: usize,
    pub one_month: usize,
    /// Only reported for spreads
    #[serde(default = "default_three_month")]
    pub three_month: usize,
}

fn default_three_month() -> usize {
    DEFAULT_THREE_MONTH
}

impl Default for LookbackOffsets {
    fn default() -> Self {
        Self {
            one_day: DEFAULT_ONE_DAY,
            one_week: DEFAULT_ONE_WEEK,
            one_month: DEFAULT_ONE_MONTH,
            three_month: DEFAULT_THREE_MONTH,
        }
    }
}

/// Summary of one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsRecord {
    /// Last observed value
    pub current: f64,
    pub mean: f64,
    /// Sample standard deviation (n - 1); 0 with fewer than 2 observations
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub q25: f64,
    pub q75: f64,
    /// current - value `one_day` observations back
    pub change_1d: f64,
    /// current - value `one_week` observations back
    pub change_1w: f64,
    /// current - value `one_month` observations back
    pub change_1m: f64,
    /// Percent change against the value `one_day` back; 0 when that value is 0
    pub pct_change_1d: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// A statistics record tagged with its series name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStatistics {
    pub name: String,
    #[serde(flatten)]
    pub record: StatisticsRecord,
}

/// Compute the statistics record of one series.
///
/// Missing values are dropped first. Returns `None` when nothing is observed.
/// `unit` overrides the series' own unit tag.
pub fn compute_statistics(
    series: &TimeSeries,
    unit: Option<&str>,
    offsets: &LookbackOffsets,
) -> Option<StatisticsRecord> {
    let unit = unit.or(series.unit()).map(str::to_string);
    summarize(&series.observed_values(), offsets).map(|record| StatisticsRecord { unit, ..record })
}

/// Summarize observed values given in observation order.
///
/// Values must be finite; [`TimeSeries`] guarantees this.
pub fn summarize(values: &[f64], offsets: &LookbackOffsets) -> Option<StatisticsRecord> {
    let current = *values.last()?;
    let n = values.len();

    let mean = running_mean(values);
    let std = sample_std(values);

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    Some(StatisticsRecord {
        current,
        mean,
        std,
        min: sorted[0],
        max: sorted[n - 1],
        median: quantile(&sorted, 0.5),
        q25: quantile(&sorted, 0.25),
        q75: quantile(&sorted, 0.75),
        change_1d: change(values, offsets.one_day),
        change_1w: change(values, offsets.one_week),
        change_1m: change(values, offsets.one_month),
        pct_change_1d: pct_change(values, offsets.one_day),
        unit: None,
    })
}

/// Quantile of ascending-sorted values, linear interpolation between ranks.
///
/// Position is `q * (n - 1)`. Returns NaN for an empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;

    // Weighted form: the difference of two extreme values could overflow
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}

/// Median of unsorted values, `None` when empty
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(quantile(&sorted, 0.5))
}

/// Incremental mean; stays finite for any finite input
fn running_mean(values: &[f64]) -> f64 {
    values.iter().enumerate().fold(0.0, |mean, (i, v)| {
        let k = (i + 1) as f64;
        mean - mean / k + v / k
    })
}

/// Sample standard deviation (n - 1), computed on values scaled into
/// [-1, 1] so the squared deviations cannot overflow
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let scale = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale == 0.0 {
        return 0.0;
    }

    let scaled: Vec<f64> = values.iter().map(|v| v / scale).collect();
    let mean = running_mean(&scaled);
    let sum_sq: f64 = scaled.iter().map(|v| (v - mean).powi(2)).sum();
    (scale * (sum_sq / (values.len() - 1) as f64).sqrt()).min(f64::MAX)
}

/// current - value `offset` observations back.
///
/// 0 when the series is too short or the difference overflows.
pub(crate) fn change(values: &[f64], offset: usize) -> f64 {
    let n = values.len();
    if n <= offset {
        return 0.0;
    }
    finite_or_zero(values[n - 1] - values[n - 1 - offset])
}

fn pct_change(values: &[f64], offset: usize) -> f64 {
    let n = values.len();
    if n <= offset {
        return 0.0;
    }
    let previous = values[n - 1 - offset];
    if previous == 0.0 {
        return 0.0;
    }
    finite_or_zero((values[n - 1] - previous) / previous * 100.0)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Computes statistics records with a fixed set of lookback offsets
#[derive(Debug, Clone, Default)]
pub struct StatisticsEngine {
    offsets: LookbackOffsets,
}

impl StatisticsEngine {
    pub fn new(offsets: LookbackOffsets) -> Self {
        Self { offsets }
    }

    pub fn offsets(&self) -> &LookbackOffsets {
        &self.offsets
    }

    /// Statistics of one series
    pub fn compute(&self, series: &TimeSeries, unit: Option<&str>) -> Option<StatisticsRecord> {
        compute_statistics(series, unit, &self.offsets)
    }

    /// Statistics of every column, in column order.
    ///
    /// Columns without any observation are omitted.
    pub fn compute_table(&self, table: &SeriesTable) -> Vec<SeriesStatistics> {
        let stats: Vec<SeriesStatistics> = table
            .iter_series()
            .filter_map(|series| {
                self.compute(&series, None).map(|record| SeriesStatistics {
                    name: series.name().to_string(),
                    record,
                })
            })
            .collect();

        if stats.len() < table.width() {
            tracing::debug!(
                columns = table.width(),
                omitted = table.width() - stats.len(),
                "Omitted columns without observations from statistics"
            );
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::types::tests::{dates, table};
    use crate::series::{Column, Observation, SeriesTable};

    fn series(values: &[f64]) -> TimeSeries {
        let values: Vec<Option<f64>> = values.iter().map(|&v| Some(v)).collect();
        TimeSeries::from_parts("S", &dates(values.len()), &values).unwrap()
    }

    fn stats(values: &[f64]) -> StatisticsRecord {
        compute_statistics(&series(values), None, &LookbackOffsets::default()).unwrap()
    }

    #[test]
    fn test_basic_statistics() {
        let record = stats(&[0.5, 0.6, 0.7, 0.8, 0.9]);

        assert_eq!(record.current, 0.9);
        assert!((record.mean - 0.7).abs() < 1e-12);
        assert_eq!(record.min, 0.5);
        assert_eq!(record.max, 0.9);
        assert_eq!(record.median, 0.7);
        assert!((record.q25 - 0.6).abs() < 1e-12);
        assert!((record.q75 - 0.8).abs() < 1e-12);
        // sample std of 0.5..0.9 step 0.1 = sqrt(0.025)
        assert!((record.std - 0.025_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_lookback_changes_are_positional() {
        // Distinct values: v[i] = i^2
        let values: Vec<f64> = (0..30).map(|i| (i * i) as f64).collect();
        let record = stats(&values);
        let current = values[29];

        assert_eq!(record.change_1d, current - values[28]);
        assert_eq!(record.change_1w, current - values[24]);
        assert_eq!(record.change_1m, current - values[9]);
    }

    #[test]
    fn test_single_observation() {
        let record = stats(&[4.25]);

        assert_eq!(record.current, 4.25);
        assert_eq!(record.std, 0.0);
        assert_eq!(record.change_1d, 0.0);
        assert_eq!(record.change_1w, 0.0);
        assert_eq!(record.change_1m, 0.0);
        assert_eq!(record.pct_change_1d, 0.0);
        assert_eq!(record.q25, 4.25);
        assert_eq!(record.q75, 4.25);
    }

    #[test]
    fn test_short_series_boundaries() {
        // 5 observations: no 1-week change yet
        let record = stats(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(record.change_1w, 0.0);

        // 6 observations: 1-week change available
        let record = stats(&[1.0, 2.0, 3.0, 4.0, 5.0, 7.0]);
        assert_eq!(record.change_1w, 6.0);
        assert_eq!(record.change_1m, 0.0);

        // 21 observations: 1-month change available
        let values: Vec<f64> = (0..21).map(|i| i as f64 * 2.0).collect();
        let record = stats(&values);
        assert_eq!(record.change_1m, 40.0);
    }

    #[test]
    fn test_one_month_boundary() {
        // 20 observations: no 1-month change yet
        let values: Vec<f64> = (0..20).map(|i| i as f64).collect();
        assert_eq!(stats(&values).change_1m, 0.0);

        // 21 observations: current minus the first
        let values: Vec<f64> = (0..21).map(|i| i as f64).collect();
        assert_eq!(stats(&values).change_1m, 20.0);
    }

    #[test]
    fn test_extreme_values_stay_finite() {
        let record = stats(&[1e308, 1e308]);
        assert_eq!(record.mean, 1e308);
        assert_eq!(record.std, 0.0);

        let record = stats(&[1.7e308, -1.7e308, 1.7e308]);
        assert!(record.mean.is_finite());
        assert!(record.q25.is_finite());
        // 1.7e308 - (-1.7e308) overflows
        assert_eq!(record.change_1d, 0.0);
        assert!(record.std.is_finite());
        assert!(record.std > 1e308);

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["mean"].is_f64());
        assert!(json["std"].is_f64());
    }

    #[test]
    fn test_pct_change() {
        let record = stats(&[4.0, 5.0]);
        assert!((record.pct_change_1d - 25.0).abs() < 1e-12);

        // Previous value exactly zero degrades to 0
        let record = stats(&[0.0, 0.25]);
        assert_eq!(record.pct_change_1d, 0.0);
        assert_eq!(record.change_1d, 0.25);
    }

    #[test]
    fn test_missing_values_dropped_before_lookback() {
        let observations = vec![
            Observation::new(dates(4)[0], 1.0),
            Observation::new(dates(4)[1], 2.0),
            Observation::missing(dates(4)[2]),
            Observation::new(dates(4)[3], 5.0),
        ];
        let series = TimeSeries::new("BOK_RATE", observations).unwrap();
        let record = compute_statistics(&series, None, &LookbackOffsets::default()).unwrap();

        // Previous observation is 2.0, not the missing slot
        assert_eq!(record.change_1d, 3.0);
        assert_eq!(record.current, 5.0);
    }

    #[test]
    fn test_empty_and_all_missing_series() {
        let empty = TimeSeries::new("EMPTY", vec![]).unwrap();
        assert!(compute_statistics(&empty, None, &LookbackOffsets::default()).is_none());

        let missing = TimeSeries::from_parts("GAP", &dates(2), &[None, None]).unwrap();
        assert!(compute_statistics(&missing, None, &LookbackOffsets::default()).is_none());
    }

    #[test]
    fn test_quartiles_bracket_median() {
        let record = stats(&[3.1, 0.4, 2.2, 9.8, 5.5, 1.0, 7.3]);
        assert!(record.q25 <= record.median);
        assert!(record.median <= record.q75);
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 0.75), 3.25);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn test_custom_offsets() {
        let offsets = LookbackOffsets {
            one_day: 1,
            one_week: 2,
            one_month: 3,
            three_month: 4,
        };
        let record = compute_statistics(&series(&[1.0, 2.0, 4.0, 8.0]), None, &offsets).unwrap();

        assert_eq!(record.change_1w, 6.0);
        assert_eq!(record.change_1m, 7.0);
    }

    #[test]
    fn test_unit_carried_through() {
        let tagged = series(&[1350.0, 1352.0]).with_unit("KRW");
        let offsets = LookbackOffsets::default();

        let record = compute_statistics(&tagged, None, &offsets).unwrap();
        assert_eq!(record.unit.as_deref(), Some("KRW"));

        let record = compute_statistics(&tagged, Some("won"), &offsets).unwrap();
        assert_eq!(record.unit.as_deref(), Some("won"));
    }

    #[test]
    fn test_compute_is_idempotent() {
        let s = series(&[4.01, 4.05, 3.98, 4.10, 4.07, 4.12, 4.15]);
        let offsets = LookbackOffsets::default();

        let first = compute_statistics(&s, None, &offsets).unwrap();
        let second = compute_statistics(&s, None, &offsets).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.std.to_bits(), second.std.to_bits());
    }

    #[test]
    fn test_compute_table_omits_empty_columns() {
        let table = SeriesTable::new(
            dates(3),
            vec![
                Column::from_values("US_10Y", &[4.0, 4.1, 4.2]),
                Column::new("JP_10Y", vec![None, None, None]),
                Column::from_values("KR_10Y", &[3.5, 3.6, 3.7]).with_unit("%"),
            ],
        )
        .unwrap();

        let stats = StatisticsEngine::default().compute_table(&table);
        let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["US_10Y", "KR_10Y"]);
        assert_eq!(stats[1].record.unit.as_deref(), Some("%"));
    }

    #[test]
    fn test_series_statistics_serializes_flat() {
        let stats = StatisticsEngine::default().compute_table(&table(&[("A", &[1.0, 2.0])]));
        let json = serde_json::to_value(&stats[0]).unwrap();

        assert_eq!(json["name"], "A");
        assert_eq!(json["current"], 2.0);
        assert_eq!(json["change_1d"], 1.0);
        assert!(json.get("unit").is_none());
    }
}
