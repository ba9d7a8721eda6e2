//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON. Tables travel as
//! [`TablePayload`], the same shape the rates backend returns.

use serde::{Deserialize, Serialize};

use crate::analysis::{
    AxisDecision, Correlation, CorrelationMatrix, LookbackOffsets, SeriesStatistics,
    SpreadOperation, SpreadStatistics,
};
use crate::series::{DateRange, TablePayload};

// ============================================
// SHARED PARAMETERS
// ============================================

/// Query parameters accepted by the analysis endpoints
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisParams {
    /// Axis ratio threshold, overrides the configured default
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Period preset (1Y, 3Y, 5Y, 10Y) applied before analysis
    #[serde(default)]
    pub period: Option<String>,
    /// End date for the period (defaults to the last date of the table)
    #[serde(default)]
    pub end: Option<String>,
    /// Rebase every series to 100; the chart then shares a single axis
    #[serde(default)]
    pub normalized: bool,
}

// ============================================
// STATISTICS DTOs
// ============================================

/// Per-series statistics response
#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    /// One entry per column with observations, in column order
    pub statistics: Vec<SeriesStatistics>,
    /// Lookback offsets used for the change fields
    pub lookbacks: LookbackOffsets,
}

// ============================================
// AXIS DTOs
// ============================================

/// Axis scaling response
#[derive(Debug, Serialize)]
pub struct AxisResponse {
    #[serde(flatten)]
    pub decision: AxisDecision,
    /// Threshold the decision was made with
    pub threshold: f64,
}

// ============================================
// ANALYZE DTOs
// ============================================

/// Combined response for one render cycle
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Date range the table was sliced to, if a period was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<DateRange>,
    /// Number of dates analyzed
    pub rows: usize,
    /// Statistics of the series as loaded, before any rebasing
    pub statistics: Vec<SeriesStatistics>,
    pub axis: AxisResponse,
    /// Rebased table, present when `normalized` was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<TablePayload>,
}

// ============================================
// SPREAD DTOs
// ============================================

/// Spread request
#[derive(Debug, Deserialize)]
pub struct SpreadRequest {
    pub table: TablePayload,
    /// Base item (left operand)
    pub item_a: String,
    /// Comparison item (right operand)
    pub item_b: String,
    /// "subtract" (default) or "divide"
    #[serde(default)]
    pub operation: SpreadOperation,
}

/// Spread series values
#[derive(Debug, Serialize)]
pub struct SpreadSeriesDto {
    pub dates: Vec<String>,
    pub values: Vec<Option<f64>>,
}

/// Spread response
#[derive(Debug, Serialize)]
pub struct SpreadResponse {
    /// Series label, e.g. "US_10Y - KR_10Y"
    pub label: String,
    /// Axis title: "Difference" or "Ratio"
    pub axis_title: String,
    pub series: SpreadSeriesDto,
    /// Null when no date has both items observed
    pub statistics: Option<SpreadStatistics>,
}

// ============================================
// CORRELATION DTOs
// ============================================

/// Correlation query parameters
#[derive(Debug, Default, Deserialize)]
pub struct CorrelationParams {
    /// Minimum |r| for listed pairs (default from config)
    #[serde(default)]
    pub min_abs: Option<f64>,
}

/// Correlations response
#[derive(Debug, Serialize)]
pub struct CorrelationsResponse {
    pub matrix: CorrelationMatrix,
    /// Pairs above `min_abs`, strongest first
    pub pairs: Vec<Correlation>,
    pub min_abs: f64,
}

// ============================================
// PERIOD DTOs
// ============================================

/// Period query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PeriodParams {
    /// End date (ISO 8601), defaults to today
    #[serde(default)]
    pub end: Option<String>,
}

/// Single period preset
#[derive(Debug, Serialize)]
pub struct PeriodDto {
    pub label: String,
    pub days: i64,
    pub start: String,
    pub end: String,
}

/// Period presets response
#[derive(Debug, Serialize)]
pub struct PeriodsResponse {
    pub periods: Vec<PeriodDto>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status
    pub status: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
