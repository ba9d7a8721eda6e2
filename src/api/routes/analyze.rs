//! Analyze Route
//!
//! One call per dashboard render: optional period slice, statistics for
//! every series, and the axis decision.
//!
//! - POST /api/v1/analyze?period=&threshold=&end=&normalized=

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use std::sync::Arc;

use super::axis::validate_threshold;
use crate::analysis::{normalize, AxisDecision};
use crate::api::dto::{AnalysisParams, AnalyzeResponse, AxisResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::series::{parse_date, DateRange, Period, SeriesTable, TablePayload};

/// POST /api/v1/analyze
///
/// With `period`, the table is cut to the period ending at `end` (or at the
/// last date of the table) before anything is computed. With `normalized`,
/// the rebased table is returned and every series shares one axis in input
/// order.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalysisParams>,
    Json(payload): Json<TablePayload>,
) -> ApiResult<Json<AnalyzeResponse>> {
    validate_threshold(params.threshold)?;

    let table = payload.into_table()?;
    let range = resolve_range(&params, &table)?;
    let table = match &range {
        Some(range) => table.slice(range),
        None => table,
    };

    let statistics = state.statistics_engine().compute_table(&table);
    let advisor = state.axis_advisor(params.threshold);
    let (decision, normalized) = if params.normalized {
        let single_axis = AxisDecision {
            use_secondary: false,
            columns: table.column_names(),
        };
        (single_axis, Some(TablePayload::from_table(&normalize(&table))))
    } else {
        (advisor.advise(&table), None)
    };

    tracing::info!(
        rows = table.len(),
        columns = table.width(),
        use_secondary = decision.use_secondary,
        "Analyzed table"
    );

    Ok(Json(AnalyzeResponse {
        range,
        rows: table.len(),
        statistics,
        axis: AxisResponse {
            decision,
            threshold: advisor.threshold(),
        },
        normalized,
    }))
}

fn resolve_range(params: &AnalysisParams, table: &SeriesTable) -> ApiResult<Option<DateRange>> {
    let Some(raw_period) = params.period.as_deref() else {
        return Ok(None);
    };
    let period: Period = raw_period.parse()?;

    let end = match params.end.as_deref() {
        Some(raw) => parse_end_date(raw)?,
        None => match table.dates().last() {
            Some(&last) => last,
            None => return Ok(None),
        },
    };

    Ok(Some(DateRange::for_period(period, end)))
}

pub(crate) fn parse_end_date(raw: &str) -> ApiResult<NaiveDate> {
    parse_date(raw, None)
        .ok_or_else(|| ApiError::Validation(format!("Invalid end date: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SeriesError;
    use serde_json::json;

    fn two_years() -> TablePayload {
        serde_json::from_value(json!({
            "dates": ["2022-06-01", "2023-06-01", "2024-01-02"],
            "series": {
                "US_10Y": {"values": [3.0, 3.8, 4.0]},
                "KR_10Y": {"values": [3.5, 3.6, 3.4]}
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_analyze_whole_table() {
        let Json(response) = analyze(
            State(Arc::new(AppState::default())),
            Query(AnalysisParams::default()),
            Json(two_years()),
        )
        .await
        .unwrap();

        assert!(response.range.is_none());
        assert_eq!(response.rows, 3);
        assert_eq!(response.statistics.len(), 2);
        assert!(!response.axis.decision.use_secondary);
    }

    #[tokio::test]
    async fn test_analyze_slices_to_period() {
        let params = AnalysisParams {
            period: Some("1y".to_string()),
            ..Default::default()
        };

        let Json(response) = analyze(
            State(Arc::new(AppState::default())),
            Query(params),
            Json(two_years()),
        )
        .await
        .unwrap();

        let range = response.range.unwrap();
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(response.rows, 2);
        assert_eq!(response.statistics[0].record.min, 3.8);
    }

    #[tokio::test]
    async fn test_analyze_normalized_uses_single_axis() {
        let payload: TablePayload = serde_json::from_value(json!({
            "dates": ["2024-01-02", "2024-01-03"],
            "series": {
                "US_10Y": {"values": [4.0, 4.2], "unit": "%"},
                "USD/KRW": {"values": [1300.0, 1365.0], "unit": "KRW"}
            }
        }))
        .unwrap();
        let params = AnalysisParams {
            normalized: true,
            ..Default::default()
        };

        let Json(response) = analyze(
            State(Arc::new(AppState::default())),
            Query(params),
            Json(payload),
        )
        .await
        .unwrap();

        assert!(!response.axis.decision.use_secondary);
        assert_eq!(response.axis.decision.columns, vec!["US_10Y", "USD/KRW"]);
        // Statistics stay in original units
        assert_eq!(response.statistics[1].record.current, 1365.0);

        let rebased = response.normalized.unwrap().into_table().unwrap();
        assert_eq!(rebased.column("US_10Y").unwrap().values[0], Some(100.0));
        assert!((rebased.column("USD/KRW").unwrap().values[1].unwrap() - 105.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_analyze_unknown_period() {
        let params = AnalysisParams {
            period: Some("2W".to_string()),
            ..Default::default()
        };

        let result = analyze(
            State(Arc::new(AppState::default())),
            Query(params),
            Json(two_years()),
        )
        .await;

        assert!(matches!(
            result,
            Err(ApiError::Series(SeriesError::UnknownPeriod(_)))
        ));
    }

    #[test]
    fn test_parse_end_date() {
        assert_eq!(
            parse_end_date("2024-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert!(parse_end_date("yesterday").is_err());
    }
}
