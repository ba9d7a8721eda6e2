//! Axis Routes
//!
//! - POST /api/v1/axis?threshold= - Secondary axis decision and display order

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{AnalysisParams, AxisResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::series::TablePayload;

/// POST /api/v1/axis
///
/// Decide whether the table needs a secondary y-axis. `threshold` defaults
/// to the configured value.
pub async fn advise_axis(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalysisParams>,
    Json(payload): Json<TablePayload>,
) -> ApiResult<Json<AxisResponse>> {
    validate_threshold(params.threshold)?;

    let table = payload.into_table()?;
    let advisor = state.axis_advisor(params.threshold);

    Ok(Json(AxisResponse {
        decision: advisor.advise(&table),
        threshold: advisor.threshold(),
    }))
}

/// Reject thresholds the ratio test cannot use
pub(crate) fn validate_threshold(threshold: Option<f64>) -> ApiResult<()> {
    match threshold {
        Some(t) if !(t.is_finite() && t > 0.0) => Err(ApiError::Validation(format!(
            "threshold must be a positive number, got {}",
            t
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fx_and_yield() -> TablePayload {
        serde_json::from_value(json!({
            "dates": ["2024-01-02", "2024-01-03"],
            "series": {
                "US_10Y": {"values": [4.0, 4.2], "unit": "%"},
                "USD/KRW": {"values": [1300.0, 1350.0], "unit": "KRW"}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_validate_threshold() {
        assert!(validate_threshold(None).is_ok());
        assert!(validate_threshold(Some(2.5)).is_ok());
        assert!(validate_threshold(Some(0.0)).is_err());
        assert!(validate_threshold(Some(-3.0)).is_err());
        assert!(validate_threshold(Some(f64::NAN)).is_err());
    }

    #[tokio::test]
    async fn test_axis_uses_configured_threshold() {
        let Json(response) = advise_axis(
            State(Arc::new(AppState::default())),
            Query(AnalysisParams::default()),
            Json(fx_and_yield()),
        )
        .await
        .unwrap();

        assert!(response.decision.use_secondary);
        assert_eq!(response.decision.columns, vec!["USD/KRW", "US_10Y"]);
        assert_eq!(response.threshold, 5.0);
    }

    #[tokio::test]
    async fn test_axis_threshold_override() {
        let params = AnalysisParams {
            threshold: Some(1000.0),
            ..Default::default()
        };

        let Json(response) = advise_axis(
            State(Arc::new(AppState::default())),
            Query(params),
            Json(fx_and_yield()),
        )
        .await
        .unwrap();

        assert!(!response.decision.use_secondary);
        assert_eq!(response.threshold, 1000.0);
    }
}
