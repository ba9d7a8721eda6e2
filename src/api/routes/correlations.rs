//! Correlation Routes
//!
//! - POST /api/v1/correlations?min_abs= - Pairwise correlations of a table

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::analysis::correlation_matrix;
use crate::api::dto::{CorrelationParams, CorrelationsResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::series::TablePayload;

/// POST /api/v1/correlations
///
/// Pearson coefficients over the dates both series observe. Pairs above
/// `min_abs` (default from config) are listed strongest first.
pub async fn get_correlations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CorrelationParams>,
    Json(payload): Json<TablePayload>,
) -> ApiResult<Json<CorrelationsResponse>> {
    let min_abs = params.min_abs.unwrap_or(state.analysis.min_correlation);
    if !(0.0..=1.0).contains(&min_abs) {
        return Err(ApiError::Validation(
            "min_abs must be between 0 and 1".to_string(),
        ));
    }

    let table = payload.into_table()?;
    let matrix = correlation_matrix(&table);
    let pairs = matrix.strongest_pairs(min_abs);

    tracing::debug!(columns = table.width(), pairs = pairs.len(), "Computed correlations");

    Ok(Json(CorrelationsResponse {
        matrix,
        pairs,
        min_abs,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn linear() -> TablePayload {
        serde_json::from_value(json!({
            "dates": ["2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"],
            "series": {
                "A": {"values": [1.0, 2.0, 3.0, 4.0]},
                "B": {"values": [2.0, 4.0, 6.0, 8.0]},
                "C": {"values": [4.0, 3.0, 2.0, 1.0]}
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_correlations_linear_columns() {
        let Json(response) = get_correlations(
            State(Arc::new(AppState::default())),
            Query(CorrelationParams::default()),
            Json(linear()),
        )
        .await
        .unwrap();

        assert!((response.matrix.get("A", "B").unwrap() - 1.0).abs() < 1e-9);
        assert!((response.matrix.get("A", "C").unwrap() + 1.0).abs() < 1e-9);
        assert_eq!(response.pairs.len(), 3);
        assert_eq!(response.min_abs, 0.3);
    }

    #[tokio::test]
    async fn test_correlations_min_abs_out_of_range() {
        let result = get_correlations(
            State(Arc::new(AppState::default())),
            Query(CorrelationParams { min_abs: Some(1.5) }),
            Json(linear()),
        )
        .await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
