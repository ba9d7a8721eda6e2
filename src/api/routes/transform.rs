//! Transform Routes
//!
//! - POST /api/v1/normalize - Rebase every column to 100
//! - POST /api/v1/spread - Difference or ratio of two columns

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::analysis::{compute_spread, normalize};
use crate::api::dto::{SpreadRequest, SpreadResponse, SpreadSeriesDto};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::series::TablePayload;

/// POST /api/v1/normalize
///
/// Returns the table in the same wire shape with every column divided by
/// its first observed value × 100.
pub async fn normalize_table(Json(payload): Json<TablePayload>) -> ApiResult<Json<TablePayload>> {
    let table = payload.into_table()?;
    Ok(Json(TablePayload::from_table(&normalize(&table))))
}

/// POST /api/v1/spread
pub async fn spread(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpreadRequest>,
) -> ApiResult<Json<SpreadResponse>> {
    if req.item_a == req.item_b {
        return Err(ApiError::Validation(
            "item_a and item_b must be different series".to_string(),
        ));
    }

    let table = req.table.into_table()?;
    let spread = compute_spread(&table, &req.item_a, &req.item_b, req.operation)?;
    let statistics = spread.statistics(&state.lookbacks());

    let (dates, values) = spread
        .series
        .observations()
        .iter()
        .map(|o| (o.date.format("%Y-%m-%d").to_string(), o.value))
        .unzip();

    Ok(Json(SpreadResponse {
        label: spread.label,
        axis_title: spread.axis_title,
        series: SpreadSeriesDto { dates, values },
        statistics,
    }))
}
