//! Statistics Routes
//!
//! - POST /api/v1/statistics - Summary record for every series of a table

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::StatisticsResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::series::TablePayload;

/// POST /api/v1/statistics
///
/// Columns without any observation are left out of the response.
pub async fn compute_statistics(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TablePayload>,
) -> ApiResult<Json<StatisticsResponse>> {
    let table = payload.into_table()?;
    let engine = state.statistics_engine();

    let statistics = engine.compute_table(&table);

    tracing::debug!(
        columns = table.width(),
        rows = table.len(),
        summarized = statistics.len(),
        "Computed statistics"
    );

    Ok(Json(StatisticsResponse {
        statistics,
        lookbacks: *engine.offsets(),
    }))
}
