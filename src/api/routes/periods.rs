//! Period Routes
//!
//! - GET /api/v1/periods?end= - Quick-select period presets with start dates

use axum::{extract::Query, Json};
use chrono::{Local, NaiveDate};

use super::analyze::parse_end_date;
use crate::api::dto::{PeriodDto, PeriodParams, PeriodsResponse};
use crate::api::error::ApiResult;
use crate::series::Period;

/// GET /api/v1/periods
///
/// Start dates are computed back from `end`, or from today's local date.
pub async fn list_periods(Query(params): Query<PeriodParams>) -> ApiResult<Json<PeriodsResponse>> {
    let end = match params.end.as_deref() {
        Some(raw) => parse_end_date(raw)?,
        None => Local::now().date_naive(),
    };

    Ok(Json(PeriodsResponse {
        periods: period_presets(end),
    }))
}

fn period_presets(end: NaiveDate) -> Vec<PeriodDto> {
    Period::all()
        .iter()
        .map(|p| PeriodDto {
            label: p.label().to_string(),
            days: p.days(),
            start: p.start_from(end).format("%Y-%m-%d").to_string(),
            end: end.format("%Y-%m-%d").to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_periods_from_end_date() {
        let params = PeriodParams {
            end: Some("2024-12-31".to_string()),
        };
        let Json(response) = list_periods(Query(params)).await.unwrap();

        let labels: Vec<&str> = response.periods.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["1Y", "3Y", "5Y", "10Y"]);
        assert_eq!(response.periods[0].start, "2024-01-01");
        assert_eq!(response.periods[0].end, "2024-12-31");
        assert_eq!(response.periods[3].days, 3650);
    }

    #[tokio::test]
    async fn test_list_periods_defaults_to_today() {
        let Json(response) = list_periods(Query(PeriodParams::default())).await.unwrap();
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(response.periods[0].end, today);
    }

    #[tokio::test]
    async fn test_list_periods_bad_end() {
        let params = PeriodParams {
            end: Some("31-12".to_string()),
        };
        assert!(list_periods(Query(params)).await.is_err());
    }
}
