//! Relay routes behind the administrator dashboard.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;

use super::{optional_param, query_params, relay, required_param};
use crate::client::GatewayAction;
use crate::config::DEFAULT_SUMMARY_DAYS;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/missing", get(missing_today))
        .route("/summary", get(daily_summary))
        .route("/drivers", get(driver_activity))
        .route("/driver-reports", get(driver_reports))
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub days: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverReportsQuery {
    pub employee_code: Option<String>,
    pub date: Option<String>,
}

/// GET /api/admin/missing
pub async fn missing_today(State(state): State<AppState>) -> AppResult<Response> {
    let reply = state.gateway.get(GatewayAction::Missing, &[]).await?;
    Ok(relay(reply))
}

/// GET /api/admin/summary?days=30
pub async fn daily_summary(
    State(state): State<AppState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> AppResult<Response> {
    let query = query_params(query)?;
    let days = parse_days(query.days)?;
    let days = days.to_string();

    let reply = state
        .gateway
        .get(GatewayAction::Summary, &[("days", days.as_str())])
        .await?;
    Ok(relay(reply))
}

/// GET /api/admin/drivers?date=YYYY-MM-DD
pub async fn driver_activity(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> AppResult<Response> {
    let query = query_params(query)?;
    let date = optional_param(query.date).unwrap_or_default();

    let reply = state
        .gateway
        .get(GatewayAction::Drivers, &[("date", date.as_str())])
        .await?;
    Ok(relay(reply))
}

/// GET /api/admin/driver-reports?employeeCode=..&date=..
pub async fn driver_reports(
    State(state): State<AppState>,
    query: Result<Query<DriverReportsQuery>, QueryRejection>,
) -> AppResult<Response> {
    let query = query_params(query)?;
    let employee_code = required_param(query.employee_code, "employeeCode")?;
    let date = optional_param(query.date).unwrap_or_default();

    let reply = state
        .gateway
        .get(
            GatewayAction::DriverReports,
            &[
                ("employeeCode", employee_code.as_str()),
                ("date", date.as_str()),
            ],
        )
        .await?;
    Ok(relay(reply))
}

fn parse_days(raw: Option<String>) -> AppResult<u32> {
    match optional_param(raw) {
        None => Ok(DEFAULT_SUMMARY_DAYS),
        Some(value) => match value.parse::<u32>() {
            Ok(days) if days > 0 => Ok(days),
            _ => Err(AppError::BadRequest(format!(
                "days must be a positive integer, got '{value}'"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_defaults_to_thirty() {
        assert_eq!(parse_days(None).unwrap(), 30);
        assert_eq!(parse_days(Some(" ".into())).unwrap(), 30);
        assert_eq!(parse_days(Some("7".into())).unwrap(), 7);
    }

    #[test]
    fn days_rejects_garbage_and_zero() {
        assert!(matches!(parse_days(Some("abc".into())), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_days(Some("0".into())), Err(AppError::BadRequest(_))));
    }
}
