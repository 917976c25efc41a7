//! Relay routes used by the checklist form: roster, status, submit.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::{optional_param, query_params, relay, required_param};
use crate::client::GatewayAction;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_checklist_router() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees))
        .route("/forklift/status", get(forklift_status))
        .route("/checklist/submit", post(submit_checklist))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    pub forklift_code: Option<String>,
    pub employee_code: Option<String>,
}

/// GET /api/employees
pub async fn list_employees(State(state): State<AppState>) -> AppResult<Response> {
    let reply = state.gateway.get(GatewayAction::Employees, &[]).await?;
    Ok(relay(reply))
}

/// GET /api/forklift/status?forkliftCode=..&employeeCode=..
pub async fn forklift_status(
    State(state): State<AppState>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> AppResult<Response> {
    let query = query_params(query)?;
    let forklift_code = required_param(query.forklift_code, "forkliftCode")?;
    let employee_code = optional_param(query.employee_code).unwrap_or_default();

    let reply = state
        .gateway
        .get(
            GatewayAction::Status,
            &[
                ("forkliftCode", forklift_code.as_str()),
                ("employeeCode", employee_code.as_str()),
            ],
        )
        .await?;
    Ok(relay(reply))
}

/// POST /api/checklist/submit
///
/// The body is forwarded as-is; the gateway owns the duplicate rule.
pub async fn submit_checklist(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Response> {
    let Json(body) = payload.map_err(|rejection| {
        AppError::BadRequest(format!("Invalid checklist body: {}", rejection.body_text()))
    })?;

    let reply = state
        .gateway
        .post_json(GatewayAction::SubmitChecklist, &body)
        .await?;
    Ok(relay(reply))
}
