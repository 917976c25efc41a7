//! API endpoints
//!
//! Relay routes: each one validates at most one required parameter,
//! forwards a single gateway call and relays the JSON it got back.

pub mod admin;
pub mod checklist;
pub mod health;

use axum::{
    extract::{rejection::QueryRejection, Query},
    response::{IntoResponse, Response},
    Json, Router,
};

use crate::client::GatewayReply;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(checklist::create_checklist_router())
        .nest("/admin", admin::create_admin_router())
}

/// Gateway JSON, unchanged, with the outcome collapsed to 200 / 400.
pub(crate) fn relay(reply: GatewayReply) -> Response {
    if let Some(message) = reply.error_message() {
        tracing::warn!("⚠️ Gateway reported failure: {}", message);
    }
    (reply.relay_status(), Json(reply.body)).into_response()
}

/// Trimmed query value; blank counts as absent.
pub(crate) fn optional_param(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Query string or a JSON 400; axum's own rejection is plain text.
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

pub(crate) fn required_param(value: Option<String>, name: &'static str) -> AppResult<String> {
    optional_param(value).ok_or(AppError::MissingParameter(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_required_param_is_missing() {
        assert!(matches!(
            required_param(Some("   ".into()), "forkliftCode"),
            Err(AppError::MissingParameter("forkliftCode"))
        ));
        assert_eq!(
            required_param(Some(" FL-0001 ".into()), "forkliftCode").unwrap(),
            "FL-0001"
        );
    }
}
