//! Server-rendered pages: dashboard, checklist form, missing list.
//!
//! Pages talk to the gateway in-process through `GatewayService`. A
//! gateway failure is rendered into the page instead of being returned as
//! a JSON error.

use std::collections::HashMap;

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Form, Router,
};
use serde::Deserialize;

use super::views::{CheckTemplate, DashboardTemplate, MissingTemplate};
use crate::controllers::checklist_controller::{CheckFormInput, ChecklistController};
use crate::controllers::dashboard_controller::DashboardController;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_page_router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/check", get(check_page).post(check_submit))
        .route("/admin/missing", get(missing_page))
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub driver: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckQuery {
    pub id: Option<String>,
    pub employee_code: Option<String>,
}

/// GET /?driver=E1
async fn dashboard_page(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Html<String>> {
    let controller = DashboardController::new(state.gateway_service(), state.config.summary_days);

    let page = match controller.load(query.driver.as_deref()).await {
        Ok(view) => DashboardTemplate::from_view(view),
        Err(e) => {
            tracing::warn!("⚠️ Dashboard load failed: {}", e);
            DashboardTemplate::failed(e.to_string())
        }
    };
    Ok(Html(page.render()?))
}

/// GET /check?id=FL-0001&employeeCode=E1
async fn check_page(
    State(state): State<AppState>,
    Query(query): Query<CheckQuery>,
) -> AppResult<Html<String>> {
    let controller = ChecklistController::new(state.gateway_service());
    let form = controller
        .open(query.id.as_deref(), query.employee_code.as_deref())
        .await;
    Ok(Html(CheckTemplate::from_form(&form).render()?))
}

/// POST /check
async fn check_submit(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> AppResult<Html<String>> {
    let controller = ChecklistController::new(state.gateway_service());
    let form = controller.handle(CheckFormInput::from_fields(&fields)).await;
    Ok(Html(CheckTemplate::from_form(&form).render()?))
}

/// GET /admin/missing
async fn missing_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    let page = match state.gateway_service().missing().await {
        Ok(report) => MissingTemplate {
            error: None,
            report: Some(report),
        },
        Err(e) => {
            tracing::warn!("⚠️ Missing list load failed: {}", e);
            MissingTemplate {
                error: Some(e.to_string()),
                report: None,
            }
        }
    };
    Ok(Html(page.render()?))
}
