//! Typed gateway calls
//!
//! The relay routes forward raw JSON; the pages need decoded models. This
//! service goes through the same `GatewayClient` path and turns a gateway
//! `{error}` body or non-2xx answer into `AppError::UpstreamRejected`.

use serde::de::DeserializeOwned;

use crate::client::{GatewayAction, GatewayClient, GatewayReply};
use crate::models::{
    ChecklistSubmission, DriverActivityResponse, DriverReport, DriverReportsResponse, Employee,
    EmployeeRoster, MissingReport, SubmitReceipt, SummaryResponse, VehicleStatus,
};
use crate::utils::errors::{preview, AppError, AppResult};

#[derive(Clone)]
pub struct GatewayService {
    client: GatewayClient,
}

impl GatewayService {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    pub async fn employees(&self) -> AppResult<Vec<Employee>> {
        let reply = self.client.get(GatewayAction::Employees, &[]).await?;
        let roster: EmployeeRoster = decode(reply)?;
        Ok(roster.employees)
    }

    pub async fn forklift_status(
        &self,
        forklift_code: &str,
        employee_code: Option<&str>,
    ) -> AppResult<VehicleStatus> {
        let reply = self
            .client
            .get(
                GatewayAction::Status,
                &[
                    ("forkliftCode", forklift_code),
                    ("employeeCode", employee_code.unwrap_or_default()),
                ],
            )
            .await?;
        decode(reply)
    }

    pub async fn submit_checklist(&self, submission: &ChecklistSubmission) -> AppResult<SubmitReceipt> {
        tracing::info!(
            "📝 Submitting checklist for {} by {}",
            submission.forklift_code,
            submission.employee_code
        );
        let reply = self
            .client
            .post_json(GatewayAction::SubmitChecklist, submission)
            .await?;
        decode(reply)
    }

    pub async fn missing(&self) -> AppResult<MissingReport> {
        let reply = self.client.get(GatewayAction::Missing, &[]).await?;
        decode(reply)
    }

    pub async fn summary(&self, days: u32) -> AppResult<SummaryResponse> {
        let days = days.to_string();
        let reply = self
            .client
            .get(GatewayAction::Summary, &[("days", days.as_str())])
            .await?;
        decode(reply)
    }

    pub async fn drivers(&self, date: Option<&str>) -> AppResult<DriverActivityResponse> {
        let reply = self
            .client
            .get(GatewayAction::Drivers, &[("date", date.unwrap_or_default())])
            .await?;
        decode(reply)
    }

    pub async fn driver_reports(
        &self,
        employee_code: &str,
        date: Option<&str>,
    ) -> AppResult<Vec<DriverReport>> {
        let reply = self
            .client
            .get(
                GatewayAction::DriverReports,
                &[
                    ("employeeCode", employee_code),
                    ("date", date.unwrap_or_default()),
                ],
            )
            .await?;
        let reports: DriverReportsResponse = decode(reply)?;
        Ok(reports.reports)
    }
}

fn decode<T: DeserializeOwned>(reply: GatewayReply) -> AppResult<T> {
    if let Some(message) = reply.error_message() {
        return Err(AppError::UpstreamRejected {
            status: reply.status.as_u16(),
            message,
        });
    }
    if !reply.status.is_success() {
        return Err(AppError::UpstreamRejected {
            status: reply.status.as_u16(),
            message: format!("Apps Script responded with HTTP {}", reply.status),
        });
    }

    let GatewayReply { status, body, url } = reply;
    let raw = body.to_string();
    serde_json::from_value(body).map_err(|e| AppError::UpstreamMalformed {
        status: status.as_u16(),
        preview: preview(&raw),
        url,
        reason: e.to_string(),
    })
}
