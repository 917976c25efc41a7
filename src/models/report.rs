//! Administrative reports: missing vehicles, daily summary, driver activity.

use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MissingVehicle {
    #[serde(deserialize_with = "lenient::text")]
    pub forklift_code: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub name: Option<String>,
}

/// Vehicles without a checklist for `date`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissingReport {
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total: u64,
    /// As reported by the gateway; the dashboard derives its own figure.
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub checked: Option<u64>,
    #[serde(default)]
    pub missing: Vec<MissingVehicle>,
}

impl MissingReport {
    /// `total` minus the listed vehicles, floored at zero.
    pub fn derived_checked(&self) -> u64 {
        self.total.saturating_sub(self.missing.len() as u64)
    }

    /// The gateway's own figure, or the derived one when it sent none.
    pub fn checked_display(&self) -> u64 {
        self.checked.unwrap_or_else(|| self.derived_checked())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryRow {
    #[serde(deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub checked_count: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub issue_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub data: Vec<SummaryRow>,
}

impl SummaryResponse {
    /// Row whose date equals `date`, both sides trimmed.
    pub fn row_for(&self, date: &str) -> Option<&SummaryRow> {
        let date = date.trim();
        self.data.iter().find(|r| r.date.trim() == date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DriverActivity {
    #[serde(deserialize_with = "lenient::text")]
    pub employee_code: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub employee_name: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriverActivityResponse {
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub date: Option<String>,
    #[serde(default, alias = "data")]
    pub drivers: Vec<DriverActivity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Pass,
    HasIssue,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ReportStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Pass => "Đạt",
            ReportStatus::HasIssue => "Có sự cố",
            ReportStatus::Unknown => "-",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueItem {
    #[serde(default, deserialize_with = "lenient::count")]
    pub q: u64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub answer: String,
}

/// One submitted checklist, as listed in a driver's drill-down.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverReport {
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_at: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub forklift_code: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub employee_code: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub employee_name: String,
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default, deserialize_with = "lenient::text")]
    pub issue_description: String,
    #[serde(default)]
    pub issue_items: Vec<IssueItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriverReportsResponse {
    #[serde(default, alias = "data")]
    pub reports: Vec<DriverReport>,
}
