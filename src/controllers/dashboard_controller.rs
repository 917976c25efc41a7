use crate::analysis::kpi::CompletionKpi;
use crate::analysis::trend_chart::TrendChart;
use crate::models::{DriverActivity, DriverReport, MissingReport, SummaryRow};
use crate::services::gateway_service::GatewayService;
use crate::utils::errors::AppResult;

/// Everything the dashboard page renders once all three loads succeeded.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub kpi: CompletionKpi,
    pub missing: MissingReport,
    pub summary: Vec<SummaryRow>,
    pub drivers: Vec<DriverActivity>,
    pub chart: Option<TrendChart>,
    pub driver_detail: Option<DriverDetail>,
}

/// Drill-down overlay for one driver. A failure stays inside the overlay.
#[derive(Debug, Clone)]
pub struct DriverDetail {
    pub employee_code: String,
    pub employee_name: Option<String>,
    pub outcome: DriverDetailOutcome,
}

#[derive(Debug, Clone)]
pub enum DriverDetailOutcome {
    Loaded(Vec<DriverReport>),
    Failed(String),
}

pub struct DashboardController {
    service: GatewayService,
    summary_days: u32,
}

impl DashboardController {
    pub fn new(service: GatewayService, summary_days: u32) -> Self {
        Self {
            service,
            summary_days,
        }
    }

    /// Missing list, summary window and today's driver activity, loaded
    /// together. The first failure aborts the whole view.
    pub async fn load(&self, driver: Option<&str>) -> AppResult<DashboardView> {
        let (missing, summary, activity) = tokio::try_join!(
            self.service.missing(),
            self.service.summary(self.summary_days),
            self.service.drivers(None),
        )?;

        let kpi = CompletionKpi::derive(&missing, &summary);
        let chart = TrendChart::build(&summary.data);

        tracing::info!(
            "📊 Dashboard {}: {}/{} checked, {} missing, {} issues",
            kpi.date,
            kpi.checked_count,
            kpi.total,
            kpi.missing_count,
            kpi.issue_today
        );

        let driver_detail = match driver.map(str::trim).filter(|c| !c.is_empty()) {
            Some(code) => Some(self.driver_detail(code, &missing.date, &activity.drivers).await),
            None => None,
        };

        Ok(DashboardView {
            kpi,
            missing,
            summary: summary.data,
            drivers: activity.drivers,
            chart,
            driver_detail,
        })
    }

    async fn driver_detail(
        &self,
        employee_code: &str,
        date: &str,
        drivers: &[DriverActivity],
    ) -> DriverDetail {
        let date = Some(date.trim()).filter(|d| !d.is_empty());
        let outcome = match self.service.driver_reports(employee_code, date).await {
            Ok(reports) => DriverDetailOutcome::Loaded(reports),
            Err(e) => {
                tracing::warn!("⚠️ Driver reports for {} failed: {}", employee_code, e);
                DriverDetailOutcome::Failed(e.to_string())
            }
        };

        DriverDetail {
            employee_code: employee_code.to_string(),
            employee_name: drivers
                .iter()
                .find(|d| d.employee_code == employee_code)
                .map(|d| d.employee_name.clone())
                .filter(|n| !n.is_empty()),
            outcome,
        }
    }
}
