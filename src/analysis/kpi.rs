//! Dashboard KPIs
//!
//! Two sources disagree about how many vehicles were checked today: the
//! live missing-vehicle list and the gateway's daily aggregate row. The
//! live list is authoritative; the aggregate figure is carried alongside
//! so a disagreement stays visible. Without an aggregate row for the day,
//! the count the missing report itself carries is compared instead.

use serde::Serialize;

use crate::models::{MissingReport, SummaryResponse};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionKpi {
    pub date: String,
    pub total: u64,
    pub missing_count: u64,
    /// `total - missing_count`, floored at zero.
    pub checked_count: u64,
    /// Whole percent, 0 when there are no vehicles.
    pub completion: u64,
    pub issue_today: u64,
    /// `checked_count` of today's aggregate row, when the gateway has one.
    pub aggregate_checked: Option<u64>,
    /// `checked` as sent with the missing report, if present.
    pub reported_checked: Option<u64>,
    pub mismatch: bool,
}

impl CompletionKpi {
    pub fn derive(missing: &MissingReport, summary: &SummaryResponse) -> Self {
        let total = missing.total;
        let missing_count = missing.missing.len() as u64;
        let checked_count = missing.derived_checked();
        let completion = completion_percent(checked_count, total);

        let today = summary.row_for(&missing.date);
        let issue_today = today.map(|row| row.issue_count).unwrap_or(0);
        let aggregate_checked = today.map(|row| row.checked_count);
        let reported_checked = missing.checked;

        let mut kpi = Self {
            date: missing.date.trim().to_string(),
            total,
            missing_count,
            checked_count,
            completion,
            issue_today,
            aggregate_checked,
            reported_checked,
            mismatch: false,
        };
        kpi.mismatch = kpi
            .compared_checked()
            .is_some_and(|other| other != checked_count);

        if kpi.mismatch {
            tracing::warn!(
                "⚠️ {} for {} reports {} checked, live list gives {}",
                if kpi.is_from_aggregate() { "Aggregate row" } else { "Missing report" },
                kpi.date,
                kpi.compared_checked().unwrap_or_default(),
                checked_count
            );
        }
        kpi
    }

    /// The figure the live count is compared with: the aggregate row when
    /// there is one, the missing report's own count otherwise.
    pub fn compared_checked(&self) -> Option<u64> {
        self.aggregate_checked.or(self.reported_checked)
    }

    pub fn is_from_aggregate(&self) -> bool {
        self.aggregate_checked.is_some()
    }
}

fn completion_percent(checked: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (checked as f64 / total as f64 * 100.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MissingVehicle, SummaryRow};

    fn missing_report(total: u64, missing: usize) -> MissingReport {
        MissingReport {
            date: "2024-05-02".into(),
            total,
            checked: Some(total.saturating_sub(missing as u64)),
            missing: (0..missing)
                .map(|i| MissingVehicle {
                    forklift_code: format!("FL-{i:04}"),
                    name: None,
                })
                .collect(),
        }
    }

    fn summary(rows: &[(&str, u64, u64)]) -> SummaryResponse {
        SummaryResponse {
            days: Some(30),
            data: rows
                .iter()
                .map(|(date, checked, issues)| SummaryRow {
                    date: date.to_string(),
                    checked_count: *checked,
                    issue_count: *issues,
                })
                .collect(),
        }
    }

    #[test]
    fn live_list_drives_checked_and_completion() {
        let kpi = CompletionKpi::derive(
            &missing_report(10, 3),
            &summary(&[("2024-05-02", 9, 2)]),
        );
        assert_eq!(kpi.missing_count, 3);
        assert_eq!(kpi.checked_count, 7);
        assert_eq!(kpi.completion, 70);
        assert_eq!(kpi.issue_today, 2);
        assert_eq!(kpi.aggregate_checked, Some(9));
        assert_eq!(kpi.compared_checked(), Some(9));
        assert!(kpi.mismatch);
    }

    #[test]
    fn agreeing_sources_are_not_a_mismatch() {
        let kpi = CompletionKpi::derive(
            &missing_report(10, 3),
            &summary(&[("2024-05-01", 4, 0), (" 2024-05-02 ", 7, 1)]),
        );
        assert!(!kpi.mismatch);
        assert_eq!(kpi.issue_today, 1);
    }

    #[test]
    fn no_row_for_today_means_zero_issues_and_no_mismatch() {
        let kpi = CompletionKpi::derive(&missing_report(4, 1), &summary(&[("2024-05-01", 4, 3)]));
        assert_eq!(kpi.issue_today, 0);
        assert_eq!(kpi.aggregate_checked, None);
        assert!(!kpi.mismatch);
        assert_eq!(kpi.completion, 75);
    }

    #[test]
    fn without_aggregate_row_the_reported_count_is_compared() {
        let mut report = missing_report(10, 3);
        report.checked = Some(8);
        let kpi = CompletionKpi::derive(&report, &summary(&[("2024-05-01", 10, 0)]));
        assert_eq!(kpi.aggregate_checked, None);
        assert!(!kpi.is_from_aggregate());
        assert_eq!(kpi.compared_checked(), Some(8));
        assert!(kpi.mismatch);
        assert_eq!(kpi.checked_count, 7);
    }

    #[test]
    fn aggregate_row_takes_precedence_over_reported_count() {
        let mut report = missing_report(10, 3);
        report.checked = Some(8);
        let kpi = CompletionKpi::derive(&report, &summary(&[("2024-05-02", 7, 0)]));
        assert!(kpi.is_from_aggregate());
        assert!(!kpi.mismatch);
    }

    #[test]
    fn no_comparable_figure_is_never_a_mismatch() {
        let mut report = missing_report(10, 3);
        report.checked = None;
        let kpi = CompletionKpi::derive(&report, &SummaryResponse::default());
        assert_eq!(kpi.compared_checked(), None);
        assert!(!kpi.mismatch);
    }

    #[test]
    fn zero_total_and_oversized_missing_list_floor_at_zero() {
        let kpi = CompletionKpi::derive(&missing_report(0, 0), &SummaryResponse::default());
        assert_eq!(kpi.completion, 0);

        let kpi = CompletionKpi::derive(&missing_report(2, 5), &SummaryResponse::default());
        assert_eq!(kpi.checked_count, 0);
        assert_eq!(kpi.completion, 0);
    }

    #[test]
    fn completion_rounds_to_nearest() {
        assert_eq!(completion_percent(2, 3), 67);
        assert_eq!(completion_percent(1, 3), 33);
        assert_eq!(completion_percent(1, 8), 13);
    }
}
