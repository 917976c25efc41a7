//! Askama page templates and the flat view models they render.
//!
//! Templates only read plain fields and booleans; every decision about
//! what is enabled or shown is made here, from the domain state.

use askama::Template;

use crate::analysis::kpi::CompletionKpi;
use crate::analysis::trend_chart::TrendChart;
use crate::controllers::checklist_form::{ChecklistForm, NoticeKind, Phase, MISSING_VEHICLE_HINT};
use crate::controllers::dashboard_controller::{DashboardView, DriverDetailOutcome};
use crate::models::{Answer, DriverActivity, DriverReport, MissingReport, QUESTIONS};

pub struct NoticeView {
    pub class: &'static str,
    pub text: String,
}

pub struct EmployeeOption {
    pub code: String,
    pub label: String,
    pub selected: bool,
}

pub struct AnswerOption {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

pub struct QuestionRow {
    pub name: String,
    pub number: usize,
    pub text: &'static str,
    pub options: Vec<AnswerOption>,
}

#[derive(Template)]
#[template(path = "check.html")]
pub struct CheckTemplate {
    pub forklift_code: String,
    pub missing_vehicle: bool,
    pub hint: &'static str,
    pub roster_available: bool,
    pub employee_select_disabled: bool,
    pub employees: Vec<EmployeeOption>,
    pub questions: Vec<QuestionRow>,
    pub issue_description: String,
    pub has_issue: bool,
    pub inputs_disabled: bool,
    pub can_submit: bool,
    pub checked_date: Option<String>,
    pub notice: Option<NoticeView>,
}

impl CheckTemplate {
    pub fn from_form(form: &ChecklistForm) -> Self {
        let selected = form.employee_code().unwrap_or_default();
        let employees = form
            .employees()
            .iter()
            .map(|e| EmployeeOption {
                code: e.employee_code.clone(),
                label: e.label(),
                selected: e.employee_code == selected,
            })
            .collect();

        let questions = QUESTIONS
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let current = form.answers().get(i).unwrap_or_default();
                QuestionRow {
                    name: format!("q{}", i + 1),
                    number: i + 1,
                    text,
                    options: Answer::ALL
                        .iter()
                        .map(|a| AnswerOption {
                            value: a.as_str(),
                            label: a.label(),
                            checked: *a == current,
                        })
                        .collect(),
                }
            })
            .collect();

        let notice = form.notice().map(|n| NoticeView {
            class: notice_class(n.kind),
            text: n.text.clone(),
        });

        Self {
            forklift_code: form.forklift_code().unwrap_or_default().to_string(),
            missing_vehicle: form.forklift_code().is_none(),
            hint: MISSING_VEHICLE_HINT,
            roster_available: !form.employees().is_empty(),
            employee_select_disabled: !matches!(form.phase(), Phase::Ready | Phase::Blocked),
            employees,
            questions,
            issue_description: form.issue_description().to_string(),
            has_issue: form.has_issue(),
            inputs_disabled: form.inputs_disabled(),
            can_submit: form.can_submit(),
            checked_date: form
                .status()
                .filter(|s| s.checked)
                .map(|s| s.date.clone().unwrap_or_else(|| "hôm nay".to_string())),
            notice,
        }
    }
}

fn notice_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "notice success",
        NoticeKind::Warning => "notice warning",
        NoticeKind::Error => "notice error",
    }
}

pub struct DriverRow {
    pub employee_code: String,
    pub employee_name: String,
    pub count: u64,
    pub href: String,
    pub active: bool,
}

pub struct DriverDetailView {
    pub title: String,
    pub reports: Option<Vec<DriverReport>>,
    pub error: Option<String>,
}

pub struct DashboardBody {
    pub kpi: CompletionKpi,
    pub missing: MissingReport,
    pub drivers: Vec<DriverRow>,
    pub chart: Option<TrendChart>,
    pub detail: Option<DriverDetailView>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub error: Option<String>,
    pub body: Option<DashboardBody>,
}

impl DashboardTemplate {
    pub fn failed(message: String) -> Self {
        Self {
            error: Some(message),
            body: None,
        }
    }

    pub fn from_view(view: DashboardView) -> Self {
        let active = view
            .driver_detail
            .as_ref()
            .map(|d| d.employee_code.clone())
            .unwrap_or_default();
        let drivers = view
            .drivers
            .into_iter()
            .map(|d: DriverActivity| DriverRow {
                href: format!("/?driver={}", urlencoding::encode(&d.employee_code)),
                active: d.employee_code == active,
                employee_code: d.employee_code,
                employee_name: d.employee_name,
                count: d.count,
            })
            .collect();

        let detail = view.driver_detail.map(|d| {
            let title = match &d.employee_name {
                Some(name) => format!("{name} ({})", d.employee_code),
                None => d.employee_code.clone(),
            };
            let (reports, error) = match d.outcome {
                DriverDetailOutcome::Loaded(reports) => (Some(reports), None),
                DriverDetailOutcome::Failed(message) => (None, Some(message)),
            };
            DriverDetailView {
                title,
                reports,
                error,
            }
        });

        Self {
            error: None,
            body: Some(DashboardBody {
                kpi: view.kpi,
                missing: view.missing,
                drivers,
                chart: view.chart,
                detail,
            }),
        }
    }
}

#[derive(Template)]
#[template(path = "missing.html")]
pub struct MissingTemplate {
    pub error: Option<String>,
    pub report: Option<MissingReport>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, VehicleStatus};

    #[test]
    fn check_view_marks_selection_and_answers() {
        let mut form = ChecklistForm::new(Some("FL-0001"));
        form.roster_loaded(vec![Employee {
            employee_code: "E1".into(),
            full_name: "An".into(),
        }]);
        form.select_employee(Some("E1"));
        form.status_loaded(VehicleStatus::default());
        form.set_answer(1, Answer::Fail).unwrap();

        let view = CheckTemplate::from_form(&form);
        assert!(view.employees[0].selected);
        assert!(view.has_issue);
        assert!(view.can_submit);
        let q2 = &view.questions[1];
        assert_eq!(q2.name, "q2");
        assert!(q2.options.iter().any(|o| o.value == "FAIL" && o.checked));

        let html = view.render().unwrap();
        assert!(html.contains("FL-0001"));
        assert!(html.contains("An (E1)"));
    }

    #[test]
    fn check_view_without_vehicle_shows_hint() {
        let view = CheckTemplate::from_form(&ChecklistForm::new(None));
        assert!(view.missing_vehicle);
        assert!(view.inputs_disabled);
        let html = view.render().unwrap();
        assert!(html.contains("/check?id=FL-0001"));
    }

    #[test]
    fn failed_dashboard_renders_only_the_error() {
        let html = DashboardTemplate::failed("Missing GAS_URL in env".into())
            .render()
            .unwrap();
        assert!(html.contains("Missing GAS_URL in env"));
        assert!(!html.contains("Tỉ lệ hoàn thành"));
    }
}
