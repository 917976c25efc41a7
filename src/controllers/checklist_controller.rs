use std::collections::HashMap;

use crate::controllers::checklist_form::{ChecklistForm, Phase};
use crate::models::{Answer, QUESTION_COUNT};
use crate::services::gateway_service::GatewayService;

/// Fields posted by the `/check` form.
#[derive(Debug, Clone, Default)]
pub struct CheckFormInput {
    pub forklift_code: Option<String>,
    pub employee_code: Option<String>,
    pub answers: Vec<(usize, Answer)>,
    pub issue_description: String,
    pub intent: FormIntent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormIntent {
    /// Driver changed; re-render with fresh status.
    #[default]
    Select,
    Submit,
}

impl CheckFormInput {
    /// Reads `id`, `employeeCode`, `q1`..`q11`, `issueDescription` and
    /// `intent`. Unrecognised answers count as PASS.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let answers = (0..QUESTION_COUNT)
            .filter_map(|i| {
                let raw = fields.get(&format!("q{}", i + 1))?;
                Some((i, Answer::parse(raw).unwrap_or_default()))
            })
            .collect();

        let intent = match fields.get("intent").map(|s| s.trim()) {
            Some("submit") => FormIntent::Submit,
            _ => FormIntent::Select,
        };

        Self {
            forklift_code: fields.get("id").cloned(),
            employee_code: fields.get("employeeCode").cloned(),
            answers,
            issue_description: fields
                .get("issueDescription")
                .cloned()
                .unwrap_or_default(),
            intent,
        }
    }
}

pub struct ChecklistController {
    service: GatewayService,
}

impl ChecklistController {
    pub fn new(service: GatewayService) -> Self {
        Self { service }
    }

    /// GET /check: roster plus, when a driver is preselected, their status.
    pub async fn open(&self, forklift_code: Option<&str>, employee_code: Option<&str>) -> ChecklistForm {
        let mut form = ChecklistForm::new(forklift_code);
        self.load(&mut form, employee_code).await;
        form
    }

    /// POST /check: rebuilds the form from the posted fields and, for a
    /// submit, validates locally before calling the gateway.
    pub async fn handle(&self, input: CheckFormInput) -> ChecklistForm {
        let mut form = ChecklistForm::new(input.forklift_code.as_deref());
        self.load(&mut form, input.employee_code.as_deref()).await;

        for (index, answer) in &input.answers {
            if let Err(e) = form.set_answer(*index, *answer) {
                tracing::debug!("Ignoring answer: {}", e);
            }
        }
        form.set_issue_description(&input.issue_description);

        if input.intent == FormIntent::Submit && form.phase() != Phase::Disabled {
            self.submit(&mut form).await;
        }
        form
    }

    async fn load(&self, form: &mut ChecklistForm, employee_code: Option<&str>) {
        // Without a vehicle code nothing is fetched.
        let Some(forklift_code) = form.forklift_code().map(str::to_string) else {
            return;
        };
        let employee_code = employee_code.map(str::trim).filter(|c| !c.is_empty());

        let (roster, status) = match employee_code {
            Some(code) => {
                let (roster, status) = tokio::join!(
                    self.service.employees(),
                    self.service.forklift_status(&forklift_code, Some(code)),
                );
                (roster, Some(status))
            }
            None => (self.service.employees().await, None),
        };

        match roster {
            Ok(employees) => form.roster_loaded(employees),
            Err(e) => {
                tracing::warn!("⚠️ Roster load failed: {}", e);
                form.roster_failed(e);
                return;
            }
        }

        if form.select_employee(employee_code) {
            match status {
                Some(Ok(status)) => form.status_loaded(status),
                Some(Err(e)) => {
                    tracing::warn!("⚠️ Status check for {} failed: {}", forklift_code, e);
                    form.status_failed(e);
                }
                None => {}
            }
        }
    }

    async fn submit(&self, form: &mut ChecklistForm) {
        let Ok(submission) = form.begin_submit() else {
            return;
        };

        match self.service.submit_checklist(&submission).await {
            Ok(receipt) => {
                tracing::info!(
                    "✅ Checklist stored for {} by {}",
                    submission.forklift_code,
                    submission.employee_code
                );
                form.submit_succeeded(receipt.date);
            }
            Err(e) => {
                tracing::warn!("⚠️ Checklist submission failed: {}", e);
                form.submit_failed(e);
            }
        }
    }
}
