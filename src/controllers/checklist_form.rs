//! Checklist form state machine
//!
//! One instance per page render, keyed by the vehicle code from `?id=`.
//! Transitions mirror what the operator sees: roster loading, driver
//! selection with its per-driver status check, local validation and the
//! submission outcome. Nothing here performs I/O; the controller feeds
//! gateway results in.

use thiserror::Error;

use crate::models::{
    Answer, Answers, AnswerIndexOutOfRange, ChecklistSubmission, Employee, EmployeeRoster,
    VehicleStatus, MIN_ISSUE_DESCRIPTION_CHARS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No vehicle code, or the roster failed to load.
    Disabled,
    Initializing,
    Ready,
    CheckingStatus,
    /// This driver already has today's checklist for this vehicle.
    Blocked,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Local rule violations. Raised before any gateway call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Thiếu mã xe. Vui lòng mở link dạng /check?id=FL-0001")]
    MissingVehicle,

    #[error("Vui lòng chọn nhân viên")]
    NoEmployee,

    #[error("Bạn ({employee}) đã checklist xe {forklift_code} hôm nay rồi. Không thể gửi lại.")]
    AlreadyChecked {
        employee: String,
        forklift_code: String,
    },

    #[error("Có lỗi - vui lòng mô tả sự hư hỏng")]
    IssueDescriptionRequired,

    #[error("Biểu mẫu đang bận, vui lòng chờ")]
    Busy,
}

pub const MISSING_VEHICLE_HINT: &str = "/check?id=FL-0001";

#[derive(Debug, Clone)]
pub struct ChecklistForm {
    forklift_code: Option<String>,
    roster: EmployeeRoster,
    employee_code: Option<String>,
    answers: Answers,
    issue_description: String,
    status: Option<VehicleStatus>,
    phase: Phase,
    notice: Option<Notice>,
}

impl ChecklistForm {
    /// A blank vehicle code disables the whole form up front.
    pub fn new(forklift_code: Option<&str>) -> Self {
        let forklift_code = forklift_code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        let phase = if forklift_code.is_some() {
            Phase::Initializing
        } else {
            Phase::Disabled
        };

        Self {
            forklift_code,
            roster: EmployeeRoster::default(),
            employee_code: None,
            answers: Answers::default(),
            issue_description: String::new(),
            status: None,
            phase,
            notice: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn forklift_code(&self) -> Option<&str> {
        self.forklift_code.as_deref()
    }

    pub fn employees(&self) -> &[Employee] {
        &self.roster.employees
    }

    pub fn employee_code(&self) -> Option<&str> {
        self.employee_code.as_deref()
    }

    /// The roster entry for the selected code, if any.
    pub fn selected_employee(&self) -> Option<&Employee> {
        self.roster.find(self.employee_code.as_deref()?)
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn issue_description(&self) -> &str {
        &self.issue_description
    }

    pub fn status(&self) -> Option<&VehicleStatus> {
        self.status.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_checked(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.checked)
    }

    pub fn has_issue(&self) -> bool {
        self.answers.has_issue()
    }

    /// Inputs are editable only while idle and not yet checked.
    pub fn inputs_disabled(&self) -> bool {
        !matches!(self.phase, Phase::Ready)
    }

    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Ready && self.selected_employee().is_some() && !self.is_checked()
    }

    /// Warning shown once this driver is blocked for the vehicle today.
    pub fn blocked_message(&self) -> Option<String> {
        if !self.is_checked() {
            return None;
        }
        let vehicle = self.forklift_code.as_deref().unwrap_or_default();
        let employee = self.employee_display();
        Some(format!(
            "Tài xế {employee} đã checklist xe {vehicle} hôm nay. Không thể gửi lại."
        ))
    }

    pub fn roster_loaded(&mut self, employees: Vec<Employee>) {
        if self.phase != Phase::Initializing {
            return;
        }
        tracing::debug!("👥 Roster loaded: {} employees", employees.len());
        self.roster = EmployeeRoster { employees };
        self.phase = Phase::Ready;
    }

    pub fn roster_failed(&mut self, error: impl std::fmt::Display) {
        self.phase = Phase::Disabled;
        self.notice = Some(Notice::error(format!(
            "Không tải được danh sách nhân viên: {error}"
        )));
    }

    /// Changes the driver. Returns true when a status check must follow.
    pub fn select_employee(&mut self, employee_code: Option<&str>) -> bool {
        if !matches!(self.phase, Phase::Ready | Phase::Blocked) {
            return false;
        }
        let code = employee_code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        self.employee_code = code;
        self.status = None;
        self.notice = None;

        if self.employee_code.is_some() {
            self.phase = Phase::CheckingStatus;
            true
        } else {
            self.phase = Phase::Ready;
            false
        }
    }

    pub fn status_loaded(&mut self, status: VehicleStatus) {
        if self.phase != Phase::CheckingStatus {
            return;
        }
        let checked = status.checked;
        self.status = Some(status);
        if checked {
            self.phase = Phase::Blocked;
            self.notice = self.blocked_message().map(Notice::warning);
        } else {
            self.phase = Phase::Ready;
        }
    }

    pub fn status_failed(&mut self, error: impl std::fmt::Display) {
        if self.phase != Phase::CheckingStatus {
            return;
        }
        self.phase = Phase::Ready;
        self.notice = Some(Notice::error(format!(
            "Không kiểm tra được trạng thái xe: {error}"
        )));
    }

    /// Edits are ignored once the form is locked.
    pub fn set_answer(&mut self, index: usize, answer: Answer) -> Result<(), AnswerIndexOutOfRange> {
        if self.inputs_disabled() {
            return Ok(());
        }
        self.answers.set(index, answer)
    }

    pub fn set_issue_description(&mut self, text: &str) {
        if self.inputs_disabled() {
            return;
        }
        self.issue_description = text.to_string();
    }

    /// Runs the local checks and, when they pass, moves to `Submitting`
    /// and hands back the payload to post.
    pub fn begin_submit(&mut self) -> Result<ChecklistSubmission, FormError> {
        match self.validate() {
            Ok(submission) => {
                self.phase = Phase::Submitting;
                self.notice = None;
                Ok(submission)
            }
            Err(error) => {
                tracing::debug!("🚫 Submission blocked locally: {}", error);
                self.notice = Some(Notice::error(error.to_string()));
                Err(error)
            }
        }
    }

    pub fn submit_succeeded(&mut self, date: Option<String>) {
        self.status = Some(VehicleStatus {
            checked: true,
            date,
        });
        self.phase = Phase::Submitted;
        self.notice = Some(Notice::success("Gửi checklist thành công!"));
    }

    pub fn submit_failed(&mut self, error: impl std::fmt::Display) {
        self.phase = if self.is_checked() {
            Phase::Blocked
        } else {
            Phase::Ready
        };
        self.notice = Some(Notice::error(error.to_string()));
    }

    fn validate(&self) -> Result<ChecklistSubmission, FormError> {
        let forklift_code = self
            .forklift_code
            .clone()
            .ok_or(FormError::MissingVehicle)?;
        let employee = self.selected_employee().ok_or(FormError::NoEmployee)?;

        if self.is_checked() {
            return Err(FormError::AlreadyChecked {
                employee: employee.full_name.clone(),
                forklift_code,
            });
        }
        if self.phase != Phase::Ready {
            return Err(FormError::Busy);
        }
        if self.answers.has_issue()
            && self.issue_description.trim().chars().count() < MIN_ISSUE_DESCRIPTION_CHARS
        {
            return Err(FormError::IssueDescriptionRequired);
        }

        Ok(ChecklistSubmission {
            forklift_code,
            employee_code: employee.employee_code.clone(),
            employee_name: employee.full_name.clone(),
            answers: self.answers,
            issue_description: self.issue_description.clone(),
        })
    }

    fn employee_display(&self) -> String {
        match (self.selected_employee(), self.employee_code.as_deref()) {
            (Some(e), _) => e.label(),
            (None, Some(code)) => code.to_string(),
            (None, None) => String::new(),
        }
    }
}
