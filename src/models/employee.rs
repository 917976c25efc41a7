//! Employee roster as published by the gateway.

use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(deserialize_with = "lenient::text")]
    pub employee_code: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub full_name: String,
}

impl Employee {
    /// Label used in the driver picker, e.g. `Nguyễn Văn A (E1)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.full_name, self.employee_code)
    }
}

/// `{employees: [...]}`. A missing list is an empty roster.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeRoster {
    #[serde(default)]
    pub employees: Vec<Employee>,
}

impl EmployeeRoster {
    pub fn find(&self, employee_code: &str) -> Option<&Employee> {
        self.employees
            .iter()
            .find(|e| e.employee_code == employee_code)
    }
}
