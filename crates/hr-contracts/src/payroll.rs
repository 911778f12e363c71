//! Payroll contracts

use hr_core::error::ValidationErrors;
use hr_core::result::ValidationResult;
use hr_core::traits::Id;
use hr_models::PayrollInputs;
use serde::{Deserialize, Serialize};

use crate::base::{trimmed_present, Contract};

/// Body of `POST /payroll`. Omitted numeric fields are zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayrollPayload {
    #[serde(default)]
    pub employee_id: Id,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub base_salary: f64,
    #[serde(default)]
    pub overtime_hours: f64,
    #[serde(default)]
    pub overtime_rate: f64,
    #[serde(default)]
    pub bonuses: f64,
    #[serde(default)]
    pub deductions: f64,
}

impl NewPayrollPayload {
    pub fn new(employee_id: Id, period: impl Into<String>, inputs: PayrollInputs) -> Self {
        Self {
            employee_id,
            period: period.into(),
            base_salary: inputs.base_salary,
            overtime_hours: inputs.overtime_hours,
            overtime_rate: inputs.overtime_rate,
            bonuses: inputs.bonuses,
            deductions: inputs.deductions,
        }
    }

    pub fn inputs(&self) -> PayrollInputs {
        PayrollInputs {
            base_salary: self.base_salary,
            overtime_hours: self.overtime_hours,
            overtime_rate: self.overtime_rate,
            bonuses: self.bonuses,
            deductions: self.deductions,
        }
    }

    pub fn normalized(&self) -> Self {
        Self {
            period: self.period.trim().to_string(),
            ..self.clone()
        }
    }
}

/// Contract for appending a payroll record
pub struct CreatePayrollContract;

impl Contract<NewPayrollPayload> for CreatePayrollContract {
    fn validate(&self, entity: &NewPayrollPayload) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if entity.employee_id <= 0 {
            errors.add("employeeId is required");
        }
        if trimmed_present(&entity.period).is_none() {
            errors.add("period is required");
        }
        if entity.base_salary < 0.0 {
            errors.add("baseSalary must be >= 0");
        }
        if entity.overtime_hours < 0.0 || entity.overtime_rate < 0.0 {
            errors.add("overtime values must be >= 0");
        }
        if entity.bonuses < 0.0 {
            errors.add("bonuses must be >= 0");
        }
        if entity.deductions < 0.0 {
            errors.add("deductions must be >= 0");
        }

        errors.into_result()
    }
}
