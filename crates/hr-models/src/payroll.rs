//! Payroll model and net pay calculation
//!
//! Table: payroll_records (append-only)

use hr_core::traits::{Entity, Id, Identifiable};
use serde::{Deserialize, Serialize};

/// Compute net pay for one period.
///
/// `base + overtime_hours * overtime_rate + bonuses - deductions`, plain
/// floating-point arithmetic with no rounding.
pub fn net_pay(
    base_salary: f64,
    overtime_hours: f64,
    overtime_rate: f64,
    bonuses: f64,
    deductions: f64,
) -> f64 {
    base_salary + (overtime_hours * overtime_rate) + bonuses - deductions
}

/// Two-decimal rendering used by display layers
pub fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// The five numeric inputs of a payroll entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollInputs {
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

impl PayrollInputs {
    pub fn net_pay(&self) -> f64 {
        net_pay(
            self.base_salary,
            self.overtime_hours,
            self.overtime_rate,
            self.bonuses,
            self.deductions,
        )
    }
}

/// One computed pay-period entry for an employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRecord {
    pub id: Id,
    pub employee_id: Id,
    #[serde(default)]
    pub employee_name: String,
    pub period: String,
    pub base_salary: f64,
    pub overtime_hours: f64,
    pub overtime_rate: f64,
    pub bonuses: f64,
    pub deductions: f64,
    pub net_pay: f64,
}

impl Identifiable for PayrollRecord {
    fn id(&self) -> Id {
        self.id
    }
}

impl Entity for PayrollRecord {
    const TYPE_NAME: &'static str = "PayrollRecord";
}

/// Sum of net pay for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollPeriodTotal {
    pub period: String,
    #[serde(rename = "totalNet")]
    pub total_net: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollAggregates {
    pub totals_by_period: Vec<PayrollPeriodTotal>,
    pub grand_total_net: f64,
}

impl PayrollAggregates {
    /// Grand total is the sum of the listed period totals
    pub fn from_totals(totals_by_period: Vec<PayrollPeriodTotal>) -> Self {
        let grand_total_net = totals_by_period.iter().map(|t| t.total_net).sum();
        Self {
            totals_by_period,
            grand_total_net,
        }
    }
}

/// Body of `GET /payroll`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayrollListResponse {
    pub items: Vec<PayrollRecord>,
    pub aggregates: PayrollAggregates,
}

/// Filter for listing payroll records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayrollFilter {
    pub employee_id: Option<Id>,
    pub period: Option<String>,
}

impl PayrollFilter {
    pub fn employee_id(&self) -> Option<Id> {
        self.employee_id.filter(|id| *id > 0)
    }

    pub fn period(&self) -> Option<&str> {
        self.period.as_deref().filter(|p| !p.is_empty())
    }

    /// Active filters as query pairs, in wire order: employeeId, period
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.employee_id() {
            pairs.push(("employeeId", id.to_string()));
        }
        if let Some(period) = self.period() {
            pairs.push(("period", period.to_string()));
        }
        pairs
    }
}
