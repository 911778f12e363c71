//! Employee contracts

use hr_core::error::ValidationErrors;
use hr_core::result::ValidationResult;
use serde::{Deserialize, Serialize};

use crate::base::{trimmed_present, Contract};

/// Body of `POST /employees` and `PUT /employees/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayload {
    #[serde(default)]
    pub name: String,
}

impl EmployeePayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Copy with the name trimmed, as it is persisted
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}

/// Same rules apply to create and rename
pub struct EmployeeContract;

impl Contract<EmployeePayload> for EmployeeContract {
    fn validate(&self, entity: &EmployeePayload) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        if trimmed_present(&entity.name).is_none() {
            errors.add("name is required");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_rejected() {
        let err = EmployeeContract
            .validate(&EmployeePayload::new("   "))
            .unwrap_err();
        assert_eq!(err.first_message(), Some("name is required"));
    }

    #[test]
    fn test_name_is_trimmed() {
        let payload = EmployeePayload::new("  Ana  ");
        assert!(EmployeeContract.validate(&payload).is_ok());
        assert_eq!(payload.normalized().name, "Ana");
    }
}
