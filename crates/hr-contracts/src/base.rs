//! Base contract system

use hr_core::result::ValidationResult;

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Validate the payload, reporting every broken rule in order
    fn validate(&self, entity: &T) -> ValidationResult;
}

/// Trim a required text field and report whether anything is left
pub fn trimmed_present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
