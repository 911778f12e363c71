//! Result type aliases

use crate::error::ValidationErrors;

/// Result of running a contract or a pre-submission guard
pub type ValidationResult = Result<(), ValidationErrors>;

impl ValidationErrors {
    /// Turn a collected set of errors into a `ValidationResult`
    pub fn into_result(self) -> ValidationResult {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_errors_are_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_non_empty_errors_are_err() {
        let mut errors = ValidationErrors::new();
        errors.add("name is required");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.first_message(), Some("name is required"));
    }
}
