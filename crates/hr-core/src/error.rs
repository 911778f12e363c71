//! Core error types for HR Suite
//!
//! Validation failures are collected in order so that the first broken rule
//! can be reported as a single message, which is what the REST surface and
//! the API client expose.

use thiserror::Error;

/// Ordered validation errors collection
#[derive(Error, Debug, Default, Clone, PartialEq, Eq)]
#[error("{}", .messages.join(", "))]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection holding a single error
    pub fn single(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(message);
        errors
    }

    /// Record a broken rule, e.g. "period is required"
    pub fn add(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Message of the first rule that failed
    pub fn first_message(&self) -> Option<&str> {
        self.messages.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_keep_insertion_order() {
        let mut errors = ValidationErrors::new();
        errors.add("employeeId is required");
        errors.add("period is required");

        assert_eq!(errors.first_message(), Some("employeeId is required"));
        assert_eq!(
            errors.to_string(),
            "employeeId is required, period is required"
        );
    }

    #[test]
    fn test_single() {
        let errors = ValidationErrors::single("invalid state");
        assert!(!errors.is_empty());
        assert_eq!(errors.first_message(), Some("invalid state"));
    }
}
