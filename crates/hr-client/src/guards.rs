//! Pre-submission checks
//!
//! Each guard returns the first failing rule as [`ClientError::Validation`];
//! a failing guard means no request is sent.

use hr_contracts::{NewPayrollPayload, NewReviewPayload, ReviewUpdatePayload, RATING_RANGE};

use crate::error::{ClientError, ClientResult};

pub fn check_employee_name(name: &str) -> ClientResult<()> {
    if name.trim().is_empty() {
        return Err(ClientError::validation("Name is required"));
    }
    Ok(())
}

pub fn check_new_review(payload: &NewReviewPayload) -> ClientResult<()> {
    if payload.employee_id <= 0 {
        return Err(ClientError::validation("employee required"));
    }
    if payload.period.trim().is_empty() {
        return Err(ClientError::validation("period required"));
    }
    check_reviewer(&payload.reviewer)?;
    check_rating(payload.rating)
}

/// Only fields present in the update are checked
pub fn check_review_update(payload: &ReviewUpdatePayload) -> ClientResult<()> {
    if let Some(reviewer) = &payload.reviewer {
        check_reviewer(reviewer)?;
    }
    if let Some(rating) = payload.rating {
        check_rating(rating)?;
    }
    Ok(())
}

pub fn check_new_payroll(payload: &NewPayrollPayload) -> ClientResult<()> {
    if payload.employee_id <= 0 {
        return Err(ClientError::validation("employee required"));
    }
    if payload.period.trim().is_empty() {
        return Err(ClientError::validation("period required"));
    }
    if payload.base_salary < 0.0 {
        return Err(ClientError::validation("non-negative base salary required"));
    }
    Ok(())
}

fn check_reviewer(reviewer: &str) -> ClientResult<()> {
    if reviewer.trim().is_empty() {
        return Err(ClientError::validation("reviewer required"));
    }
    Ok(())
}

fn check_rating(rating: i32) -> ClientResult<()> {
    if !RATING_RANGE.contains(&rating) {
        return Err(ClientError::validation("rating must be between 1 and 5"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hr_models::PayrollInputs;

    fn review() -> NewReviewPayload {
        NewReviewPayload {
            employee_id: 1,
            period: "2024-Q4".into(),
            reviewer: "Lead".into(),
            rating: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_employee_name() {
        assert!(check_employee_name("Ana").is_ok());
        assert_eq!(
            check_employee_name("  ").unwrap_err().message(),
            "Name is required"
        );
    }

    #[test]
    fn test_new_review_rule_order() {
        assert!(check_new_review(&review()).is_ok());

        let blank = NewReviewPayload::default();
        assert_eq!(check_new_review(&blank).unwrap_err().message(), "employee required");

        let no_period = NewReviewPayload {
            period: " ".into(),
            reviewer: String::new(),
            ..review()
        };
        assert_eq!(check_new_review(&no_period).unwrap_err().message(), "period required");

        let no_reviewer = NewReviewPayload {
            reviewer: "\t".into(),
            rating: 9,
            ..review()
        };
        assert_eq!(check_new_review(&no_reviewer).unwrap_err().message(), "reviewer required");

        for rating in [0, 6, -1] {
            let bad = NewReviewPayload { rating, ..review() };
            assert_eq!(
                check_new_review(&bad).unwrap_err().message(),
                "rating must be between 1 and 5"
            );
        }
    }

    #[test]
    fn test_review_update_checks_present_fields_only() {
        assert!(check_review_update(&ReviewUpdatePayload::default()).is_ok());

        let rating_only = ReviewUpdatePayload {
            rating: Some(5),
            ..Default::default()
        };
        assert!(check_review_update(&rating_only).is_ok());

        let blank_reviewer = ReviewUpdatePayload {
            reviewer: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(
            check_review_update(&blank_reviewer).unwrap_err().message(),
            "reviewer required"
        );
    }

    #[test]
    fn test_new_payroll() {
        let inputs = PayrollInputs {
            base_salary: 1000.0,
            ..Default::default()
        };
        assert!(check_new_payroll(&NewPayrollPayload::new(1, "2024-12", inputs)).is_ok());

        assert_eq!(
            check_new_payroll(&NewPayrollPayload::new(0, "2024-12", inputs))
                .unwrap_err()
                .message(),
            "employee required"
        );
        assert_eq!(
            check_new_payroll(&NewPayrollPayload::new(1, "  ", inputs))
                .unwrap_err()
                .message(),
            "period required"
        );

        let negative = PayrollInputs {
            base_salary: -0.01,
            ..Default::default()
        };
        assert_eq!(
            check_new_payroll(&NewPayrollPayload::new(1, "2024-12", negative))
                .unwrap_err()
                .message(),
            "non-negative base salary required"
        );
    }
}
