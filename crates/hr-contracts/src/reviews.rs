//! Performance review contracts
//!
//! - create: employee, period, reviewer and rating are required
//! - update: the same field rules for the fields present; the employee
//!   cannot be changed once a review exists
//! - transition: the target state must be one of the lifecycle states

use std::ops::RangeInclusive;

use hr_core::error::ValidationErrors;
use hr_core::result::ValidationResult;
use hr_core::traits::Id;
use hr_models::ReviewState;
use serde::{Deserialize, Serialize};

use crate::base::{trimmed_present, Contract};

/// Allowed rating values
pub const RATING_RANGE: RangeInclusive<i32> = 1..=5;

const RATING_MESSAGE: &str = "rating must be between 1 and 5";

/// Body of `POST /reviews`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReviewPayload {
    #[serde(default)]
    pub employee_id: Id,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub reviewer: String,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub strengths: String,
    #[serde(default)]
    pub opportunities: String,
}

impl NewReviewPayload {
    /// Copy with every text field trimmed
    pub fn normalized(&self) -> Self {
        Self {
            employee_id: self.employee_id,
            period: self.period.trim().to_string(),
            reviewer: self.reviewer.trim().to_string(),
            rating: self.rating,
            strengths: self.strengths.trim().to_string(),
            opportunities: self.opportunities.trim().to_string(),
        }
    }
}

/// Body of `PUT /reviews/{id}`; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdatePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strengths: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opportunities: Option<String>,
}

impl ReviewUpdatePayload {
    pub fn is_empty(&self) -> bool {
        self.reviewer.is_none()
            && self.rating.is_none()
            && self.strengths.is_none()
            && self.opportunities.is_none()
    }

    /// Copy with the present text fields trimmed
    pub fn normalized(&self) -> Self {
        let trim = |v: &Option<String>| v.as_deref().map(|s| s.trim().to_string());
        Self {
            reviewer: trim(&self.reviewer),
            rating: self.rating,
            strengths: trim(&self.strengths),
            opportunities: trim(&self.opportunities),
        }
    }
}

/// Body of `PUT /reviews/{id}/status`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionPayload {
    #[serde(default)]
    pub state: String,
}

impl TransitionPayload {
    pub fn new(state: ReviewState) -> Self {
        Self {
            state: state.as_str().to_string(),
        }
    }
}

fn validate_rating(rating: i32, errors: &mut ValidationErrors) {
    if !RATING_RANGE.contains(&rating) {
        errors.add(RATING_MESSAGE);
    }
}

/// Contract for creating a review
pub struct CreateReviewContract;

impl Contract<NewReviewPayload> for CreateReviewContract {
    fn validate(&self, entity: &NewReviewPayload) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if entity.employee_id <= 0 {
            errors.add("employeeId is required");
        }
        if trimmed_present(&entity.period).is_none() {
            errors.add("period is required");
        }
        if trimmed_present(&entity.reviewer).is_none() {
            errors.add("reviewer is required");
        }
        validate_rating(entity.rating, &mut errors);

        errors.into_result()
    }
}

/// Contract for editing a review's content fields
pub struct UpdateReviewContract;

impl Contract<ReviewUpdatePayload> for UpdateReviewContract {
    fn validate(&self, entity: &ReviewUpdatePayload) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if let Some(reviewer) = &entity.reviewer {
            if trimmed_present(reviewer).is_none() {
                errors.add("reviewer is required");
            }
        }
        if let Some(rating) = entity.rating {
            validate_rating(rating, &mut errors);
        }

        errors.into_result()
    }
}

/// Contract for state-set requests. Only checks that the target names a
/// lifecycle state; whether it is the successor of the current state is
/// decided against the stored review.
pub struct ReviewTransitionContract;

impl ReviewTransitionContract {
    /// Validate and parse the requested target state
    pub fn target(&self, payload: &TransitionPayload) -> Result<ReviewState, ValidationErrors> {
        self.validate(payload)?;
        payload
            .state
            .parse()
            .map_err(|_| ValidationErrors::single("invalid state"))
    }
}

impl Contract<TransitionPayload> for ReviewTransitionContract {
    fn validate(&self, entity: &TransitionPayload) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        match trimmed_present(&entity.state) {
            None => errors.add("state is required"),
            Some(state) if state.parse::<ReviewState>().is_err() => {
                errors.add("invalid state")
            }
            Some(_) => {}
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_review() -> NewReviewPayload {
        NewReviewPayload {
            employee_id: 1,
            period: "2024-Q4".into(),
            reviewer: "Boss".into(),
            rating: 3,
            strengths: "A".into(),
            opportunities: "B".into(),
        }
    }

    #[test]
    fn test_valid_review() {
        assert!(CreateReviewContract.validate(&valid_review()).is_ok());
    }

    #[test]
    fn test_create_rules_in_order() {
        let cases = [
            (NewReviewPayload::default(), "employeeId is required"),
            (
                NewReviewPayload {
                    employee_id: 1,
                    ..Default::default()
                },
                "period is required",
            ),
            (
                NewReviewPayload {
                    employee_id: 1,
                    period: "Q1".into(),
                    ..Default::default()
                },
                "reviewer is required",
            ),
            (
                NewReviewPayload {
                    employee_id: 1,
                    period: "Q1".into(),
                    reviewer: "Boss".into(),
                    rating: 6,
                    ..Default::default()
                },
                "rating must be between 1 and 5",
            ),
        ];

        for (payload, expected) in cases {
            let err = CreateReviewContract.validate(&payload).unwrap_err();
            assert_eq!(err.first_message(), Some(expected));
        }
    }

    #[test]
    fn test_rating_bounds_inclusive() {
        for rating in [1, 5] {
            let payload = NewReviewPayload {
                rating,
                ..valid_review()
            };
            assert!(CreateReviewContract.validate(&payload).is_ok());
        }
        for rating in [0, 6, -1] {
            let payload = NewReviewPayload {
                rating,
                ..valid_review()
            };
            assert!(CreateReviewContract.validate(&payload).is_err());
        }
    }

    #[test]
    fn test_normalized_trims_text() {
        let payload = NewReviewPayload {
            period: " 2024-Q4 ".into(),
            reviewer: " Lead ".into(),
            strengths: "  ".into(),
            ..valid_review()
        }
        .normalized();

        assert_eq!(payload.period, "2024-Q4");
        assert_eq!(payload.reviewer, "Lead");
        assert_eq!(payload.strengths, "");
    }

    #[test]
    fn test_update_validates_present_fields_only() {
        assert!(UpdateReviewContract
            .validate(&ReviewUpdatePayload::default())
            .is_ok());

        let err = UpdateReviewContract
            .validate(&ReviewUpdatePayload {
                rating: Some(9),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.first_message(), Some("rating must be between 1 and 5"));

        let err = UpdateReviewContract
            .validate(&ReviewUpdatePayload {
                reviewer: Some("  ".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.first_message(), Some("reviewer is required"));
    }

    #[test]
    fn test_update_payload_omits_absent_fields() {
        let payload = ReviewUpdatePayload {
            reviewer: Some(" QA ".into()),
            rating: Some(4),
            ..Default::default()
        }
        .normalized();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({ "reviewer": "QA", "rating": 4 }));
    }

    #[test]
    fn test_transition_target() {
        let contract = ReviewTransitionContract;
        assert_eq!(
            contract.target(&TransitionPayload::new(ReviewState::Submitted)),
            Ok(ReviewState::Submitted)
        );

        let blank = contract
            .target(&TransitionPayload { state: " ".into() })
            .unwrap_err();
        assert_eq!(blank.first_message(), Some("state is required"));

        let unknown = contract
            .target(&TransitionPayload {
                state: "rejected".into(),
            })
            .unwrap_err();
        assert_eq!(unknown.first_message(), Some("invalid state"));
    }
}
