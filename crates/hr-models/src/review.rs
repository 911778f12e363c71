//! Performance review model and lifecycle
//!
//! Table: performance_reviews
//!
//! A review moves forward through exactly one path:
//!
//! ```text
//! draft --advance--> submitted --advance--> approved (terminal)
//! ```
//!
//! There is no reject or reverse transition.

use std::fmt;
use std::str::FromStr;

use hr_core::traits::{Entity, Id, Identifiable};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state of a performance review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewState {
    #[default]
    Draft,
    Submitted,
    Approved,
}

/// Rejected state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("review is already {0} and cannot advance")]
    Terminal(ReviewState),
    #[error("cannot move review from {from} to {to}")]
    Illegal { from: ReviewState, to: ReviewState },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown review state: {0}")]
pub struct ParseReviewStateError(pub String);

impl ReviewState {
    pub const ALL: [ReviewState; 3] = [Self::Draft, Self::Submitted, Self::Approved];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
        }
    }

    /// The single legal successor, `None` once approved
    pub fn next(&self) -> Option<ReviewState> {
        match self {
            Self::Draft => Some(Self::Submitted),
            Self::Submitted => Some(Self::Approved),
            Self::Approved => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }

    pub fn can_transition_to(&self, target: ReviewState) -> bool {
        self.next() == Some(target)
    }

    /// Validate an explicit state-set request against the transition table
    pub fn transition_to(self, target: ReviewState) -> Result<ReviewState, TransitionError> {
        if self.is_terminal() {
            return Err(TransitionError::Terminal(self));
        }
        if !self.can_transition_to(target) {
            return Err(TransitionError::Illegal {
                from: self,
                to: target,
            });
        }
        Ok(target)
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewState {
    type Err = ParseReviewStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| ParseReviewStateError(s.to_string()))
    }
}

/// A periodic rating record for one employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReview {
    pub id: Id,
    pub employee_id: Id,
    /// Joined from the employee registry, read-only
    #[serde(default)]
    pub employee_name: String,
    /// Free-text label such as "2024-Q4"
    pub period: String,
    pub reviewer: String,
    /// 1 to 5 inclusive
    pub rating: i32,
    #[serde(default)]
    pub strengths: String,
    #[serde(default)]
    pub opportunities: String,
    pub state: ReviewState,
}

impl PerformanceReview {
    /// Target of the "advance" action, if the review is not finished
    pub fn next_state(&self) -> Option<ReviewState> {
        self.state.next()
    }
}

impl Identifiable for PerformanceReview {
    fn id(&self) -> Id {
        self.id
    }
}

impl Entity for PerformanceReview {
    const TYPE_NAME: &'static str = "PerformanceReview";
}

/// Per-employee summary computed from the review set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAggregate {
    pub employee_id: Id,
    pub employee_name: String,
    pub average_rating: f64,
    pub latest_state: ReviewState,
    pub count: i64,
}

/// Body of `GET /reviews`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewListResponse {
    pub items: Vec<PerformanceReview>,
    pub aggregates: Vec<ReviewAggregate>,
}

/// Filter for listing reviews; unset or zero/empty values are inactive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub employee_id: Option<Id>,
    pub period: Option<String>,
    pub state: Option<ReviewState>,
}

impl ReviewFilter {
    pub fn employee_id(&self) -> Option<Id> {
        self.employee_id.filter(|id| *id > 0)
    }

    pub fn period(&self) -> Option<&str> {
        self.period.as_deref().filter(|p| !p.is_empty())
    }

    /// Active filters as query pairs, in wire order: employeeId, period, state
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.employee_id() {
            pairs.push(("employeeId", id.to_string()));
        }
        if let Some(period) = self.period() {
            pairs.push(("period", period.to_string()));
        }
        if let Some(state) = self.state {
            pairs.push(("state", state.as_str().to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        assert_eq!(ReviewState::Draft.next(), Some(ReviewState::Submitted));
        assert_eq!(ReviewState::Submitted.next(), Some(ReviewState::Approved));
        assert_eq!(ReviewState::Approved.next(), None);
        assert!(ReviewState::Approved.is_terminal());
    }

    #[test]
    fn test_only_two_transitions_are_legal() {
        let mut legal = Vec::new();
        for from in ReviewState::ALL {
            for to in ReviewState::ALL {
                if from.can_transition_to(to) {
                    legal.push((from, to));
                }
            }
        }
        assert_eq!(
            legal,
            vec![
                (ReviewState::Draft, ReviewState::Submitted),
                (ReviewState::Submitted, ReviewState::Approved),
            ]
        );
    }

    #[test]
    fn test_transition_to_rejects_skips_and_reversals() {
        assert_eq!(
            ReviewState::Draft.transition_to(ReviewState::Approved),
            Err(TransitionError::Illegal {
                from: ReviewState::Draft,
                to: ReviewState::Approved
            })
        );
        assert_eq!(
            ReviewState::Submitted.transition_to(ReviewState::Draft),
            Err(TransitionError::Illegal {
                from: ReviewState::Submitted,
                to: ReviewState::Draft
            })
        );
        assert_eq!(
            ReviewState::Approved.transition_to(ReviewState::Draft),
            Err(TransitionError::Terminal(ReviewState::Approved))
        );
        assert_eq!(
            ReviewState::Draft.transition_to(ReviewState::Submitted),
            Ok(ReviewState::Submitted)
        );
    }

    #[test]
    fn test_state_string_round_trip() {
        for state in ReviewState::ALL {
            assert_eq!(state.as_str().parse::<ReviewState>(), Ok(state));
            assert_eq!(
                serde_json::to_value(state).unwrap(),
                serde_json::json!(state.as_str())
            );
        }
        assert!("rejected".parse::<ReviewState>().is_err());
    }

    #[test]
    fn test_review_deserializes_from_wire() {
        let review: PerformanceReview = serde_json::from_value(serde_json::json!({
            "id": 1,
            "employeeId": 2,
            "employeeName": "A",
            "period": "2024-Q4",
            "reviewer": "Lead",
            "rating": 5,
            "strengths": "",
            "opportunities": "",
            "state": "draft"
        }))
        .unwrap();

        assert_eq!(review.state, ReviewState::Draft);
        assert_eq!(review.next_state(), Some(ReviewState::Submitted));
    }

    #[test]
    fn test_filter_query_pairs_order() {
        let filter = ReviewFilter {
            employee_id: Some(7),
            period: None,
            state: Some(ReviewState::Draft),
        };
        assert_eq!(
            filter.query_pairs(),
            vec![("employeeId", "7".to_string()), ("state", "draft".to_string())]
        );
    }

    #[test]
    fn test_inactive_filter_values_are_dropped() {
        let filter = ReviewFilter {
            employee_id: Some(0),
            period: Some(String::new()),
            state: None,
        };
        assert!(filter.query_pairs().is_empty());
    }
}
