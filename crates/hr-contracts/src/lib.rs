//! # hr-contracts
//!
//! Contract validation for HR Suite.
//!
//! Contracts validate request payloads before create/update operations.
//! The payload types double as the JSON bodies of the REST surface, so the
//! server deserializes exactly what the client serializes.

pub mod base;
pub mod employees;
pub mod reviews;
pub mod payroll;

pub use base::*;
pub use employees::{EmployeeContract, EmployeePayload};
pub use reviews::{
    CreateReviewContract, NewReviewPayload, ReviewTransitionContract, ReviewUpdatePayload,
    TransitionPayload, UpdateReviewContract, RATING_RANGE,
};
pub use payroll::{CreatePayrollContract, NewPayrollPayload};
