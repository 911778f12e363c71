//! # hr-models
//!
//! Domain models for HR Suite.
//!
//! Entities serialize with the camelCase field names used on the wire, so the
//! same structs are produced by the server and consumed by the client.

pub use hr_core::traits::{Entity, Id, Identifiable};

pub mod employee;
pub mod review;
pub mod payroll;

pub use employee::Employee;
pub use review::{
    ParseReviewStateError, PerformanceReview, ReviewAggregate, ReviewFilter, ReviewListResponse,
    ReviewState, TransitionError,
};
pub use payroll::{
    format_money, net_pay, PayrollAggregates, PayrollFilter, PayrollInputs, PayrollListResponse,
    PayrollPeriodTotal, PayrollRecord,
};
