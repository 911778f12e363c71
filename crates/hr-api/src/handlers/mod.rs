//! API handlers

pub mod employees;
pub mod reviews;
pub mod payroll;
