//! # hr-db
//!
//! Database layer for HR Suite.
//!
//! This crate provides SQLite database access using SQLx, including:
//!
//! - Connection pool management and schema bootstrap
//! - Repository pattern for the employee, review and payroll tables
//! - Filtered list queries and the aggregates computed on read
//!
//! ## Example
//!
//! ```ignore
//! use hr_core::config::AppConfig;
//! use hr_db::{Database, EmployeeRepository};
//!
//! let config = AppConfig::from_env()?;
//! let db = Database::connect(&config.database).await?;
//! db.init_schema().await?;
//!
//! let repo = EmployeeRepository::new(db.pool().clone());
//! let employees = repo.list().await?;
//! ```

pub mod pool;
pub mod schema;
pub mod repository;
pub mod employees;
pub mod reviews;
pub mod payroll;

// Re-exports
pub use pool::Database;
pub use repository::{Repository, RepositoryError, RepositoryResult};
pub use employees::{EmployeeRepository, EmployeeRow};
pub use reviews::{
    CreateReviewDto, ReviewAggregateRow, ReviewRepository, ReviewRow, UpdateReviewDto,
};
pub use payroll::{CreatePayrollDto, PayrollRepository, PayrollRow};
