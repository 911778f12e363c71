//! # hr-core
//!
//! Core types, traits, and utilities for HR Suite.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Validation error collection shared by server and client
//! - Result type aliases
//! - Core traits (Identifiable, Entity)
//! - Configuration types and API base URL resolution

pub mod error;
pub mod result;
pub mod traits;
pub mod config;

pub use error::*;
pub use result::*;
pub use traits::*;
