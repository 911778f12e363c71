//! # hr-client
//!
//! Typed client for the HR Suite REST API.
//!
//! [`ApiClient`] speaks HTTP; the [`HrApi`] trait is the seam the module
//! stores are written against. Every failure reaches the caller as a
//! [`ClientError`] carrying one display message.

pub mod error;
pub mod guards;
pub mod http;
pub mod store;

pub use error::{ClientError, ClientResult};
pub use http::{ApiClient, HrApi};
pub use store::{EmployeeStore, PayrollStore, ReviewStore};
