//! # hr-api
//!
//! REST API handlers for HR Suite.
//!
//! JSON in, JSON out. Errors are always `{"error": "<message>"}` with the
//! status codes the client relies on (201 on create, 204 on delete, 404 for
//! unknown ids, 422 for rejected input, 500 for storage failures).

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ApiResult, ErrorBody};
pub use extractors::AppState;
pub use routes::{app, router};
