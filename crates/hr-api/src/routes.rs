//! API routes
//!
//! Methods not listed for a known path answer 405.

use axum::{
    routing::{get, put},
    Router,
};

use crate::extractors::AppState;
use crate::handlers::{employees, payroll, reviews};

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(employees_router())
        .merge(reviews_router())
        .merge(payroll_router())
}

/// Router with state attached, ready to serve
pub fn app(state: AppState) -> Router {
    router().with_state(state)
}

fn employees_router() -> Router<AppState> {
    Router::new()
        .route(
            "/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/employees/:id",
            put(employees::update_employee).delete(employees::delete_employee),
        )
}

fn reviews_router() -> Router<AppState> {
    Router::new()
        .route(
            "/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route("/reviews/:id", put(reviews::update_review))
        .route("/reviews/:id/status", put(reviews::transition_review))
}

fn payroll_router() -> Router<AppState> {
    Router::new().route(
        "/payroll",
        get(payroll::list_payroll).post(payroll::create_payroll),
    )
}
