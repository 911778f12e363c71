//! Employee API handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use hr_contracts::{Contract, EmployeeContract, EmployeePayload};
use hr_db::Repository;
use hr_models::Employee;

use crate::error::ApiResult;
use crate::extractors::{AppState, IdPath, JsonBody};

/// List all employees
///
/// GET /employees
pub async fn list_employees(State(state): State<AppState>) -> ApiResult<Json<Vec<Employee>>> {
    let employees = state.employees().list().await?;
    Ok(Json(employees))
}

/// Register an employee
///
/// POST /employees
pub async fn create_employee(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<EmployeePayload>,
) -> ApiResult<impl IntoResponse> {
    EmployeeContract.validate(&payload)?;

    let employee = state.employees().create(payload.normalized().name).await?;
    tracing::info!(employee_id = employee.id, "Employee created");

    Ok((StatusCode::CREATED, Json(employee)))
}

/// Rename an employee
///
/// PUT /employees/:id
pub async fn update_employee(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<EmployeePayload>,
) -> ApiResult<Json<Employee>> {
    EmployeeContract.validate(&payload)?;

    let employee = state.employees().update(id, &payload.normalized().name).await?;
    Ok(Json(employee))
}

/// Delete an employee and everything recorded for them
///
/// DELETE /employees/:id
pub async fn delete_employee(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    state.employees().delete(id).await?;
    tracing::info!(employee_id = id, "Employee deleted");
    Ok(StatusCode::NO_CONTENT)
}
