//! Payroll API handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use hr_contracts::{Contract, CreatePayrollContract, NewPayrollPayload};
use hr_db::{CreatePayrollDto, Repository};
use hr_models::PayrollListResponse;

use crate::error::ApiResult;
use crate::extractors::{AppState, JsonBody, PayrollQuery};

/// List payroll records with period totals
///
/// GET /payroll?employeeId=&period=
pub async fn list_payroll(
    State(state): State<AppState>,
    PayrollQuery(filter): PayrollQuery,
) -> ApiResult<Json<PayrollListResponse>> {
    let repo = state.payroll();
    let items = repo.list(&filter).await?;
    let aggregates = repo.totals(&filter).await?;

    Ok(Json(PayrollListResponse { items, aggregates }))
}

/// Append a payroll record; net pay is computed here
///
/// POST /payroll
pub async fn create_payroll(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewPayrollPayload>,
) -> ApiResult<impl IntoResponse> {
    CreatePayrollContract.validate(&payload)?;
    let payload = payload.normalized();

    let record = state
        .payroll()
        .create(CreatePayrollDto {
            employee_id: payload.employee_id,
            inputs: payload.inputs(),
            period: payload.period,
        })
        .await?;
    tracing::info!(
        payroll_id = record.id,
        employee_id = record.employee_id,
        net_pay = record.net_pay,
        "Payroll record created"
    );

    Ok((StatusCode::CREATED, Json(record)))
}
