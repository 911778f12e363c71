//! Axum extractors for API handlers
//!
//! Rejections are turned into the same `{error}` bodies the handlers
//! produce, so malformed input never reaches a handler.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use hr_core::traits::Id;
use hr_db::{Database, EmployeeRepository, PayrollRepository, ReviewRepository};
use hr_models::{PayrollFilter, ReviewFilter, ReviewState};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn employees(&self) -> EmployeeRepository {
        EmployeeRepository::new(self.db.pool().clone())
    }

    pub fn reviews(&self) -> ReviewRepository {
        ReviewRepository::new(self.db.pool().clone())
    }

    pub fn payroll(&self) -> PayrollRepository {
        PayrollRepository::new(self.db.pool().clone())
    }
}

/// JSON request body; any decoding failure is `invalid payload`
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!(%rejection, "Rejected request body");
                Err(ApiError::unprocessable("invalid payload"))
            }
        }
    }
}

/// Numeric `:id` path segment; anything else is `invalid id`
pub struct IdPath(pub Id);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::unprocessable("invalid id"))?;

        raw.parse::<Id>()
            .map(IdPath)
            .map_err(|_| ApiError::unprocessable("invalid id"))
    }
}

async fn query_params<S: Send + Sync>(parts: &mut Parts, state: &S) -> HashMap<String, String> {
    Query::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .map(|Query(params)| params)
        .unwrap_or_default()
}

/// Empty or absent values are inactive filters
fn active<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

fn parse_employee_id(params: &HashMap<String, String>) -> Result<Option<Id>, ApiError> {
    active(params, "employeeId")
        .map(|v| v.parse::<Id>())
        .transpose()
        .map_err(|_| ApiError::unprocessable("invalid employeeId"))
}

/// `?employeeId=&period=&state=` of `GET /reviews`
pub struct ReviewQuery(pub ReviewFilter);

#[async_trait]
impl<S> FromRequestParts<S> for ReviewQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = query_params(parts, state).await;

        let employee_id = parse_employee_id(&params)?;
        let state = active(&params, "state")
            .map(|v| v.parse::<ReviewState>())
            .transpose()
            .map_err(|_| ApiError::unprocessable("invalid state"))?;

        Ok(ReviewQuery(ReviewFilter {
            employee_id,
            period: active(&params, "period").map(str::to_string),
            state,
        }))
    }
}

/// `?employeeId=&period=` of `GET /payroll`
pub struct PayrollQuery(pub PayrollFilter);

#[async_trait]
impl<S> FromRequestParts<S> for PayrollQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = query_params(parts, state).await;

        Ok(PayrollQuery(PayrollFilter {
            employee_id: parse_employee_id(&params)?,
            period: active(&params, "period").map(str::to_string),
        }))
    }
}
