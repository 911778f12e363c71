//! HTTP client for the HR Suite REST API
//!
//! Response handling is the same for every endpoint: the body is read once
//! as text, an empty body means "no content", and a non-2xx status becomes
//! [`ClientError::Api`] whose message is the body's `error` field, else the
//! status reason phrase, else [`FALLBACK_MESSAGE`].

use std::time::Duration;

use async_trait::async_trait;
use hr_contracts::{
    EmployeePayload, NewPayrollPayload, NewReviewPayload, ReviewUpdatePayload, TransitionPayload,
};
use hr_core::config::{resolve_api_base, ClientConfig};
use hr_core::traits::Id;
use hr_models::{
    Employee, PayrollFilter, PayrollListResponse, PayrollRecord, PerformanceReview,
    ReviewFilter, ReviewListResponse, ReviewState,
};
use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::{form_urlencoded, Url};

use crate::error::{ClientError, ClientResult, FALLBACK_MESSAGE};

/// Operations of the REST surface
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HrApi: Send + Sync {
    async fn list_employees(&self) -> ClientResult<Vec<Employee>>;
    async fn create_employee(&self, name: &str) -> ClientResult<Employee>;
    async fn update_employee(&self, id: Id, name: &str) -> ClientResult<Employee>;
    async fn delete_employee(&self, id: Id) -> ClientResult<()>;

    async fn list_reviews(&self, filter: &ReviewFilter) -> ClientResult<ReviewListResponse>;
    async fn create_review(&self, payload: &NewReviewPayload) -> ClientResult<PerformanceReview>;
    async fn update_review(
        &self,
        id: Id,
        payload: &ReviewUpdatePayload,
    ) -> ClientResult<PerformanceReview>;
    async fn transition_review(&self, id: Id, state: ReviewState) -> ClientResult<PerformanceReview>;

    async fn list_payroll(&self, filter: &PayrollFilter) -> ClientResult<PayrollListResponse>;
    async fn create_payroll(&self, payload: &NewPayrollPayload) -> ClientResult<PayrollRecord>;
}

/// Network client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration, resolving the base URL from the
    /// configured value, the environment, the build-time value or the default
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = resolve_api_base(config.api_url.as_deref());
        Self::with_base_url(&base_url, Duration::from_secs(config.timeout_seconds))
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        Url::parse(base_url)?;

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`; no `?` is added when there are no pairs
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())))
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<Option<T>> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "API unreachable");
            ClientError::Network(e)
        })?;
        handle_response(response).await
    }

    /// GET bypassing any cache
    async fn read<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ClientResult<T> {
        let url = self.endpoint(path, query);
        tracing::debug!(method = "GET", %url, "API request");

        let request = self
            .client
            .get(&url)
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::PRAGMA, "no-cache");
        required(self.send(request).await?)
    }

    async fn write<T, B>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path, &[]);
        tracing::debug!(%method, %url, "API request");

        let request = self.client.request(method, &url).json(body);
        required(self.send(request).await?)
    }
}

/// Unwrap a response body
async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> ClientResult<Option<T>> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let message = error_message(status, &text);
        tracing::warn!(status = status.as_u16(), %message, "API request failed");
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    if text.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|e| e.as_str())
                .filter(|m| !m.is_empty())
                .map(str::to_string)
        })
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}

fn required<T>(body: Option<T>) -> ClientResult<T> {
    body.ok_or_else(|| ClientError::InvalidResponse("empty response body".to_string()))
}

#[async_trait]
impl HrApi for ApiClient {
    async fn list_employees(&self) -> ClientResult<Vec<Employee>> {
        self.read("/employees", &[]).await
    }

    async fn create_employee(&self, name: &str) -> ClientResult<Employee> {
        let body = EmployeePayload::new(name).normalized();
        self.write(Method::POST, "/employees", &body).await
    }

    async fn update_employee(&self, id: Id, name: &str) -> ClientResult<Employee> {
        let body = EmployeePayload::new(name).normalized();
        self.write(Method::PUT, &format!("/employees/{}", id), &body)
            .await
    }

    async fn delete_employee(&self, id: Id) -> ClientResult<()> {
        let url = self.endpoint(&format!("/employees/{}", id), &[]);
        tracing::debug!(method = "DELETE", %url, "API request");

        self.send::<serde_json::Value>(self.client.delete(&url))
            .await?;
        Ok(())
    }

    async fn list_reviews(&self, filter: &ReviewFilter) -> ClientResult<ReviewListResponse> {
        self.read("/reviews", &filter.query_pairs()).await
    }

    async fn create_review(&self, payload: &NewReviewPayload) -> ClientResult<PerformanceReview> {
        self.write(Method::POST, "/reviews", &payload.normalized())
            .await
    }

    async fn update_review(
        &self,
        id: Id,
        payload: &ReviewUpdatePayload,
    ) -> ClientResult<PerformanceReview> {
        self.write(Method::PUT, &format!("/reviews/{}", id), &payload.normalized())
            .await
    }

    async fn transition_review(&self, id: Id, state: ReviewState) -> ClientResult<PerformanceReview> {
        let body = TransitionPayload::new(state);
        self.write(Method::PUT, &format!("/reviews/{}/status", id), &body)
            .await
    }

    async fn list_payroll(&self, filter: &PayrollFilter) -> ClientResult<PayrollListResponse> {
        self.read("/payroll", &filter.query_pairs()).await
    }

    async fn create_payroll(&self, payload: &NewPayrollPayload) -> ClientResult<PayrollRecord> {
        self.write(Method::POST, "/payroll", &payload.normalized())
            .await
    }
}
