//! Module list stores
//!
//! A store owns the last list fetched for one module together with the
//! active filter. Nothing is shared between stores; callers hold them and
//! call `refresh` explicitly.
//!
//! Employee writes patch the cached list in place. Review and payroll writes
//! change server-side aggregates, so they are followed by a full refresh.

use hr_contracts::{NewPayrollPayload, NewReviewPayload, ReviewUpdatePayload};
use hr_core::traits::{Id, Identifiable};
use hr_models::{
    Employee, PayrollAggregates, PayrollFilter, PayrollRecord, PerformanceReview,
    ReviewAggregate, ReviewFilter,
};

use crate::error::{ClientError, ClientResult};
use crate::guards;
use crate::http::HrApi;

fn replace_by_id<T: Identifiable>(items: &mut [T], item: T) {
    if let Some(slot) = items.iter_mut().find(|existing| existing.id() == item.id()) {
        *slot = item;
    }
}

/// Cached employee list
#[derive(Debug)]
pub struct EmployeeStore<A> {
    api: A,
    items: Vec<Employee>,
}

impl<A: HrApi> EmployeeStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[Employee] {
        &self.items
    }

    pub async fn refresh(&mut self) -> ClientResult<&[Employee]> {
        self.items = self.api.list_employees().await?;
        Ok(&self.items)
    }

    /// Create and append to the cache
    pub async fn create(&mut self, name: &str) -> ClientResult<Employee> {
        guards::check_employee_name(name)?;
        let created = self.api.create_employee(name.trim()).await?;
        self.items.push(created.clone());
        Ok(created)
    }

    /// Rename and replace the cached row
    pub async fn rename(&mut self, id: Id, name: &str) -> ClientResult<Employee> {
        guards::check_employee_name(name)?;
        let updated = self.api.update_employee(id, name.trim()).await?;
        replace_by_id(&mut self.items, updated.clone());
        Ok(updated)
    }

    pub async fn remove(&mut self, id: Id) -> ClientResult<()> {
        self.api.delete_employee(id).await?;
        self.items.retain(|e| e.id != id);
        Ok(())
    }
}

/// Cached review list with per-employee aggregates
#[derive(Debug)]
pub struct ReviewStore<A> {
    api: A,
    filter: ReviewFilter,
    items: Vec<PerformanceReview>,
    aggregates: Vec<ReviewAggregate>,
}

impl<A: HrApi> ReviewStore<A> {
    pub fn new(api: A) -> Self {
        Self::with_filter(api, ReviewFilter::default())
    }

    pub fn with_filter(api: A, filter: ReviewFilter) -> Self {
        Self {
            api,
            filter,
            items: Vec::new(),
            aggregates: Vec::new(),
        }
    }

    pub fn filter(&self) -> &ReviewFilter {
        &self.filter
    }

    /// Replace the filter; takes effect on the next refresh
    pub fn set_filter(&mut self, filter: ReviewFilter) {
        self.filter = filter;
    }

    pub fn items(&self) -> &[PerformanceReview] {
        &self.items
    }

    pub fn aggregates(&self) -> &[ReviewAggregate] {
        &self.aggregates
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        let response = self.api.list_reviews(&self.filter).await?;
        self.items = response.items;
        self.aggregates = response.aggregates;
        Ok(())
    }

    pub async fn create(&mut self, payload: &NewReviewPayload) -> ClientResult<PerformanceReview> {
        guards::check_new_review(payload)?;
        let created = self.api.create_review(&payload.normalized()).await?;
        self.refresh().await?;
        Ok(created)
    }

    pub async fn edit(
        &mut self,
        id: Id,
        payload: &ReviewUpdatePayload,
    ) -> ClientResult<PerformanceReview> {
        guards::check_review_update(payload)?;
        let updated = self.api.update_review(id, &payload.normalized()).await?;
        self.refresh().await?;
        Ok(updated)
    }

    /// Move a review to its successor state
    ///
    /// The target is always derived from the review's current state.
    pub async fn advance(&mut self, id: Id) -> ClientResult<PerformanceReview> {
        if !self.items.iter().any(|r| r.id == id) {
            self.refresh().await?;
        }
        let review = self
            .items
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ClientError::validation("review not found"))?;
        let next = review
            .next_state()
            .ok_or_else(|| ClientError::validation("review already approved"))?;

        tracing::debug!(review_id = id, from = %review.state, to = %next, "Advancing review");
        let advanced = self.api.transition_review(id, next).await?;
        self.refresh().await?;
        Ok(advanced)
    }
}

/// Cached payroll list with period totals
#[derive(Debug)]
pub struct PayrollStore<A> {
    api: A,
    filter: PayrollFilter,
    items: Vec<PayrollRecord>,
    aggregates: PayrollAggregates,
}

impl<A: HrApi> PayrollStore<A> {
    pub fn new(api: A) -> Self {
        Self::with_filter(api, PayrollFilter::default())
    }

    pub fn with_filter(api: A, filter: PayrollFilter) -> Self {
        Self {
            api,
            filter,
            items: Vec::new(),
            aggregates: PayrollAggregates::default(),
        }
    }

    pub fn filter(&self) -> &PayrollFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: PayrollFilter) {
        self.filter = filter;
    }

    pub fn items(&self) -> &[PayrollRecord] {
        &self.items
    }

    pub fn aggregates(&self) -> &PayrollAggregates {
        &self.aggregates
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        let response = self.api.list_payroll(&self.filter).await?;
        self.items = response.items;
        self.aggregates = response.aggregates;
        Ok(())
    }

    pub async fn create(&mut self, payload: &NewPayrollPayload) -> ClientResult<PayrollRecord> {
        guards::check_new_payroll(payload)?;
        let created = self.api.create_payroll(&payload.normalized()).await?;
        self.refresh().await?;
        Ok(created)
    }
}
