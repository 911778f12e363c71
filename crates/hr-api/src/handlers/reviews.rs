//! Performance review API handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use hr_contracts::{
    Contract, CreateReviewContract, NewReviewPayload, ReviewTransitionContract,
    ReviewUpdatePayload, TransitionPayload, UpdateReviewContract,
};
use hr_db::{CreateReviewDto, Repository, UpdateReviewDto};
use hr_models::{PerformanceReview, ReviewListResponse};

use crate::error::ApiResult;
use crate::extractors::{AppState, IdPath, JsonBody, ReviewQuery};

/// List reviews with per-employee aggregates
///
/// GET /reviews?employeeId=&period=&state=
pub async fn list_reviews(
    State(state): State<AppState>,
    ReviewQuery(filter): ReviewQuery,
) -> ApiResult<Json<ReviewListResponse>> {
    let repo = state.reviews();
    let items = repo.list(&filter).await?;
    let aggregates = repo.aggregates(&filter).await?;

    Ok(Json(ReviewListResponse { items, aggregates }))
}

/// Create a draft review
///
/// POST /reviews
pub async fn create_review(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewReviewPayload>,
) -> ApiResult<impl IntoResponse> {
    CreateReviewContract.validate(&payload)?;
    let payload = payload.normalized();

    let review = state
        .reviews()
        .create(CreateReviewDto {
            employee_id: payload.employee_id,
            period: payload.period,
            reviewer: payload.reviewer,
            rating: payload.rating,
            strengths: payload.strengths,
            opportunities: payload.opportunities,
        })
        .await?;
    tracing::info!(review_id = review.id, employee_id = review.employee_id, "Review created");

    Ok((StatusCode::CREATED, Json(review)))
}

/// Edit reviewer, rating, strengths or opportunities
///
/// PUT /reviews/:id
pub async fn update_review(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<ReviewUpdatePayload>,
) -> ApiResult<Json<PerformanceReview>> {
    UpdateReviewContract.validate(&payload)?;
    let payload = payload.normalized();

    let review = state
        .reviews()
        .update(
            id,
            UpdateReviewDto {
                reviewer: payload.reviewer,
                rating: payload.rating,
                strengths: payload.strengths,
                opportunities: payload.opportunities,
            },
        )
        .await?;

    Ok(Json(review))
}

/// Move a review to its next state
///
/// PUT /reviews/:id/status
pub async fn transition_review(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<TransitionPayload>,
) -> ApiResult<Json<PerformanceReview>> {
    let target = ReviewTransitionContract.target(&payload)?;

    let review = state.reviews().transition(id, target).await?;
    tracing::info!(review_id = id, state = %review.state, "Review transitioned");

    Ok(Json(review))
}
