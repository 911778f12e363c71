//! Performance review repository
//!
//! Database operations for reviews, the per-employee aggregates and the
//! guarded state transition.

use async_trait::async_trait;
use hr_core::traits::Id;
use hr_models::{
    ParseReviewStateError, PerformanceReview, ReviewAggregate, ReviewFilter, ReviewState,
    TransitionError,
};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use crate::repository::{require, Repository, RepositoryError, RepositoryResult};

const SELECT_REVIEW: &str = r#"
    SELECT r.id, r.employee_id, e.name AS employee_name, r.period, r.reviewer,
           r.rating, r.strengths, r.opportunities, r.state
    FROM performance_reviews r
    JOIN employees e ON e.id = r.employee_id
"#;

/// Review database entity, joined with the employee name
#[derive(Debug, Clone, FromRow)]
pub struct ReviewRow {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub period: String,
    pub reviewer: String,
    pub rating: i32,
    pub strengths: String,
    pub opportunities: String,
    pub state: String,
}

impl ReviewRow {
    pub fn into_model(self) -> RepositoryResult<PerformanceReview> {
        Ok(PerformanceReview {
            state: parse_state(&self.state)?,
            id: self.id,
            employee_id: self.employee_id,
            employee_name: self.employee_name,
            period: self.period,
            reviewer: self.reviewer,
            rating: self.rating,
            strengths: self.strengths,
            opportunities: self.opportunities,
        })
    }
}

/// One row of the per-employee aggregate query
#[derive(Debug, Clone, FromRow)]
pub struct ReviewAggregateRow {
    pub employee_id: i64,
    pub employee_name: String,
    pub average_rating: f64,
    pub review_count: i64,
    pub latest_state: String,
}

impl ReviewAggregateRow {
    pub fn into_model(self) -> RepositoryResult<ReviewAggregate> {
        Ok(ReviewAggregate {
            latest_state: parse_state(&self.latest_state)?,
            employee_id: self.employee_id,
            employee_name: self.employee_name,
            average_rating: self.average_rating,
            count: self.review_count,
        })
    }
}

fn parse_state(value: &str) -> RepositoryResult<ReviewState> {
    value
        .parse()
        .map_err(|e: ParseReviewStateError| RepositoryError::InvalidData(e.to_string()))
}

/// DTO for creating a review; text fields are expected trimmed
#[derive(Debug, Clone)]
pub struct CreateReviewDto {
    pub employee_id: Id,
    pub period: String,
    pub reviewer: String,
    pub rating: i32,
    pub strengths: String,
    pub opportunities: String,
}

/// DTO for editing a review; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateReviewDto {
    pub reviewer: Option<String>,
    pub rating: Option<i32>,
    pub strengths: Option<String>,
    pub opportunities: Option<String>,
}

impl UpdateReviewDto {
    pub fn is_empty(&self) -> bool {
        self.reviewer.is_none()
            && self.rating.is_none()
            && self.strengths.is_none()
            && self.opportunities.is_none()
    }
}

/// Append the active filter conditions, aliasing reviews as `r`
fn push_filter<'a>(builder: &mut QueryBuilder<'a, Sqlite>, filter: &'a ReviewFilter) {
    let mut separator = " WHERE ";
    if let Some(employee_id) = filter.employee_id() {
        builder.push(separator).push("r.employee_id = ").push_bind(employee_id);
        separator = " AND ";
    }
    if let Some(period) = filter.period() {
        builder.push(separator).push("r.period = ").push_bind(period);
        separator = " AND ";
    }
    if let Some(state) = filter.state {
        builder.push(separator).push("r.state = ").push_bind(state.as_str());
    }
}

/// Review repository implementation
pub struct ReviewRepository {
    pool: SqlitePool,
}

impl ReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Reviews matching the filter, newest first
    pub async fn list(&self, filter: &ReviewFilter) -> RepositoryResult<Vec<PerformanceReview>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_REVIEW);
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY r.id DESC");

        let rows = builder
            .build_query_as::<ReviewRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ReviewRow::into_model).collect()
    }

    /// Per-employee average rating, count and most recent state over the
    /// reviews matching the filter
    pub async fn aggregates(&self, filter: &ReviewFilter) -> RepositoryResult<Vec<ReviewAggregate>> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT e.id AS employee_id, e.name AS employee_name,
                   CAST(AVG(r.rating) AS REAL) AS average_rating,
                   COUNT(*) AS review_count,
                   (SELECT r2.state FROM performance_reviews r2
                    WHERE r2.employee_id = e.id
                    ORDER BY r2.id DESC LIMIT 1) AS latest_state
            FROM performance_reviews r
            JOIN employees e ON e.id = r.employee_id
            "#,
        );
        push_filter(&mut builder, filter);
        builder.push(" GROUP BY e.id, e.name ORDER BY e.id ASC");

        let rows = builder
            .build_query_as::<ReviewAggregateRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ReviewAggregateRow::into_model).collect()
    }

    /// Edit content fields; the state is never touched here
    pub async fn update(&self, id: Id, dto: UpdateReviewDto) -> RepositoryResult<PerformanceReview> {
        if dto.is_empty() {
            let found = self.find_by_id(id).await?;
            return require(found, id);
        }

        let result = sqlx::query(
            r#"
            UPDATE performance_reviews SET
                reviewer = COALESCE(?, reviewer),
                rating = COALESCE(?, rating),
                strengths = COALESCE(?, strengths),
                opportunities = COALESCE(?, opportunities)
            WHERE id = ?
            "#,
        )
        .bind(&dto.reviewer)
        .bind(dto.rating)
        .bind(&dto.strengths)
        .bind(&dto.opportunities)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found::<PerformanceReview>(id));
        }

        let found = self.find_by_id(id).await?;
        require(found, id)
    }

    /// Move a review to `target`, which must be the successor of its
    /// current state. The write only applies while the state is still the
    /// one that was read, so concurrent advances cannot both succeed.
    pub async fn transition(&self, id: Id, target: ReviewState) -> RepositoryResult<PerformanceReview> {
        let current = require(self.find_by_id(id).await?, id)?;
        current.state.transition_to(target)?;

        let result = sqlx::query("UPDATE performance_reviews SET state = ? WHERE id = ? AND state = ?")
            .bind(target.as_str())
            .bind(id)
            .bind(current.state.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::warn!(review_id = id, from = %current.state, to = %target, "Review changed concurrently");
            return Err(TransitionError::Illegal {
                from: current.state,
                to: target,
            }
            .into());
        }

        tracing::debug!(review_id = id, from = %current.state, to = %target, "Review transitioned");
        require(self.find_by_id(id).await?, id)
    }
}

#[async_trait]
impl Repository<PerformanceReview, CreateReviewDto> for ReviewRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<PerformanceReview>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_REVIEW);
        builder.push(" WHERE r.id = ").push_bind(id);

        let row = builder
            .build_query_as::<ReviewRow>()
            .fetch_optional(&self.pool)
            .await?;

        row.map(ReviewRow::into_model).transpose()
    }

    /// New reviews always start as drafts
    async fn create(&self, dto: CreateReviewDto) -> RepositoryResult<PerformanceReview> {
        let employee_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM employees WHERE id = ?)")
                .bind(dto.employee_id)
                .fetch_one(&self.pool)
                .await?;
        if !employee_exists {
            return Err(RepositoryError::Validation("employee not found".to_string()));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO performance_reviews
                (employee_id, period, reviewer, rating, strengths, opportunities, state)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(dto.employee_id)
        .bind(&dto.period)
        .bind(&dto.reviewer)
        .bind(dto.rating)
        .bind(&dto.strengths)
        .bind(&dto.opportunities)
        .bind(ReviewState::Draft.as_str())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        require(self.find_by_id(id).await?, id)
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM performance_reviews WHERE id = ?)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employees::EmployeeRepository;
    use crate::pool::Database;

    struct Fixture {
        employees: EmployeeRepository,
        reviews: ReviewRepository,
    }

    async fn fixture() -> Fixture {
        let db = Database::in_memory().await.unwrap();
        Fixture {
            employees: EmployeeRepository::new(db.pool().clone()),
            reviews: ReviewRepository::new(db.pool().clone()),
        }
    }

    fn review_for(employee_id: Id, period: &str, rating: i32) -> CreateReviewDto {
        CreateReviewDto {
            employee_id,
            period: period.to_string(),
            reviewer: "Lead".to_string(),
            rating,
            strengths: String::new(),
            opportunities: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_starts_as_draft() {
        let f = fixture().await;
        let ana = f.employees.create("Ana".into()).await.unwrap();

        let review = f.reviews.create(review_for(ana.id, "2024-Q4", 4)).await.unwrap();
        assert_eq!(review.state, ReviewState::Draft);
        assert_eq!(review.employee_name, "Ana");
    }

    #[tokio::test]
    async fn test_create_requires_existing_employee() {
        let f = fixture().await;
        let err = f.reviews.create(review_for(99, "Q1", 3)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Validation(ref m) if m == "employee not found"));
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_newest_first() {
        let f = fixture().await;
        let ana = f.employees.create("Ana".into()).await.unwrap();
        let bob = f.employees.create("Bob".into()).await.unwrap();

        let first = f.reviews.create(review_for(ana.id, "Q1", 3)).await.unwrap();
        let second = f.reviews.create(review_for(ana.id, "Q2", 4)).await.unwrap();
        f.reviews.create(review_for(bob.id, "Q1", 5)).await.unwrap();

        let all = f.reviews.list(&ReviewFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].id > w[1].id));

        let only_ana = ReviewFilter {
            employee_id: Some(ana.id),
            ..Default::default()
        };
        let anas = f.reviews.list(&only_ana).await.unwrap();
        assert_eq!(
            anas.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![second.id, first.id]
        );

        let q1 = ReviewFilter {
            period: Some("Q1".into()),
            ..Default::default()
        };
        assert_eq!(f.reviews.list(&q1).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_aggregates_average_and_latest_state() {
        let f = fixture().await;
        let ana = f.employees.create("Ana".into()).await.unwrap();

        let older = f.reviews.create(review_for(ana.id, "Q1", 4)).await.unwrap();
        f.reviews
            .transition(older.id, ReviewState::Submitted)
            .await
            .unwrap();
        f.reviews.create(review_for(ana.id, "Q2", 5)).await.unwrap();

        let aggregates = f.reviews.aggregates(&ReviewFilter::default()).await.unwrap();
        assert_eq!(aggregates.len(), 1);

        let agg = &aggregates[0];
        assert_eq!(agg.average_rating, 4.5);
        assert_eq!(agg.count, 2);
        assert_eq!(agg.latest_state, ReviewState::Draft);
        assert_eq!(agg.employee_name, "Ana");
    }

    #[tokio::test]
    async fn test_update_keeps_state_and_absent_fields() {
        let f = fixture().await;
        let ana = f.employees.create("Ana".into()).await.unwrap();
        let review = f.reviews.create(review_for(ana.id, "Q1", 2)).await.unwrap();
        f.reviews
            .transition(review.id, ReviewState::Submitted)
            .await
            .unwrap();

        let updated = f
            .reviews
            .update(
                review.id,
                UpdateReviewDto {
                    rating: Some(5),
                    strengths: Some("Mentoring".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.rating, 5);
        assert_eq!(updated.strengths, "Mentoring");
        assert_eq!(updated.reviewer, "Lead");
        assert_eq!(updated.state, ReviewState::Submitted);
    }

    #[tokio::test]
    async fn test_update_missing_review() {
        let f = fixture().await;
        let err = f
            .reviews
            .update(
                7,
                UpdateReviewDto {
                    rating: Some(3),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));

        let err = f.reviews.update(7, UpdateReviewDto::default()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_transitions_follow_the_table() {
        let f = fixture().await;
        let ana = f.employees.create("Ana".into()).await.unwrap();
        let review = f.reviews.create(review_for(ana.id, "Q1", 3)).await.unwrap();

        let err = f
            .reviews
            .transition(review.id, ReviewState::Approved)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidTransition(_)));

        let submitted = f
            .reviews
            .transition(review.id, ReviewState::Submitted)
            .await
            .unwrap();
        assert_eq!(submitted.state, ReviewState::Submitted);

        let approved = f
            .reviews
            .transition(review.id, ReviewState::Approved)
            .await
            .unwrap();
        assert_eq!(approved.state, ReviewState::Approved);

        for target in ReviewState::ALL {
            let err = f.reviews.transition(review.id, target).await.unwrap_err();
            assert!(matches!(
                err,
                RepositoryError::InvalidTransition(TransitionError::Terminal(ReviewState::Approved))
            ));
        }
    }

    #[tokio::test]
    async fn test_transition_missing_review() {
        let f = fixture().await;
        let err = f
            .reviews
            .transition(5, ReviewState::Submitted)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_reviews_removed_with_employee() {
        let f = fixture().await;
        let ana = f.employees.create("Ana".into()).await.unwrap();
        let review = f.reviews.create(review_for(ana.id, "Q1", 3)).await.unwrap();

        f.employees.delete(ana.id).await.unwrap();
        assert!(!f.reviews.exists(review.id).await.unwrap());
    }
}
