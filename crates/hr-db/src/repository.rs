//! Repository traits and errors
//!
//! Provides the CRUD operations shared by every table.

use async_trait::async_trait;
use hr_core::traits::{Entity, Id};
use hr_models::TransitionError;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(#[from] TransitionError),

    #[error("Invalid stored value: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    pub fn not_found<E: Entity>(id: Id) -> Self {
        Self::NotFound(format!("{} with id {} not found", E::TYPE_NAME, id))
    }
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Base repository trait
#[async_trait]
pub trait Repository<T, CreateDto>: Send + Sync {
    /// Find an entity by ID
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<T>>;

    /// Create a new entity
    async fn create(&self, dto: CreateDto) -> RepositoryResult<T>;

    /// Check if an entity exists
    async fn exists(&self, id: Id) -> RepositoryResult<bool>;
}

/// Turn a missing row into `NotFound`
pub fn require<T: Entity>(found: Option<T>, id: Id) -> RepositoryResult<T> {
    found.ok_or_else(|| RepositoryError::not_found::<T>(id))
}
