//! Core traits shared by the domain models

/// Primary key type (SQLite INTEGER PRIMARY KEY)
pub type Id = i64;

/// Trait for entities that have a server-assigned primary key
pub trait Identifiable {
    fn id(&self) -> Id;
}

/// Base trait for all persisted domain entities
pub trait Entity: Identifiable + Send + Sync {
    /// Human-readable type name for logs and error messages
    const TYPE_NAME: &'static str;
}
