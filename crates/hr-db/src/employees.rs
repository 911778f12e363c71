//! Employee repository
//!
//! Database operations for the employee registry.

use async_trait::async_trait;
use hr_core::traits::Id;
use hr_models::Employee;
use sqlx::{FromRow, SqlitePool};

use crate::repository::{Repository, RepositoryError, RepositoryResult};

/// Employee database entity
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub id: i64,
    pub name: String,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee::new(row.id, row.name)
    }
}

/// Employee repository implementation
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All employees, oldest first
    pub async fn list(&self) -> RepositoryResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>("SELECT id, name FROM employees ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    /// Rename an employee; the name is stored trimmed
    pub async fn update(&self, id: Id, name: &str) -> RepositoryResult<Employee> {
        let name = name.trim();
        let result = sqlx::query("UPDATE employees SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found::<Employee>(id));
        }

        Ok(Employee::new(id, name))
    }

    /// Delete an employee together with their reviews and payroll records
    pub async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found::<Employee>(id));
        }

        tracing::debug!(employee_id = id, "Employee deleted");
        Ok(())
    }
}

#[async_trait]
impl Repository<Employee, String> for EmployeeRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>("SELECT id, name FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Employee::from))
    }

    async fn create(&self, name: String) -> RepositoryResult<Employee> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepositoryError::Validation("name is required".to_string()));
        }

        let result = sqlx::query("INSERT INTO employees (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(Employee::new(result.last_insert_rowid(), name))
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM employees WHERE id = ?)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Database;
    use fake::faker::name::en::Name;
    use fake::Fake;

    async fn repo() -> EmployeeRepository {
        let db = Database::in_memory().await.unwrap();
        EmployeeRepository::new(db.pool().clone())
    }

    #[tokio::test]
    async fn test_create_trims_name() {
        let repo = repo().await;
        let created = repo.create("  Ana  ".to_string()).await.unwrap();
        assert_eq!(created.name, "Ana");

        let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Ana");
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let repo = repo().await;
        let err = repo.create("   ".to_string()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Validation(ref m) if m == "name is required"));
    }

    #[tokio::test]
    async fn test_list_orders_by_id() {
        let repo = repo().await;
        let mut names = Vec::new();
        for _ in 0..3 {
            let name: String = Name().fake();
            repo.create(name.clone()).await.unwrap();
            names.push(name);
        }

        let listed: Vec<String> = repo.list().await.unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(listed, names);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = repo().await;
        let created = repo.create("Ana".to_string()).await.unwrap();

        let renamed = repo.update(created.id, " Ana Maria ").await.unwrap();
        assert_eq!(renamed, Employee::new(created.id, "Ana Maria"));

        repo.delete(created.id).await.unwrap();
        assert!(!repo.exists(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let repo = repo().await;
        assert!(matches!(
            repo.update(42, "Ghost").await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(repo.delete(42).await, Err(RepositoryError::NotFound(_))));
        assert!(repo.find_by_id(42).await.unwrap().is_none());
    }
}
