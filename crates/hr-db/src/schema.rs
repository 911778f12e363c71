//! Schema bootstrap
//!
//! Idempotent `CREATE ... IF NOT EXISTS` statements, applied at startup.
//! Reviews and payroll records are removed together with their employee.

use crate::pool::Database;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS performance_reviews (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL,
        period TEXT NOT NULL,
        reviewer TEXT NOT NULL,
        rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
        strengths TEXT NOT NULL DEFAULT '',
        opportunities TEXT NOT NULL DEFAULT '',
        state TEXT NOT NULL DEFAULT 'draft',
        FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_reviews_employee_period ON performance_reviews(employee_id, period)",
    r#"
    CREATE TABLE IF NOT EXISTS payroll_records (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL,
        period TEXT NOT NULL,
        base_salary REAL NOT NULL,
        overtime_hours REAL NOT NULL DEFAULT 0,
        overtime_rate REAL NOT NULL DEFAULT 0,
        bonuses REAL NOT NULL DEFAULT 0,
        deductions REAL NOT NULL DEFAULT 0,
        net_pay REAL NOT NULL,
        FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_payroll_employee_period ON payroll_records(employee_id, period)",
];

impl Database {
    /// Create the tables and indexes if they do not exist yet
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        for statement in STATEMENTS {
            sqlx::query(statement).execute(self.pool()).await?;
        }
        tracing::debug!(statements = STATEMENTS.len(), "Schema applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        db.init_schema().await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();

        assert_eq!(tables, vec!["employees", "payroll_records", "performance_reviews"]);
    }

    #[tokio::test]
    async fn test_rating_check_constraint() {
        let db = Database::in_memory().await.unwrap();
        sqlx::query("INSERT INTO employees (name) VALUES ('Ana')")
            .execute(db.pool())
            .await
            .unwrap();

        let result = sqlx::query(
            "INSERT INTO performance_reviews (employee_id, period, reviewer, rating) VALUES (1, 'Q1', 'Boss', 9)",
        )
        .execute(db.pool())
        .await;

        assert!(result.is_err());
    }
}
