//! Database connection pool management
//!
//! Provides SQLite connection pooling using SQLx.

use std::str::FromStr;

use hr_core::config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection pool, creating the file if needed
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to `:memory:` opens its own empty database
        let max_connections = if is_memory_url(&config.url) {
            1
        } else {
            config.max_connections.max(1)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        tracing::info!(
            url = %config.url,
            max_connections,
            "Database pool created"
        );

        Ok(Self { pool })
    }

    /// Fresh in-memory database with the schema applied
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let db = Self::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await?;
        db.init_schema().await?;
        Ok(db)
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check if the database is reachable
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the connection pool
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_url_detection() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url("sqlite://file.db?mode=memory"));
        assert!(!is_memory_url("sqlite:employees.db"));
    }

    #[tokio::test]
    async fn test_in_memory_ping() {
        let db = Database::in_memory().await.unwrap();
        db.ping().await.unwrap();
        db.close().await;
        assert!(db.ping().await.is_err());
    }
}
