//! Session repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::models::Session;

/// Session repository trait
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a new session
    async fn create(&self, session: &Session) -> Result<()>;

    /// Look up a session by token
    async fn get(&self, token: &str) -> Result<Option<Session>>;

    /// Delete a session (logout)
    async fn delete(&self, token: &str) -> Result<()>;

    /// Remove expired sessions, returning how many were deleted
    async fn delete_expired(&self) -> Result<u64>;
}

/// SQLx-based session repository implementation
pub struct SqlxSessionRepository {
    pool: SqlitePool,
}

impl SqlxSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn SessionRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl SessionRepository for SqlxSessionRepository {
    async fn create(&self, session: &Session) -> Result<()> {
        sqlx::query("INSERT INTO sessions (token, admin_id, expires_at) VALUES (?, ?, ?)")
            .bind(&session.token)
            .bind(session.admin_id)
            .bind(session.expires_at)
            .execute(&self.pool)
            .await
            .context("Failed to create session")?;
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Session>> {
        let row = sqlx::query("SELECT token, admin_id, expires_at FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get session")?;

        Ok(row.map(|row| Session {
            token: row.get("token"),
            admin_id: row.get("admin_id"),
            expires_at: row.get("expires_at"),
        }))
    }

    async fn delete(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .context("Failed to delete session")?;
        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(chrono::Utc::now())
            .execute(&self.pool)
            .await
            .context("Failed to delete expired sessions")?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{AdminRepository, SqlxAdminRepository};
    use crate::db::{create_test_pool, migrations};
    use crate::models::Admin;
    use chrono::{Duration, Utc};

    async fn setup() -> (SqlxSessionRepository, i64) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let admin = SqlxAdminRepository::new(pool.clone())
            .create(&Admin::new("boss".to_string(), "h".to_string()))
            .await
            .expect("Failed to create admin");

        (SqlxSessionRepository::new(pool), admin.id)
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let (repo, admin_id) = setup().await;
        let session = Session {
            token: "token-1".to_string(),
            admin_id,
            expires_at: Utc::now() + Duration::days(7),
        };

        repo.create(&session).await.expect("Failed to create session");

        let found = repo
            .get("token-1")
            .await
            .expect("Failed to query")
            .expect("Session not found");
        assert_eq!(found.admin_id, admin_id);
        assert!(found.is_valid());
    }

    #[tokio::test]
    async fn test_delete_session() {
        let (repo, admin_id) = setup().await;
        let session = Session {
            token: "token-2".to_string(),
            admin_id,
            expires_at: Utc::now() + Duration::days(7),
        };
        repo.create(&session).await.expect("Failed to create session");

        repo.delete("token-2").await.expect("Failed to delete");
        let found = repo.get("token-2").await.expect("Failed to query");
        assert!(found.is_none());
    }
}
