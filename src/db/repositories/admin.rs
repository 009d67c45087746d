//! Admin repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::models::Admin;

/// Admin repository trait
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Get the first admin row, which is "the" administrator.
    async fn first(&self) -> Result<Option<Admin>>;

    /// Get an admin by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Admin>>;

    /// Count admin rows
    async fn count(&self) -> Result<i64>;

    /// Create a new admin
    async fn create(&self, admin: &Admin) -> Result<Admin>;

    /// Update an existing admin
    async fn update(&self, admin: &Admin) -> Result<Admin>;
}

/// SQLx-based admin repository implementation
pub struct SqlxAdminRepository {
    pool: SqlitePool,
}

impl SqlxAdminRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn AdminRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl AdminRepository for SqlxAdminRepository {
    async fn first(&self) -> Result<Option<Admin>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, blog_title, blog_sub_title, name, about
            FROM admin
            ORDER BY id
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get first admin")?;

        Ok(row.map(|row| row_to_admin(&row)))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Admin>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, blog_title, blog_sub_title, name, about
            FROM admin
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get admin by ID")?;

        Ok(row.map(|row| row_to_admin(&row)))
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM admin")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count admins")?;
        Ok(row.get("count"))
    }

    async fn create(&self, admin: &Admin) -> Result<Admin> {
        let result = sqlx::query(
            r#"
            INSERT INTO admin (username, password_hash, blog_title, blog_sub_title, name, about)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&admin.username)
        .bind(&admin.password_hash)
        .bind(&admin.blog_title)
        .bind(&admin.blog_sub_title)
        .bind(&admin.name)
        .bind(&admin.about)
        .execute(&self.pool)
        .await
        .context("Failed to create admin")?;

        Ok(Admin {
            id: result.last_insert_rowid(),
            ..admin.clone()
        })
    }

    async fn update(&self, admin: &Admin) -> Result<Admin> {
        sqlx::query(
            r#"
            UPDATE admin
            SET username = ?, password_hash = ?, blog_title = ?, blog_sub_title = ?,
                name = ?, about = ?
            WHERE id = ?
            "#,
        )
        .bind(&admin.username)
        .bind(&admin.password_hash)
        .bind(&admin.blog_title)
        .bind(&admin.blog_sub_title)
        .bind(&admin.name)
        .bind(&admin.about)
        .bind(admin.id)
        .execute(&self.pool)
        .await
        .context("Failed to update admin")?;

        self.get_by_id(admin.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Admin not found after update"))
    }
}

fn row_to_admin(row: &sqlx::sqlite::SqliteRow) -> Admin {
    Admin {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        blog_title: row.get("blog_title"),
        blog_sub_title: row.get("blog_sub_title"),
        name: row.get("name"),
        about: row.get("about"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup_test_repo() -> SqlxAdminRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxAdminRepository::new(pool)
    }

    #[tokio::test]
    async fn test_first_on_empty_store() {
        let repo = setup_test_repo().await;

        let admin = repo.first().await.expect("Failed to query admin");
        assert!(admin.is_none());
        assert_eq!(repo.count().await.expect("Failed to count"), 0);
    }

    #[tokio::test]
    async fn test_create_and_first() {
        let repo = setup_test_repo().await;
        let admin = Admin::new("boss".to_string(), "hash".to_string());

        let created = repo.create(&admin).await.expect("Failed to create admin");
        assert!(created.id > 0);

        let first = repo
            .first()
            .await
            .expect("Failed to query admin")
            .expect("Admin not found");
        assert_eq!(first.username, "boss");
        assert_eq!(first.blog_title, "Bluelog");
    }

    #[tokio::test]
    async fn test_first_returns_lowest_id() {
        let repo = setup_test_repo().await;
        repo.create(&Admin::new("one".to_string(), "h".to_string()))
            .await
            .expect("Failed to create admin");
        repo.create(&Admin::new("two".to_string(), "h".to_string()))
            .await
            .expect("Failed to create admin");

        let first = repo
            .first()
            .await
            .expect("Failed to query admin")
            .expect("Admin not found");
        assert_eq!(first.username, "one");
    }

    #[tokio::test]
    async fn test_update_admin() {
        let repo = setup_test_repo().await;
        let mut created = repo
            .create(&Admin::new("boss".to_string(), "hash".to_string()))
            .await
            .expect("Failed to create admin");

        created.username = "renamed".to_string();
        created.blog_title = "A New Title".to_string();
        let updated = repo.update(&created).await.expect("Failed to update admin");

        assert_eq!(updated.username, "renamed");
        assert_eq!(updated.blog_title, "A New Title");
        assert_eq!(repo.count().await.expect("Failed to count"), 1);
    }
}
