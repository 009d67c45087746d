//! Category repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::models::Category;

/// Category repository trait
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Create a new category
    async fn create(&self, category: &Category) -> Result<Category>;

    /// Get category by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Category>>;

    /// Get category by name
    async fn get_by_name(&self, name: &str) -> Result<Option<Category>>;

    /// List all categories ordered by name
    async fn list_ordered(&self) -> Result<Vec<Category>>;

    /// Count categories
    async fn count(&self) -> Result<i64>;

    /// Update a category
    async fn update(&self, category: &Category) -> Result<Category>;

    /// Delete a category
    async fn delete(&self, id: i64) -> Result<()>;
}

/// SQLx-based category repository implementation
pub struct SqlxCategoryRepository {
    pool: SqlitePool,
}

impl SqlxCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn CategoryRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CategoryRepository for SqlxCategoryRepository {
    async fn create(&self, category: &Category) -> Result<Category> {
        let result = sqlx::query("INSERT INTO categories (name) VALUES (?)")
            .bind(&category.name)
            .execute(&self.pool)
            .await
            .context("Failed to create category")?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: category.name.clone(),
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get category by ID")?;

        Ok(row.map(|row| row_to_category(&row)))
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name FROM categories WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get category by name")?;

        Ok(row.map(|row| row_to_category(&row)))
    }

    async fn list_ordered(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list categories")?;

        Ok(rows.iter().map(row_to_category).collect())
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM categories")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count categories")?;
        Ok(row.get("count"))
    }

    async fn update(&self, category: &Category) -> Result<Category> {
        sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
            .bind(&category.name)
            .bind(category.id)
            .execute(&self.pool)
            .await
            .context("Failed to update category")?;

        self.get_by_id(category.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Category not found after update"))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete category")?;
        Ok(())
    }
}

fn row_to_category(row: &sqlx::sqlite::SqliteRow) -> Category {
    Category {
        id: row.get("id"),
        name: row.get("name"),
    }
}
