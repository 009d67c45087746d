//! Post repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::models::Post;

/// Post repository trait
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Create a new post
    async fn create(&self, post: &Post) -> Result<Post>;

    /// Get post by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Post>>;

    /// List a page of posts, newest first
    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<Post>>;

    /// List a page of posts in a category, newest first
    async fn list_by_category_page(
        &self,
        category_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>>;

    /// Count all posts
    async fn count(&self) -> Result<i64>;

    /// Count posts in a category
    async fn count_by_category(&self, category_id: i64) -> Result<i64>;

    /// Update a post
    async fn update(&self, post: &Post) -> Result<Post>;

    /// Delete a post (comments cascade)
    async fn delete(&self, id: i64) -> Result<()>;

    /// Move every post in one category to another.
    ///
    /// Used when a category is deleted, so its posts land in the default one.
    async fn reassign_category(&self, from: i64, to: i64) -> Result<u64>;
}

/// SQLx-based post repository implementation
pub struct SqlxPostRepository {
    pool: SqlitePool,
}

impl SqlxPostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn PostRepository> {
        Arc::new(Self::new(pool))
    }
}

const POST_COLUMNS: &str = "id, title, body, can_comment, created_at, category_id";

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn create(&self, post: &Post) -> Result<Post> {
        let result = sqlx::query(
            r#"
            INSERT INTO posts (title, body, can_comment, created_at, category_id)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.can_comment)
        .bind(post.created_at)
        .bind(post.category_id)
        .execute(&self.pool)
        .await
        .context("Failed to create post")?;

        Ok(Post {
            id: result.last_insert_rowid(),
            ..post.clone()
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let row = sqlx::query(&format!("SELECT {} FROM posts WHERE id = ?", POST_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get post by ID")?;

        Ok(row.map(|row| row_to_post(&row)))
    }

    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<Post>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM posts ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            POST_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list posts")?;

        Ok(rows.iter().map(row_to_post).collect())
    }

    async fn list_by_category_page(
        &self,
        category_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM posts WHERE category_id = ? ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            POST_COLUMNS
        ))
        .bind(category_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list posts by category")?;

        Ok(rows.iter().map(row_to_post).collect())
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM posts")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count posts")?;
        Ok(row.get("count"))
    }

    async fn count_by_category(&self, category_id: i64) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM posts WHERE category_id = ?")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count posts by category")?;
        Ok(row.get("count"))
    }

    async fn update(&self, post: &Post) -> Result<Post> {
        sqlx::query(
            r#"
            UPDATE posts
            SET title = ?, body = ?, can_comment = ?, category_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.can_comment)
        .bind(post.category_id)
        .bind(post.id)
        .execute(&self.pool)
        .await
        .context("Failed to update post")?;

        self.get_by_id(post.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Post not found after update"))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete post")?;
        Ok(())
    }

    async fn reassign_category(&self, from: i64, to: i64) -> Result<u64> {
        let result = sqlx::query("UPDATE posts SET category_id = ? WHERE category_id = ?")
            .bind(to)
            .bind(from)
            .execute(&self.pool)
            .await
            .context("Failed to reassign posts")?;
        Ok(result.rows_affected())
    }
}

fn row_to_post(row: &sqlx::sqlite::SqliteRow) -> Post {
    Post {
        id: row.get("id"),
        title: row.get("title"),
        body: row.get("body"),
        can_comment: row.get("can_comment"),
        created_at: row.get("created_at"),
        category_id: row.get("category_id"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{CategoryRepository, SqlxCategoryRepository};
    use crate::db::{create_test_pool, migrations};
    use crate::models::Category;

    async fn setup() -> (SqlxPostRepository, i64) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let categories = SqlxCategoryRepository::new(pool.clone());
        let category = categories
            .create(&Category::new("Default".to_string()))
            .await
            .expect("Failed to create category");

        (SqlxPostRepository::new(pool), category.id)
    }

    #[tokio::test]
    async fn test_create_and_get_post() {
        let (repo, category_id) = setup().await;
        let post = Post::new("Hello".to_string(), "<p>body</p>".to_string(), category_id);

        let created = repo.create(&post).await.expect("Failed to create post");
        assert!(created.id > 0);

        let found = repo
            .get_by_id(created.id)
            .await
            .expect("Failed to query")
            .expect("Post not found");
        assert_eq!(found.title, "Hello");
        assert!(found.can_comment);
    }

    #[tokio::test]
    async fn test_list_page_newest_first() {
        let (repo, category_id) = setup().await;
        for i in 0..5 {
            repo.create(&Post::new(format!("Post {}", i), "b".to_string(), category_id))
                .await
                .expect("Failed to create post");
        }

        let page = repo.list_page(0, 3).await.expect("Failed to list");
        assert_eq!(page.len(), 3);
        assert_eq!(page[0].title, "Post 4");

        let rest = repo.list_page(3, 3).await.expect("Failed to list");
        assert_eq!(rest.len(), 2);
        assert_eq!(repo.count().await.expect("Failed to count"), 5);
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let (repo, category_id) = setup().await;
        repo.create(&Post::new("In".to_string(), "b".to_string(), category_id))
            .await
            .expect("Failed to create post");

        let page = repo
            .list_by_category_page(category_id, 0, 10)
            .await
            .expect("Failed to list");
        assert_eq!(page.len(), 1);
        assert_eq!(
            repo.count_by_category(category_id).await.expect("Failed to count"),
            1
        );
    }

    #[tokio::test]
    async fn test_update_post() {
        let (repo, category_id) = setup().await;
        let mut created = repo
            .create(&Post::new("Old".to_string(), "b".to_string(), category_id))
            .await
            .expect("Failed to create post");

        created.title = "New".to_string();
        created.can_comment = false;
        let updated = repo.update(&created).await.expect("Failed to update");

        assert_eq!(updated.title, "New");
        assert!(!updated.can_comment);
    }

    #[tokio::test]
    async fn test_delete_post() {
        let (repo, category_id) = setup().await;
        let created = repo
            .create(&Post::new("Gone".to_string(), "b".to_string(), category_id))
            .await
            .expect("Failed to create post");

        repo.delete(created.id).await.expect("Failed to delete");
        let found = repo.get_by_id(created.id).await.expect("Failed to query");
        assert!(found.is_none());
    }
}
