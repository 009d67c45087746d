//! Comment repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::models::Comment;

/// Which comments an admin listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentFilter {
    /// Every comment
    All,
    /// Only comments awaiting review
    Unread,
}

/// Comment repository trait
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Create a new comment
    async fn create(&self, comment: &Comment) -> Result<Comment>;

    /// Get comment by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>>;

    /// List a page of reviewed comments for a post, oldest first
    async fn list_for_post(&self, post_id: i64, offset: i64, limit: i64) -> Result<Vec<Comment>>;

    /// Count reviewed comments on a post
    async fn count_for_post(&self, post_id: i64) -> Result<i64>;

    /// List a page of comments for the admin panel, newest first
    async fn list_page(&self, filter: CommentFilter, offset: i64, limit: i64)
        -> Result<Vec<Comment>>;

    /// Count comments matching a filter
    async fn count(&self, filter: CommentFilter) -> Result<i64>;

    /// Count comments awaiting review
    async fn count_unreviewed(&self) -> Result<i64>;

    /// Mark a comment as reviewed
    async fn set_reviewed(&self, id: i64, reviewed: bool) -> Result<()>;

    /// Delete a comment (replies cascade)
    async fn delete(&self, id: i64) -> Result<()>;
}

/// SQLx-based comment repository implementation
pub struct SqlxCommentRepository {
    pool: SqlitePool,
}

impl SqlxCommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn CommentRepository> {
        Arc::new(Self::new(pool))
    }
}

const COMMENT_COLUMNS: &str =
    "id, author, email, site, body, from_admin, reviewed, created_at, post_id, replied_id";

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, comment: &Comment) -> Result<Comment> {
        let result = sqlx::query(
            r#"
            INSERT INTO comments
                (author, email, site, body, from_admin, reviewed, created_at, post_id, replied_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&comment.author)
        .bind(&comment.email)
        .bind(&comment.site)
        .bind(&comment.body)
        .bind(comment.from_admin)
        .bind(comment.reviewed)
        .bind(comment.created_at)
        .bind(comment.post_id)
        .bind(comment.replied_id)
        .execute(&self.pool)
        .await
        .context("Failed to create comment")?;

        Ok(Comment {
            id: result.last_insert_rowid(),
            ..comment.clone()
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM comments WHERE id = ?",
            COMMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get comment by ID")?;

        Ok(row.map(|row| row_to_comment(&row)))
    }

    async fn list_for_post(&self, post_id: i64, offset: i64, limit: i64) -> Result<Vec<Comment>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM comments WHERE post_id = ? AND reviewed = 1 \
             ORDER BY created_at ASC, id ASC LIMIT ? OFFSET ?",
            COMMENT_COLUMNS
        ))
        .bind(post_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list comments for post")?;

        Ok(rows.iter().map(row_to_comment).collect())
    }

    async fn count_for_post(&self, post_id: i64) -> Result<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM comments WHERE post_id = ? AND reviewed = 1",
        )
        .bind(post_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to count comments for post")?;
        Ok(row.get("count"))
    }

    async fn list_page(
        &self,
        filter: CommentFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>> {
        let where_clause = match filter {
            CommentFilter::All => "",
            CommentFilter::Unread => "WHERE reviewed = 0",
        };

        let rows = sqlx::query(&format!(
            "SELECT {} FROM comments {} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            COMMENT_COLUMNS, where_clause
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list comments")?;

        Ok(rows.iter().map(row_to_comment).collect())
    }

    async fn count(&self, filter: CommentFilter) -> Result<i64> {
        let where_clause = match filter {
            CommentFilter::All => "",
            CommentFilter::Unread => "WHERE reviewed = 0",
        };

        let row = sqlx::query(&format!(
            "SELECT COUNT(*) as count FROM comments {}",
            where_clause
        ))
        .fetch_one(&self.pool)
        .await
        .context("Failed to count comments")?;
        Ok(row.get("count"))
    }

    async fn count_unreviewed(&self) -> Result<i64> {
        self.count(CommentFilter::Unread).await
    }

    async fn set_reviewed(&self, id: i64, reviewed: bool) -> Result<()> {
        sqlx::query("UPDATE comments SET reviewed = ? WHERE id = ?")
            .bind(reviewed)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update comment review flag")?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete comment")?;
        Ok(())
    }
}

fn row_to_comment(row: &sqlx::sqlite::SqliteRow) -> Comment {
    Comment {
        id: row.get("id"),
        author: row.get("author"),
        email: row.get("email"),
        site: row.get("site"),
        body: row.get("body"),
        from_admin: row.get("from_admin"),
        reviewed: row.get("reviewed"),
        created_at: row.get("created_at"),
        post_id: row.get("post_id"),
        replied_id: row.get("replied_id"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{
        CategoryRepository, PostRepository, SqlxCategoryRepository, SqlxPostRepository,
    };
    use crate::db::{create_test_pool, migrations};
    use crate::models::{Category, Post};

    async fn setup() -> (SqlxCommentRepository, i64) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let category = SqlxCategoryRepository::new(pool.clone())
            .create(&Category::new("Default".to_string()))
            .await
            .expect("Failed to create category");
        let post = SqlxPostRepository::new(pool.clone())
            .create(&Post::new("Post".to_string(), "b".to_string(), category.id))
            .await
            .expect("Failed to create post");

        (SqlxCommentRepository::new(pool), post.id)
    }

    #[tokio::test]
    async fn test_create_comment() {
        let (repo, post_id) = setup().await;

        let created = repo
            .create(&Comment::new("Visitor".to_string(), "Nice".to_string(), post_id))
            .await
            .expect("Failed to create comment");

        assert!(created.id > 0);
        assert!(!created.reviewed);
    }

    #[tokio::test]
    async fn test_list_for_post_only_reviewed() {
        let (repo, post_id) = setup().await;
        let unreviewed = repo
            .create(&Comment::new("A".to_string(), "pending".to_string(), post_id))
            .await
            .expect("Failed to create comment");
        repo.create(&Comment::from_admin("Admin".to_string(), "reply".to_string(), post_id))
            .await
            .expect("Failed to create comment");

        let visible = repo
            .list_for_post(post_id, 0, 10)
            .await
            .expect("Failed to list");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].author, "Admin");

        repo.set_reviewed(unreviewed.id, true)
            .await
            .expect("Failed to review");
        assert_eq!(
            repo.count_for_post(post_id).await.expect("Failed to count"),
            2
        );
    }

    #[tokio::test]
    async fn test_count_unreviewed() {
        let (repo, post_id) = setup().await;
        for i in 0..3 {
            repo.create(&Comment::new(format!("V{}", i), "hi".to_string(), post_id))
                .await
                .expect("Failed to create comment");
        }
        repo.create(&Comment::from_admin("Admin".to_string(), "hi".to_string(), post_id))
            .await
            .expect("Failed to create comment");

        assert_eq!(repo.count_unreviewed().await.expect("Failed to count"), 3);
        assert_eq!(
            repo.count(CommentFilter::All).await.expect("Failed to count"),
            4
        );
    }

    #[tokio::test]
    async fn test_unread_filter_listing() {
        let (repo, post_id) = setup().await;
        repo.create(&Comment::new("V".to_string(), "pending".to_string(), post_id))
            .await
            .expect("Failed to create comment");
        repo.create(&Comment::from_admin("Admin".to_string(), "ok".to_string(), post_id))
            .await
            .expect("Failed to create comment");

        let unread = repo
            .list_page(CommentFilter::Unread, 0, 10)
            .await
            .expect("Failed to list");
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].author, "V");

        let all = repo
            .list_page(CommentFilter::All, 0, 10)
            .await
            .expect("Failed to list");
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_comment() {
        let (repo, post_id) = setup().await;
        let created = repo
            .create(&Comment::new("V".to_string(), "bye".to_string(), post_id))
            .await
            .expect("Failed to create comment");

        repo.delete(created.id).await.expect("Failed to delete");
        let found = repo.get_by_id(created.id).await.expect("Failed to query");
        assert!(found.is_none());
    }
}
