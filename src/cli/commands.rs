//! CLI command implementations
//!
//! `forge` and `init` are plain async functions over a pool so they can be
//! exercised in tests; argument parsing and prompting live in the binary.

use anyhow::{bail, Context, Result};
use rand::seq::IndexedRandom;
use rand::Rng;
use sqlx::SqlitePool;

use crate::cli::fakes;
use crate::db::migrations;
use crate::db::repositories::{
    AdminRepository, CategoryRepository, CommentRepository, PostRepository, SqlxAdminRepository,
    SqlxCategoryRepository, SqlxCommentRepository, SqlxPostRepository,
};
use crate::models::{Admin, Category, Comment, Post, DEFAULT_CATEGORY_NAME};
use crate::services::password::hash_password;

/// Sizes for the generated development dataset.
#[derive(Debug, Clone, Copy)]
pub struct ForgeOptions {
    pub categories: u32,
    pub posts: u32,
    pub comments: u32,
}

impl Default for ForgeOptions {
    fn default() -> Self {
        Self {
            categories: 10,
            posts: 50,
            comments: 500,
        }
    }
}

/// Drop everything and refill the blog with generated content.
///
/// Destructive: the schema is recreated from scratch. The generated
/// administrator logs in as `admin` / `bluelog`.
pub async fn forge(pool: &SqlitePool, options: ForgeOptions) -> Result<()> {
    if options.categories == 0 {
        bail!("At least one category is required");
    }

    tracing::info!("Recreating the database schema...");
    migrations::drop_all(pool).await?;
    migrations::run_migrations(pool).await?;

    let admin_repo = SqlxAdminRepository::new(pool.clone());
    let category_repo = SqlxCategoryRepository::new(pool.clone());
    let post_repo = SqlxPostRepository::new(pool.clone());
    let comment_repo = SqlxCommentRepository::new(pool.clone());
    let mut rng = rand::rng();

    tracing::info!("Generating the administrator...");
    let mut admin = Admin::new("admin".to_string(), hash_password("bluelog")?);
    admin.about = fakes::body(&mut rng, 2);
    admin_repo.create(&admin).await?;

    tracing::info!("Generating {} categories...", options.categories);
    let mut category_ids = Vec::new();
    let default = category_repo
        .create(&Category::new(DEFAULT_CATEGORY_NAME.to_string()))
        .await?;
    category_ids.push(default.id);
    for name in fakes::category_names(&mut rng, options.categories - 1) {
        let category = category_repo.create(&Category::new(name)).await?;
        category_ids.push(category.id);
    }

    tracing::info!("Generating {} posts...", options.posts);
    let mut post_ids = Vec::new();
    for _ in 0..options.posts {
        let category_id = *category_ids
            .choose(&mut rng)
            .context("No categories were generated")?;
        let paragraphs = rng.random_range(2..=5);
        let mut post = Post::new(
            fakes::title(&mut rng),
            fakes::body(&mut rng, paragraphs),
            category_id,
        );
        post.created_at = fakes::past_timestamp(&mut rng);
        let post = post_repo.create(&post).await?;
        post_ids.push(post.id);
    }

    tracing::info!("Generating {} comments...", options.comments);
    let extra = options.comments / 10;
    for reviewed in [true, false] {
        let count = if reviewed { options.comments } else { extra };
        for _ in 0..count {
            let post_id = *post_ids.choose(&mut rng).context("No posts were generated")?;
            let (author, email) = fakes::visitor(&mut rng);
            let mut comment = Comment::new(author, fakes::sentence(&mut rng), post_id);
            comment.email = Some(email);
            comment.reviewed = reviewed;
            comment.created_at = fakes::past_timestamp(&mut rng);
            comment_repo.create(&comment).await?;
        }
    }

    tracing::info!("Generating {} admin comments and {} replies...", extra, extra);
    let mut comment_ids = Vec::new();
    for _ in 0..extra {
        let post_id = *post_ids.choose(&mut rng).context("No posts were generated")?;
        let mut comment =
            Comment::from_admin(admin.name.clone(), fakes::sentence(&mut rng), post_id);
        comment.created_at = fakes::past_timestamp(&mut rng);
        let comment = comment_repo.create(&comment).await?;
        comment_ids.push(comment);
    }
    for _ in 0..extra {
        // Replies stay on the same post as the comment they answer
        let Some(replied) = comment_ids.choose(&mut rng) else {
            break;
        };
        let (author, email) = fakes::visitor(&mut rng);
        let mut comment = Comment::new(author, fakes::sentence(&mut rng), replied.post_id);
        comment.email = Some(email);
        comment.reviewed = true;
        comment.replied_id = Some(replied.id);
        comment_repo.create(&comment).await?;
    }

    tracing::info!("Done.");
    Ok(())
}

/// Initialize the blog: set the administrator account and make sure a
/// default category exists.
///
/// Safe to re-run; an existing administrator gets the new username and
/// password, existing categories are left alone.
pub async fn init(pool: &SqlitePool, username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() {
        bail!("The username must not be empty");
    }
    if password.is_empty() {
        bail!("The password must not be empty");
    }

    migrations::run_migrations(pool).await?;

    let admin = Admin::new(username.trim().to_string(), hash_password(password)?);

    // Admin upsert and default category creation commit together
    let mut tx = pool.begin().await.context("Failed to open transaction")?;

    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM admin ORDER BY id LIMIT 1")
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to look up the administrator")?;
    match existing {
        Some((id,)) => {
            tracing::info!("The administrator already exists, updating...");
            sqlx::query("UPDATE admin SET username = ?, password_hash = ? WHERE id = ?")
                .bind(&admin.username)
                .bind(&admin.password_hash)
                .bind(id)
                .execute(&mut *tx)
                .await
                .context("Failed to update the administrator")?;
        }
        None => {
            tracing::info!("Creating the temporary administrator account...");
            sqlx::query(
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
            .execute(&mut *tx)
            .await
            .context("Failed to create the administrator")?;
        }
    }

    let (categories,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(&mut *tx)
        .await
        .context("Failed to count categories")?;
    if categories == 0 {
        tracing::info!("Creating the default category...");
        sqlx::query("INSERT INTO categories (name) VALUES (?)")
            .bind(DEFAULT_CATEGORY_NAME)
            .execute(&mut *tx)
            .await
            .context("Failed to create the default category")?;
    }

    tx.commit().await.context("Failed to commit")?;

    tracing::info!("Done.");
    Ok(())
}
