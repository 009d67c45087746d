//! Database migrations
//!
//! Migrations are embedded in the binary as SQL strings and tracked in the
//! `_migrations` table. `run_migrations` is idempotent and only applies
//! pending versions; `drop_all` removes every schema object and is used by
//! the destructive `forge` command before reseeding.

use anyhow::{Context, Result};
use sqlx::SqlitePool;

/// A database migration
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version number (unique and sequential)
    pub version: i32,
    /// Human-readable migration name
    pub name: &'static str,
    /// SQL statements, separated by semicolons
    pub up: &'static str,
}

/// All migrations, in order.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_admin",
        up: r#"
            CREATE TABLE IF NOT EXISTS admin (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username VARCHAR(20) NOT NULL,
                password_hash VARCHAR(255) NOT NULL,
                blog_title VARCHAR(60) NOT NULL,
                blog_sub_title VARCHAR(100) NOT NULL,
                name VARCHAR(30) NOT NULL,
                about TEXT NOT NULL
            );
        "#,
    },
    Migration {
        version: 2,
        name: "create_categories",
        up: r#"
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(30) NOT NULL UNIQUE
            );
            CREATE INDEX IF NOT EXISTS idx_categories_name ON categories(name);
        "#,
    },
    Migration {
        version: 3,
        name: "create_posts",
        up: r#"
            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title VARCHAR(60) NOT NULL,
                body TEXT NOT NULL,
                can_comment BOOLEAN NOT NULL DEFAULT 1,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                category_id INTEGER NOT NULL REFERENCES categories(id)
            );
            CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts(created_at);
            CREATE INDEX IF NOT EXISTS idx_posts_category_id ON posts(category_id);
        "#,
    },
    Migration {
        version: 4,
        name: "create_comments",
        up: r#"
            CREATE TABLE IF NOT EXISTS comments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                author VARCHAR(30) NOT NULL,
                email VARCHAR(254),
                site VARCHAR(255),
                body TEXT NOT NULL,
                from_admin BOOLEAN NOT NULL DEFAULT 0,
                reviewed BOOLEAN NOT NULL DEFAULT 0,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
                replied_id INTEGER REFERENCES comments(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_comments_post_id ON comments(post_id);
            CREATE INDEX IF NOT EXISTS idx_comments_reviewed ON comments(reviewed);
        "#,
    },
    Migration {
        version: 5,
        name: "create_sessions",
        up: r#"
            CREATE TABLE IF NOT EXISTS sessions (
                token VARCHAR(36) PRIMARY KEY,
                admin_id INTEGER NOT NULL REFERENCES admin(id) ON DELETE CASCADE,
                expires_at TIMESTAMP NOT NULL
            );
        "#,
    },
];

/// Run all pending migrations. Returns the number applied.
pub async fn run_migrations(pool: &SqlitePool) -> Result<usize> {
    create_migrations_table(pool).await?;

    let applied = applied_versions(pool).await?;
    let mut count = 0;

    for migration in MIGRATIONS {
        if !applied.contains(&migration.version) {
            tracing::info!("Applying migration {}: {}", migration.version, migration.name);
            apply_migration(pool, migration)
                .await
                .with_context(|| format!("Failed to apply migration: {}", migration.name))?;
            count += 1;
        }
    }

    if count > 0 {
        tracing::info!("Applied {} migration(s)", count);
    } else {
        tracing::debug!("No pending migrations");
    }

    Ok(count)
}

/// Drop every schema object, including the migration tracking table.
///
/// Used by `forge` before reseeding. Irreversible.
pub async fn drop_all(pool: &SqlitePool) -> Result<()> {
    // Reverse dependency order so foreign keys don't get in the way
    for table in ["sessions", "comments", "posts", "categories", "admin", "_migrations"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await
            .with_context(|| format!("Failed to drop table: {}", table))?;
    }
    Ok(())
}

async fn create_migrations_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create migrations table")?;
    Ok(())
}

async fn applied_versions(pool: &SqlitePool) -> Result<Vec<i32>> {
    let rows: Vec<(i32,)> = sqlx::query_as("SELECT version FROM _migrations ORDER BY version")
        .fetch_all(pool)
        .await
        .context("Failed to read applied migrations")?;
    Ok(rows.into_iter().map(|(v,)| v).collect())
}

async fn apply_migration(pool: &SqlitePool, migration: &Migration) -> Result<()> {
    // Migration SQL may contain multiple statements
    for statement in migration.up.split(';') {
        let statement = statement.trim();
        if !statement.is_empty() {
            sqlx::query(statement)
                .execute(pool)
                .await
                .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
        }
    }

    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(pool)
        .await?;

    Ok(())
}

fn truncate_sql(sql: &str) -> String {
    if sql.len() > 100 {
        format!("{}...", &sql[..100])
    } else {
        sql.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    #[tokio::test]
    async fn test_run_migrations_applies_all() {
        let pool = create_test_pool().await.expect("Failed to create pool");

        let count = run_migrations(&pool).await.expect("Failed to run migrations");
        assert_eq!(count, MIGRATIONS.len());
    }

    #[tokio::test]
    async fn test_run_migrations_is_idempotent() {
        let pool = create_test_pool().await.expect("Failed to create pool");

        run_migrations(&pool).await.expect("First run failed");
        let second = run_migrations(&pool).await.expect("Second run failed");

        assert_eq!(second, 0);
    }

    #[tokio::test]
    async fn test_drop_all_removes_tables() {
        let pool = create_test_pool().await.expect("Failed to create pool");
        run_migrations(&pool).await.expect("Failed to run migrations");

        drop_all(&pool).await.expect("Failed to drop tables");

        let result = sqlx::query("SELECT COUNT(*) FROM posts").fetch_one(&pool).await;
        assert!(result.is_err(), "posts table should be gone");

        // Recreating after a drop applies everything again
        let count = run_migrations(&pool).await.expect("Failed to re-run migrations");
        assert_eq!(count, MIGRATIONS.len());
    }

    #[tokio::test]
    async fn test_migration_versions_are_unique_and_ordered() {
        let mut versions: Vec<i32> = MIGRATIONS.iter().map(|m| m.version).collect();
        let original = versions.clone();
        versions.sort_unstable();
        versions.dedup();

        assert_eq!(versions.len(), MIGRATIONS.len());
        assert_eq!(versions, original);
    }
}
