//! Database connection pool
//!
//! Bluelog uses SQLite for single-binary deployment. File-backed databases
//! get their parent directory created and `mode=rwc` appended so a first run
//! works from an empty checkout.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;

/// Create a connection pool from configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    let url = &config.url;
    let in_memory = url == ":memory:" || url.starts_with("sqlite::memory:");

    if !in_memory {
        let path = url.strip_prefix("sqlite:").unwrap_or(url);
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory: {:?}", parent)
                })?;
            }
        }
    }

    let connection_url = if in_memory {
        "sqlite::memory:".to_string()
    } else if url.starts_with("sqlite:") {
        if url.contains('?') {
            url.to_string()
        } else {
            format!("{}?mode=rwc", url)
        }
    } else {
        format!("sqlite:{}?mode=rwc", url)
    };

    // An in-memory database exists per connection, so the pool must keep
    // exactly one alive for the whole lifetime.
    let mut options = SqlitePoolOptions::new();
    if in_memory {
        options = options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    } else {
        options = options.max_connections(20);
    }

    let pool = options
        .connect(&connection_url)
        .await
        .with_context(|| format!("Failed to connect to SQLite database: {}", url))?;

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .context("Failed to enable foreign keys")?;

    Ok(pool)
}

/// Create an in-memory pool for tests.
pub async fn create_test_pool() -> Result<SqlitePool> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
    };
    create_pool(&config).await
}
