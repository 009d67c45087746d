//! Configuration management
//!
//! Bluelog resolves a named configuration profile at startup. The profile name
//! comes from an explicit argument, the `BLUELOG_CONFIG` environment variable,
//! or falls back to `development`. An unknown profile name is a fatal error.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Environment variable used to select the configuration profile.
pub const CONFIG_ENV_VAR: &str = "BLUELOG_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name of the resolved profile (development, testing, production)
    pub profile: String,
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Pagination configuration
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Optional SMTP settings for comment notifications
    #[serde(default)]
    pub mail: Option<MailConfig>,
}

impl Config {
    /// Resolve a configuration profile by name.
    ///
    /// When `name` is `None`, the `BLUELOG_CONFIG` environment variable is
    /// consulted, falling back to `development`.
    pub fn from_profile(name: Option<&str>) -> Result<Self> {
        let resolved = match name {
            Some(n) => n.to_string(),
            None => std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| "development".to_string()),
        };

        match resolved.as_str() {
            "development" => Ok(Self::named(&resolved, "data/bluelog-dev.db")),
            "testing" => Ok(Self::named(&resolved, "sqlite::memory:")),
            "production" => Ok(Self::named(&resolved, "data/bluelog.db")),
            other => bail!("Unknown configuration profile: {}", other),
        }
    }

    fn named(profile: &str, database_url: &str) -> Self {
        Self {
            profile: profile.to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: database_url.to_string(),
            },
            pagination: PaginationConfig::default(),
            mail: MailConfig::from_env(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL or file path
    pub url: String,
}

/// Pagination configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Posts per page on the public index
    #[serde(default = "default_post_per_page")]
    pub post_per_page: u32,
    /// Rows per page in admin listings
    #[serde(default = "default_manage_per_page")]
    pub manage_per_page: u32,
    /// Comments per page on post detail
    #[serde(default = "default_comment_per_page")]
    pub comment_per_page: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            post_per_page: default_post_per_page(),
            manage_per_page: default_manage_per_page(),
            comment_per_page: default_comment_per_page(),
        }
    }
}

fn default_post_per_page() -> u32 {
    10
}

fn default_manage_per_page() -> u32 {
    15
}

fn default_comment_per_page() -> u32 {
    15
}

/// SMTP settings for new comment notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    /// From address, e.g. "Bluelog <noreply@example.com>"
    pub from: String,
    /// Address notified about new comments (usually the admin)
    pub notify: String,
}

impl MailConfig {
    /// Assemble mail settings from environment variables.
    ///
    /// Returns `None` when `BLUELOG_SMTP_HOST` is unset, in which case comment
    /// notifications are silently skipped.
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("BLUELOG_SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("BLUELOG_SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(default_smtp_port),
            username: std::env::var("BLUELOG_SMTP_USERNAME").unwrap_or_default(),
            password: std::env::var("BLUELOG_SMTP_PASSWORD").unwrap_or_default(),
            from: std::env::var("BLUELOG_MAIL_FROM").unwrap_or_default(),
            notify: std::env::var("BLUELOG_MAIL_NOTIFY").unwrap_or_default(),
        })
    }
}

fn default_smtp_port() -> u16 {
    587
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_profile() {
        let config = Config::from_profile(Some("development")).expect("Failed to resolve profile");
        assert_eq!(config.profile, "development");
        assert_eq!(config.database.url, "data/bluelog-dev.db");
    }

    #[test]
    fn test_testing_profile_uses_memory_database() {
        let config = Config::from_profile(Some("testing")).expect("Failed to resolve profile");
        assert_eq!(config.database.url, "sqlite::memory:");
    }

    #[test]
    fn test_production_profile() {
        let config = Config::from_profile(Some("production")).expect("Failed to resolve profile");
        assert_eq!(config.database.url, "data/bluelog.db");
    }

    #[test]
    fn test_unknown_profile_fails() {
        let result = Config::from_profile(Some("staging"));
        assert!(result.is_err());
    }

    #[test]
    fn test_pagination_defaults() {
        let config = Config::from_profile(Some("testing")).expect("Failed to resolve profile");
        assert_eq!(config.pagination.post_per_page, 10);
        assert_eq!(config.pagination.manage_per_page, 15);
        assert_eq!(config.pagination.comment_per_page, 15);
    }
}
