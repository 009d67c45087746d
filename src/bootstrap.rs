//! Application bootstrap
//!
//! Assembles the application in a fixed order: configuration, logging,
//! database, services, router. Each step either completes or aborts startup
//! with context; nothing later runs against a half-built application.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::db::repositories::{
    SqlxAdminRepository, SqlxCategoryRepository, SqlxCommentRepository, SqlxPostRepository,
    SqlxSessionRepository,
};
use crate::db::{create_pool, migrations};
use crate::services::{AuthService, EmailService};
use crate::web::{self, AppState};

/// A fully assembled application, ready to serve or to run a CLI command.
pub struct App {
    pub state: AppState,
    pub router: axum::Router,
}

/// Make sure a tracing subscriber is installed.
///
/// The binary installs its own subscriber before calling `create_app`; this
/// only catches embedders (and tests) that skipped that step.
pub fn register_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

/// Build the application for the given configuration profile.
///
/// `None` selects the profile from `BLUELOG_CONFIG`, falling back to
/// development.
pub async fn create_app(profile: Option<&str>) -> Result<App> {
    create_app_with_config(Config::from_profile(profile)?).await
}

/// Assemble the application from an already-resolved configuration.
pub async fn create_app_with_config(config: Config) -> Result<App> {
    let config = Arc::new(config);
    register_logging();
    tracing::info!(profile = %config.profile, "Configuration loaded");

    let pool = create_pool(&config.database)
        .await
        .context("Failed to open the database")?;
    migrations::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    let admin_repo = SqlxAdminRepository::boxed(pool.clone());
    let category_repo = SqlxCategoryRepository::boxed(pool.clone());
    let post_repo = SqlxPostRepository::boxed(pool.clone());
    let comment_repo = SqlxCommentRepository::boxed(pool.clone());
    let session_repo = SqlxSessionRepository::boxed(pool.clone());

    let auth = Arc::new(AuthService::new(admin_repo.clone(), session_repo));
    let mailer = Arc::new(EmailService::new(config.mail.clone()));
    if !mailer.is_configured() {
        tracing::info!("Mail is not configured; comment notifications are disabled");
    }

    let state = AppState {
        config,
        pool,
        admin_repo,
        category_repo,
        post_repo,
        comment_repo,
        auth,
        mailer,
    };
    let router = web::build_router(state.clone());

    Ok(App {
        state,
        router,
    })
}

/// Bind the listener and serve until shutdown.
pub async fn serve(app: App) -> Result<()> {
    let addr = format!(
        "{}:{}",
        app.state.config.server.host, app.state.config.server.port
    );
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app.router)
        .await
        .context("Server error")?;
    Ok(())
}
