//! Authentication service
//!
//! Cookie-session login for the single administrator. Sessions are stored in
//! the database and expire after a fixed number of days.

use anyhow::Result;
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::repositories::{AdminRepository, SessionRepository};
use crate::models::{Admin, Session};
use crate::services::password::verify_password;

/// How long a login session lives.
const SESSION_EXPIRATION_DAYS: i64 = 7;

/// Error types for authentication operations
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Wrong username or password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Authentication service
pub struct AuthService {
    admin_repo: Arc<dyn AdminRepository>,
    session_repo: Arc<dyn SessionRepository>,
}

impl AuthService {
    pub fn new(
        admin_repo: Arc<dyn AdminRepository>,
        session_repo: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            admin_repo,
            session_repo,
        }
    }

    /// Verify credentials against the administrator and open a session.
    ///
    /// A missing admin row behaves exactly like a wrong password so the login
    /// form does not reveal whether the blog is initialized.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let admin = match self.admin_repo.first().await? {
            Some(admin) if admin.username == username => admin,
            _ => return Err(AuthError::InvalidCredentials),
        };

        if !verify_password(password, &admin.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session {
            token: Uuid::new_v4().to_string(),
            admin_id: admin.id,
            expires_at: Utc::now() + Duration::days(SESSION_EXPIRATION_DAYS),
        };
        self.session_repo.create(&session).await?;

        // Opportunistic cleanup; failures here are not the caller's problem
        if let Err(e) = self.session_repo.delete_expired().await {
            tracing::debug!("Failed to clean up expired sessions: {}", e);
        }

        Ok(session)
    }

    /// Resolve a session token to the authenticated admin, if valid.
    pub async fn validate_session(&self, token: &str) -> Result<Option<Admin>> {
        let Some(session) = self.session_repo.get(token).await? else {
            return Ok(None);
        };

        if !session.is_valid() {
            self.session_repo.delete(token).await?;
            return Ok(None);
        }

        self.admin_repo.get_by_id(session.admin_id).await
    }

    /// Terminate a session.
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.session_repo.delete(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxAdminRepository, SqlxSessionRepository};
    use crate::db::{create_test_pool, migrations};
    use crate::services::password::hash_password;

    async fn setup() -> AuthService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let admin_repo = SqlxAdminRepository::new(pool.clone());
        let hash = hash_password("correct-horse").expect("Failed to hash");
        admin_repo
            .create(&Admin::new("boss".to_string(), hash))
            .await
            .expect("Failed to create admin");

        AuthService::new(
            Arc::new(admin_repo),
            SqlxSessionRepository::boxed(pool),
        )
    }

    #[tokio::test]
    async fn test_login_success_creates_session() {
        let auth = setup().await;

        let session = auth
            .login("boss", "correct-horse")
            .await
            .expect("Login should succeed");

        let admin = auth
            .validate_session(&session.token)
            .await
            .expect("Validation errored")
            .expect("Session should resolve to admin");
        assert_eq!(admin.username, "boss");
    }

    #[tokio::test]
    async fn test_login_wrong_password_fails() {
        let auth = setup().await;

        let result = auth.login("boss", "wrong").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_wrong_username_fails() {
        let auth = setup().await;

        let result = auth.login("intruder", "correct-horse").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let auth = setup().await;
        let session = auth
            .login("boss", "correct-horse")
            .await
            .expect("Login should succeed");

        auth.logout(&session.token).await.expect("Logout failed");

        let admin = auth
            .validate_session(&session.token)
            .await
            .expect("Validation errored");
        assert!(admin.is_none());
    }

    #[tokio::test]
    async fn test_unknown_token_is_rejected() {
        let auth = setup().await;

        let admin = auth
            .validate_session("no-such-token")
            .await
            .expect("Validation errored");
        assert!(admin.is_none());
    }
}
