//! Web middleware and application state
//!
//! The application state is an explicit dependency registry built once during
//! bootstrap and handed to every handler, instead of module-level singletons.
//! Authentication is cookie-session based: `optional_auth` resolves the
//! session on every request, `require_auth` gates the admin panel.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::config::Config;
use crate::db::repositories::{
    AdminRepository, CategoryRepository, CommentRepository, PostRepository,
};
use crate::models::Admin;
use crate::services::{AuthService, EmailService};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Raw persistence handle, kept reachable for interactive debugging
    pub pool: SqlitePool,
    pub admin_repo: Arc<dyn AdminRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub post_repo: Arc<dyn PostRepository>,
    pub comment_repo: Arc<dyn CommentRepository>,
    pub auth: Arc<AuthService>,
    pub mailer: Arc<EmailService>,
}

/// The authenticated admin, inserted into request extensions by
/// `optional_auth` when the session cookie is valid.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub Admin);

/// Read a cookie value from the request headers.
///
/// Clients may split cookies across multiple `Cookie` field lines, so every
/// header is inspected.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for cookie_header in headers.get_all(header::COOKIE) {
        let Ok(cookie_header) = cookie_header.to_str() else {
            continue;
        };
        for cookie in cookie_header.split(';') {
            let cookie = cookie.trim();
            if let Some(value) = cookie.strip_prefix(name) {
                if let Some(value) = value.strip_prefix('=') {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// Resolve the session cookie to the admin, when present and valid.
///
/// Never rejects; public pages render differently for the logged-in admin.
pub async fn optional_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = cookie_value(request.headers(), SESSION_COOKIE) {
        if let Ok(Some(admin)) = state.auth.validate_session(&token).await {
            request.extensions_mut().insert(CurrentAdmin(admin));
        }
    }
    next.run(request).await
}

/// Gate for the admin panel: redirect to the login form when the request
/// carries no valid session.
pub async fn require_auth(request: Request, next: Next) -> Response {
    if request.extensions().get::<CurrentAdmin>().is_none() {
        return Redirect::to("/auth/login").into_response();
    }
    next.run(request).await
}
