//! Web layer - HTTP handlers and routing
//!
//! Three route groups mirror the application structure:
//! - public blog at `/`
//! - authentication under `/auth`
//! - admin panel under `/admin` (behind the auth middleware)

pub mod admin;
pub mod auth;
pub mod blog;
pub mod context;
pub mod csrf;
pub mod error;
pub mod middleware;
pub mod templates;

use axum::{middleware as axum_middleware, Router};
use tower_http::trace::TraceLayer;

pub use error::WebError;
pub use middleware::AppState;

/// Build the complete router with middleware.
pub fn build_router(state: AppState) -> Router {
    let admin_routes = admin::router().route_layer(axum_middleware::from_fn(middleware::require_auth));

    Router::new()
        .merge(blog::router())
        .nest("/auth", auth::router())
        .nest("/admin", admin_routes)
        .fallback(error::not_found)
        // Outermost first at request time: CSRF cookie, then session lookup
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::optional_auth,
        ))
        .layer(axum_middleware::from_fn(csrf::ensure_csrf_cookie))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
