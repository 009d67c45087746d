//! Web error handling
//!
//! All recoverable request failures funnel into `WebError`, which renders the
//! matching error template. CSRF failures share the 400 status with generic
//! bad requests but carry a description into the template.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tera::Context;

use crate::web::templates;

/// Error type for the HTTP surface
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Malformed or unprocessable request
    #[error("Bad request")]
    BadRequest,

    /// CSRF validation failure, with a description shown to the visitor
    #[error("CSRF failure: {0}")]
    Csrf(String),

    /// Missing resource
    #[error("Not found")]
    NotFound,

    /// Anything unexpected
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, template, description) = match self {
            WebError::BadRequest => (StatusCode::BAD_REQUEST, "errors/400.html", None),
            WebError::Csrf(description) => {
                (StatusCode::BAD_REQUEST, "errors/400.html", Some(description))
            }
            WebError::NotFound => (StatusCode::NOT_FOUND, "errors/404.html", None),
            WebError::Internal(e) => {
                tracing::error!("Internal error handling request: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "errors/500.html", None)
            }
        };

        let mut context = Context::new();
        if let Some(description) = description {
            context.insert("description", &description);
        }

        match templates::render(template, &context) {
            Ok(html) => (status, Html(html)).into_response(),
            // Rendering an error page should never fail, but if it does the
            // status code still has to reach the client
            Err(e) => {
                tracing::error!("Failed to render error template: {:?}", e);
                (status, status.canonical_reason().unwrap_or("Error").to_string())
                    .into_response()
            }
        }
    }
}

/// Fallback handler for unknown paths.
pub async fn not_found() -> WebError {
    WebError::NotFound
}
