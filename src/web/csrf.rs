//! CSRF protection
//!
//! Double-submit token scheme: `ensure_csrf_cookie` guarantees every client
//! holds a `csrf_token` cookie, templates embed the same token in a hidden
//! form field, and `CsrfForm` refuses any form post whose field does not
//! match the cookie. Failures surface as HTTP 400 with a description.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use rand::{distr::Alphanumeric, Rng};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::web::error::WebError;
use crate::web::middleware::cookie_value;

/// Name of the CSRF cookie and form field.
pub const CSRF_COOKIE: &str = "csrf_token";

/// The CSRF token for the current client, inserted into request extensions
/// so handlers can embed it in rendered forms.
#[derive(Debug, Clone)]
pub struct CsrfToken(pub String);

/// Middleware that guarantees a CSRF cookie on every response.
pub async fn ensure_csrf_cookie(mut request: Request, next: Next) -> Response {
    let (token, is_new) = match cookie_value(request.headers(), CSRF_COOKIE) {
        Some(existing) => (existing, false),
        None => (generate_token(), true),
    };
    request.extensions_mut().insert(CsrfToken(token.clone()));

    let mut response = next.run(request).await;

    if is_new {
        let cookie = format!("{}={}; Path=/; SameSite=Lax", CSRF_COOKIE, token);
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

fn generate_token() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// A form body that is only deserialized after its CSRF token field has been
/// checked against the client's cookie.
#[derive(Debug)]
pub struct CsrfForm<T>(pub T);

#[derive(Deserialize)]
struct TokenField {
    csrf_token: Option<String>,
}

impl<S, T> FromRequest<S> for CsrfForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let cookie_token = cookie_value(req.headers(), CSRF_COOKIE);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| WebError::BadRequest)?;

        let field: TokenField =
            serde_urlencoded::from_bytes(&bytes).map_err(|_| WebError::BadRequest)?;

        let form_token = field
            .csrf_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| WebError::Csrf("The CSRF token is missing.".to_string()))?;
        let cookie_token = cookie_token
            .ok_or_else(|| WebError::Csrf("The CSRF session token is missing.".to_string()))?;

        if form_token != cookie_token {
            return Err(WebError::Csrf("The CSRF tokens do not match.".to_string()));
        }

        let value: T = serde_urlencoded::from_bytes(&bytes).map_err(|_| WebError::BadRequest)?;
        Ok(CsrfForm(value))
    }
}
