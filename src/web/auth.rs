//! Authentication routes
//!
//! Login form, login submission, and logout. A successful login issues a
//! session cookie; logout revokes the server-side session and clears it.

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;

use crate::services::AuthError;
use crate::web::context::base_context;
use crate::web::csrf::{CsrfForm, CsrfToken};
use crate::web::error::WebError;
use crate::web::middleware::{cookie_value, AppState, CurrentAdmin, SESSION_COOKIE};
use crate::web::templates;

/// Build the authentication router, nested under `/auth`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/logout", post(logout))
}

/// GET /auth/login - the login form, or straight home if already logged in
async fn login_form(
    State(state): State<AppState>,
    Extension(csrf): Extension<CsrfToken>,
    current: Option<Extension<CurrentAdmin>>,
) -> Result<Response, WebError> {
    if current.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let context = base_context(&state, None, &csrf).await?;
    Ok(Html(templates::render("auth/login.html", &context)?).into_response())
}

#[derive(Debug, Deserialize)]
struct LoginFormBody {
    username: String,
    password: String,
}

/// POST /auth/login - verify credentials and issue a session cookie
///
/// Bad credentials re-render the form with an error instead of leaking
/// whether the username exists.
async fn login(
    State(state): State<AppState>,
    Extension(csrf): Extension<CsrfToken>,
    CsrfForm(form): CsrfForm<LoginFormBody>,
) -> Result<Response, WebError> {
    match state.auth.login(&form.username, &form.password).await {
        Ok(session) => {
            let mut response = Redirect::to("/").into_response();
            let cookie = format!(
                "{}={}; Path=/; HttpOnly; SameSite=Lax",
                SESSION_COOKIE, session.token
            );
            response.headers_mut().append(
                header::SET_COOKIE,
                HeaderValue::from_str(&cookie).map_err(anyhow::Error::from)?,
            );
            Ok(response)
        }
        Err(AuthError::InvalidCredentials) => {
            let mut context = base_context(&state, None, &csrf).await?;
            context.insert("error", "Invalid username or password.");
            Ok(Html(templates::render("auth/login.html", &context)?).into_response())
        }
        Err(AuthError::Internal(e)) => Err(WebError::Internal(e)),
    }
}

#[derive(Debug, Deserialize)]
struct EmptyForm {}

/// POST /auth/logout - revoke the session and clear the cookie
async fn logout(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    CsrfForm(_): CsrfForm<EmptyForm>,
) -> Result<Response, WebError> {
    if let Some(token) = cookie_value(&headers, SESSION_COOKIE) {
        state.auth.logout(&token).await?;
    }

    let mut response = Redirect::to("/").into_response();
    let cookie = format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE);
    response.headers_mut().append(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(anyhow::Error::from)?,
    );
    Ok(response)
}
