//! Public blog routes
//!
//! Index, post detail with comments, per-category listings, the about page,
//! and visitor comment submission.

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;

use crate::models::Comment;
use crate::web::context::{base_context, Pagination};
use crate::web::csrf::{CsrfForm, CsrfToken};
use crate::web::error::WebError;
use crate::web::middleware::{AppState, CurrentAdmin};
use crate::web::templates;

/// Build the public blog router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/about", get(about))
        .route("/category/{id}", get(show_category))
        .route("/post/{id}", get(show_post))
        .route("/post/{id}/comment", post(new_comment))
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<u32>,
}

/// GET / - paginated post listing, newest first
async fn index(
    State(state): State<AppState>,
    Extension(csrf): Extension<CsrfToken>,
    current: Option<Extension<CurrentAdmin>>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, WebError> {
    let current = current.as_ref().map(|e| &e.0 .0);
    let per_page = state.config.pagination.post_per_page;
    let page = query.page.unwrap_or(1).max(1);

    let total = state.post_repo.count().await?;
    let posts = state
        .post_repo
        .list_page(Pagination::offset(page, per_page), per_page as i64)
        .await?;

    let mut context = base_context(&state, current, &csrf).await?;
    context.insert("posts", &posts);
    context.insert("pagination", &Pagination::new(page, per_page, total));

    Ok(Html(templates::render("index.html", &context)?))
}

/// GET /about - the admin's about text
async fn about(
    State(state): State<AppState>,
    Extension(csrf): Extension<CsrfToken>,
    current: Option<Extension<CurrentAdmin>>,
) -> Result<Html<String>, WebError> {
    let current = current.as_ref().map(|e| &e.0 .0);
    let context = base_context(&state, current, &csrf).await?;
    Ok(Html(templates::render("about.html", &context)?))
}

/// GET /category/{id} - posts in one category
async fn show_category(
    State(state): State<AppState>,
    Extension(csrf): Extension<CsrfToken>,
    current: Option<Extension<CurrentAdmin>>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, WebError> {
    let current = current.as_ref().map(|e| &e.0 .0);
    let category = state
        .category_repo
        .get_by_id(id)
        .await?
        .ok_or(WebError::NotFound)?;

    let per_page = state.config.pagination.post_per_page;
    let page = query.page.unwrap_or(1).max(1);
    let total = state.post_repo.count_by_category(id).await?;
    let posts = state
        .post_repo
        .list_by_category_page(id, Pagination::offset(page, per_page), per_page as i64)
        .await?;

    let mut context = base_context(&state, current, &csrf).await?;
    context.insert("category", &category);
    context.insert("posts", &posts);
    context.insert("pagination", &Pagination::new(page, per_page, total));

    Ok(Html(templates::render("category.html", &context)?))
}

#[derive(Debug, Deserialize)]
struct PostQuery {
    page: Option<u32>,
    /// Comment ID being replied to, set by the "Reply" link
    reply: Option<i64>,
}

/// GET /post/{id} - post detail with reviewed comments and the comment form
async fn show_post(
    State(state): State<AppState>,
    Extension(csrf): Extension<CsrfToken>,
    current: Option<Extension<CurrentAdmin>>,
    Path(id): Path<i64>,
    Query(query): Query<PostQuery>,
) -> Result<Html<String>, WebError> {
    let current = current.as_ref().map(|e| &e.0 .0);
    let post = state
        .post_repo
        .get_by_id(id)
        .await?
        .ok_or(WebError::NotFound)?;

    let per_page = state.config.pagination.comment_per_page;
    let page = query.page.unwrap_or(1).max(1);
    let total = state.comment_repo.count_for_post(id).await?;
    let comments = state
        .comment_repo
        .list_for_post(id, Pagination::offset(page, per_page), per_page as i64)
        .await?;

    let mut context = base_context(&state, current, &csrf).await?;
    context.insert("post", &post);
    context.insert("comments", &comments);
    context.insert("pagination", &Pagination::new(page, per_page, total));

    if let Some(reply_id) = query.reply {
        if let Some(replied) = state.comment_repo.get_by_id(reply_id).await? {
            if replied.post_id == id {
                context.insert("replied", &replied);
            }
        }
    }

    Ok(Html(templates::render("post.html", &context)?))
}

#[derive(Debug, Deserialize)]
struct CommentFormBody {
    author: Option<String>,
    email: Option<String>,
    site: Option<String>,
    body: String,
    replied_id: Option<String>,
}

/// POST /post/{id}/comment - leave a comment
///
/// Visitor comments await review; a comment from the logged-in admin is
/// published immediately and flagged `from_admin`. New visitor comments
/// trigger a best-effort mail notification.
async fn new_comment(
    State(state): State<AppState>,
    current: Option<Extension<CurrentAdmin>>,
    Path(id): Path<i64>,
    CsrfForm(form): CsrfForm<CommentFormBody>,
) -> Result<impl IntoResponse, WebError> {
    let post = state
        .post_repo
        .get_by_id(id)
        .await?
        .ok_or(WebError::NotFound)?;

    if !post.can_comment {
        return Err(WebError::BadRequest);
    }

    let body = form.body.trim().to_string();
    if body.is_empty() {
        return Err(WebError::BadRequest);
    }

    let mut comment = match &current {
        Some(Extension(CurrentAdmin(admin))) => {
            Comment::from_admin(admin.name.clone(), body, id)
        }
        None => {
            let author = form
                .author
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .ok_or(WebError::BadRequest)?
                .to_string();
            let mut comment = Comment::new(author, body, id);
            comment.email = form.email.filter(|e| !e.trim().is_empty());
            comment.site = form.site.filter(|s| !s.trim().is_empty());
            comment
        }
    };

    if let Some(replied_id) = form.replied_id.as_deref().filter(|r| !r.is_empty()) {
        let replied_id: i64 = replied_id.parse().map_err(|_| WebError::BadRequest)?;
        let replied = state
            .comment_repo
            .get_by_id(replied_id)
            .await?
            .ok_or(WebError::BadRequest)?;
        if replied.post_id != id {
            return Err(WebError::BadRequest);
        }
        comment.replied_id = Some(replied_id);
    }

    let created = state.comment_repo.create(&comment).await?;

    if !created.from_admin {
        let mailer = state.mailer.clone();
        let title = post.title.clone();
        let url = format!(
            "http://{}:{}/post/{}",
            state.config.server.host, state.config.server.port, id
        );
        tokio::spawn(async move {
            if let Err(e) = mailer.send_new_comment_notification(&title, &url).await {
                tracing::warn!("Failed to send comment notification: {}", e);
            }
        });
    }

    Ok(Redirect::to(&format!("/post/{}", id)))
}
