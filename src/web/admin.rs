//! Admin panel routes
//!
//! Post, category, and comment management plus the blog settings form. Every
//! route here sits behind the authentication gate, so the `CurrentAdmin`
//! extension is always present.

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;

use crate::db::repositories::CommentFilter;
use crate::models::{Category, Post, DEFAULT_CATEGORY_NAME};
use crate::web::context::{base_context, Pagination};
use crate::web::csrf::{CsrfForm, CsrfToken};
use crate::web::error::WebError;
use crate::web::middleware::{AppState, CurrentAdmin};
use crate::web::templates;

/// Build the admin router, nested under `/admin` behind the auth gate.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/settings", get(settings_form).post(update_settings))
        .route("/post/manage", get(manage_posts))
        .route("/post/new", get(new_post_form).post(create_post))
        .route("/post/{id}/edit", get(edit_post_form).post(update_post))
        .route("/post/{id}/delete", post(delete_post))
        .route("/post/{id}/set-comment", post(toggle_comment))
        .route("/category/manage", get(manage_categories))
        .route("/category/new", post(create_category))
        .route("/category/{id}/delete", post(delete_category))
        .route("/comment/manage", get(manage_comments))
        .route("/comment/{id}/approve", post(approve_comment))
        .route("/comment/{id}/delete", post(delete_comment))
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct EmptyForm {}

// ---------------------------------------------------------------------------
// Settings

/// GET /admin/settings
async fn settings_form(
    State(state): State<AppState>,
    Extension(csrf): Extension<CsrfToken>,
    Extension(CurrentAdmin(admin)): Extension<CurrentAdmin>,
) -> Result<Html<String>, WebError> {
    let context = base_context(&state, Some(&admin), &csrf).await?;
    Ok(Html(templates::render("admin/settings.html", &context)?))
}

#[derive(Debug, Deserialize)]
struct SettingsFormBody {
    name: String,
    blog_title: String,
    blog_sub_title: String,
    about: String,
}

/// POST /admin/settings
async fn update_settings(
    State(state): State<AppState>,
    Extension(CurrentAdmin(mut admin)): Extension<CurrentAdmin>,
    CsrfForm(form): CsrfForm<SettingsFormBody>,
) -> Result<Redirect, WebError> {
    if form.name.trim().is_empty() || form.blog_title.trim().is_empty() {
        return Err(WebError::BadRequest);
    }

    admin.name = form.name.trim().to_string();
    admin.blog_title = form.blog_title.trim().to_string();
    admin.blog_sub_title = form.blog_sub_title.trim().to_string();
    admin.about = form.about;
    state.admin_repo.update(&admin).await?;

    Ok(Redirect::to("/admin/settings"))
}

// ---------------------------------------------------------------------------
// Posts

/// GET /admin/post/manage
async fn manage_posts(
    State(state): State<AppState>,
    Extension(csrf): Extension<CsrfToken>,
    Extension(CurrentAdmin(admin)): Extension<CurrentAdmin>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, WebError> {
    let per_page = state.config.pagination.manage_per_page;
    let page = query.page.unwrap_or(1).max(1);
    let total = state.post_repo.count().await?;
    let posts = state
        .post_repo
        .list_page(Pagination::offset(page, per_page), per_page as i64)
        .await?;

    let mut context = base_context(&state, Some(&admin), &csrf).await?;
    context.insert("posts", &posts);
    context.insert("pagination", &Pagination::new(page, per_page, total));

    Ok(Html(templates::render("admin/manage_posts.html", &context)?))
}

#[derive(Debug, Deserialize)]
struct PostFormBody {
    title: String,
    body: String,
    category_id: String,
}

impl PostFormBody {
    fn validated(&self) -> Result<(String, String, i64), WebError> {
        let title = self.title.trim();
        if title.is_empty() || self.body.trim().is_empty() {
            return Err(WebError::BadRequest);
        }
        let category_id: i64 = self
            .category_id
            .parse()
            .map_err(|_| WebError::BadRequest)?;
        Ok((title.to_string(), self.body.clone(), category_id))
    }
}

/// GET /admin/post/new
async fn new_post_form(
    State(state): State<AppState>,
    Extension(csrf): Extension<CsrfToken>,
    Extension(CurrentAdmin(admin)): Extension<CurrentAdmin>,
) -> Result<Html<String>, WebError> {
    let context = base_context(&state, Some(&admin), &csrf).await?;
    Ok(Html(templates::render("admin/edit_post.html", &context)?))
}

/// POST /admin/post/new
async fn create_post(
    State(state): State<AppState>,
    CsrfForm(form): CsrfForm<PostFormBody>,
) -> Result<Redirect, WebError> {
    let (title, body, category_id) = form.validated()?;
    state
        .category_repo
        .get_by_id(category_id)
        .await?
        .ok_or(WebError::BadRequest)?;

    let post = state
        .post_repo
        .create(&Post::new(title, body, category_id))
        .await?;

    Ok(Redirect::to(&format!("/post/{}", post.id)))
}

/// GET /admin/post/{id}/edit
async fn edit_post_form(
    State(state): State<AppState>,
    Extension(csrf): Extension<CsrfToken>,
    Extension(CurrentAdmin(admin)): Extension<CurrentAdmin>,
    Path(id): Path<i64>,
) -> Result<Html<String>, WebError> {
    let post = state
        .post_repo
        .get_by_id(id)
        .await?
        .ok_or(WebError::NotFound)?;

    let mut context = base_context(&state, Some(&admin), &csrf).await?;
    context.insert("post", &post);
    Ok(Html(templates::render("admin/edit_post.html", &context)?))
}

/// POST /admin/post/{id}/edit
async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CsrfForm(form): CsrfForm<PostFormBody>,
) -> Result<Redirect, WebError> {
    let mut post = state
        .post_repo
        .get_by_id(id)
        .await?
        .ok_or(WebError::NotFound)?;

    let (title, body, category_id) = form.validated()?;
    state
        .category_repo
        .get_by_id(category_id)
        .await?
        .ok_or(WebError::BadRequest)?;

    post.title = title;
    post.body = body;
    post.category_id = category_id;
    state.post_repo.update(&post).await?;

    Ok(Redirect::to(&format!("/post/{}", id)))
}

/// POST /admin/post/{id}/delete
async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CsrfForm(_): CsrfForm<EmptyForm>,
) -> Result<Redirect, WebError> {
    state
        .post_repo
        .get_by_id(id)
        .await?
        .ok_or(WebError::NotFound)?;
    state.post_repo.delete(id).await?;

    Ok(Redirect::to("/admin/post/manage"))
}

/// POST /admin/post/{id}/set-comment - toggle whether the post takes comments
async fn toggle_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CsrfForm(_): CsrfForm<EmptyForm>,
) -> Result<Redirect, WebError> {
    let mut post = state
        .post_repo
        .get_by_id(id)
        .await?
        .ok_or(WebError::NotFound)?;

    post.can_comment = !post.can_comment;
    state.post_repo.update(&post).await?;

    Ok(Redirect::to(&format!("/post/{}", id)))
}

// ---------------------------------------------------------------------------
// Categories

/// GET /admin/category/manage
async fn manage_categories(
    State(state): State<AppState>,
    Extension(csrf): Extension<CsrfToken>,
    Extension(CurrentAdmin(admin)): Extension<CurrentAdmin>,
) -> Result<Html<String>, WebError> {
    let context = base_context(&state, Some(&admin), &csrf).await?;
    Ok(Html(templates::render(
        "admin/manage_categories.html",
        &context,
    )?))
}

#[derive(Debug, Deserialize)]
struct CategoryFormBody {
    name: String,
}

/// POST /admin/category/new
async fn create_category(
    State(state): State<AppState>,
    CsrfForm(form): CsrfForm<CategoryFormBody>,
) -> Result<Redirect, WebError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(WebError::BadRequest);
    }
    if state.category_repo.get_by_name(name).await?.is_some() {
        return Err(WebError::BadRequest);
    }

    state.category_repo.create(&Category::new(name.to_string())).await?;

    Ok(Redirect::to("/admin/category/manage"))
}

/// POST /admin/category/{id}/delete
///
/// The default category cannot be deleted; posts in a deleted category move
/// to the default one.
async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CsrfForm(_): CsrfForm<EmptyForm>,
) -> Result<Redirect, WebError> {
    let category = state
        .category_repo
        .get_by_id(id)
        .await?
        .ok_or(WebError::NotFound)?;

    if category.is_default() {
        return Err(WebError::BadRequest);
    }

    let default = state
        .category_repo
        .get_by_name(DEFAULT_CATEGORY_NAME)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Default category is missing"))?;

    state.post_repo.reassign_category(id, default.id).await?;
    state.category_repo.delete(id).await?;

    Ok(Redirect::to("/admin/category/manage"))
}

// ---------------------------------------------------------------------------
// Comments

#[derive(Debug, Deserialize)]
struct CommentQuery {
    page: Option<u32>,
    filter: Option<String>,
}

/// GET /admin/comment/manage - all comments, or only those awaiting review
async fn manage_comments(
    State(state): State<AppState>,
    Extension(csrf): Extension<CsrfToken>,
    Extension(CurrentAdmin(admin)): Extension<CurrentAdmin>,
    Query(query): Query<CommentQuery>,
) -> Result<Html<String>, WebError> {
    let filter = match query.filter.as_deref() {
        Some("unread") => CommentFilter::Unread,
        _ => CommentFilter::All,
    };

    let per_page = state.config.pagination.comment_per_page;
    let page = query.page.unwrap_or(1).max(1);
    let total = state.comment_repo.count(filter).await?;
    let comments = state
        .comment_repo
        .list_page(filter, Pagination::offset(page, per_page), per_page as i64)
        .await?;

    let mut context = base_context(&state, Some(&admin), &csrf).await?;
    context.insert("comments", &comments);
    context.insert("pagination", &Pagination::new(page, per_page, total));
    context.insert(
        "filter_name",
        match filter {
            CommentFilter::Unread => "unread",
            CommentFilter::All => "all",
        },
    );

    Ok(Html(templates::render(
        "admin/manage_comments.html",
        &context,
    )?))
}

/// POST /admin/comment/{id}/approve
async fn approve_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CsrfForm(_): CsrfForm<EmptyForm>,
) -> Result<Redirect, WebError> {
    state
        .comment_repo
        .get_by_id(id)
        .await?
        .ok_or(WebError::NotFound)?;
    state.comment_repo.set_reviewed(id, true).await?;

    Ok(Redirect::to("/admin/comment/manage"))
}

/// POST /admin/comment/{id}/delete
async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CsrfForm(_): CsrfForm<EmptyForm>,
) -> Result<Redirect, WebError> {
    state
        .comment_repo
        .get_by_id(id)
        .await?
        .ok_or(WebError::NotFound)?;
    state.comment_repo.delete(id).await?;

    Ok(Redirect::to("/admin/comment/manage"))
}
