//! End-to-end tests over the assembled router.

use axum_test::{TestServer, TestServerConfig};
use serde_json::json;

use bluelog::bootstrap::create_app;
use bluelog::cli;
use bluelog::models::{Category, Post};
use bluelog::web::AppState;

async fn server() -> (TestServer, AppState) {
    let app = create_app(Some("testing"))
        .await
        .expect("Bootstrap should succeed");
    let config = TestServerConfig {
        save_cookies: true,
        ..Default::default()
    };
    let server =
        TestServer::new_with_config(app.router, config).expect("Failed to start test server");
    (server, app.state)
}

/// GET once to receive the CSRF cookie, and return its token value.
///
/// The request is sent without the saved cookie jar so the middleware issues
/// a fresh token (it only sets the cookie when the request arrives without
/// one); the new cookie is still saved back to the server's jar.
async fn csrf_token(server: &TestServer) -> String {
    let response = server.get("/").clear_cookies().await;
    response.cookie("csrf_token").value().to_string()
}

async fn seed_post(state: &AppState) -> Post {
    let category = state
        .category_repo
        .create(&Category::new("Default".to_string()))
        .await
        .expect("Failed to create category");
    state
        .post_repo
        .create(&Post::new(
            "Hello".to_string(),
            "First post.".to_string(),
            category.id,
        ))
        .await
        .expect("Failed to create post")
}

async fn log_in(server: &TestServer, state: &AppState) {
    cli::init(&state.pool, "boss", "correct-horse")
        .await
        .expect("Init failed");

    let token = csrf_token(server).await;
    let response = server
        .post("/auth/login")
        .form(&json!({
            "csrf_token": token,
            "username": "boss",
            "password": "correct-horse",
        }))
        .await;
    assert!(response.status_code().is_redirection());
}

#[tokio::test]
async fn test_blog_auth_and_admin_groups_are_mounted() {
    let (server, _state) = server().await;

    assert_eq!(server.get("/").await.status_code(), 200);
    assert_eq!(server.get("/about").await.status_code(), 200);
    assert_eq!(server.get("/auth/login").await.status_code(), 200);

    // The admin panel redirects anonymous visitors to the login form
    let response = server.get("/admin/post/manage").await;
    assert!(response.status_code().is_redirection());
    assert_eq!(response.header("location"), "/auth/login");
}

#[tokio::test]
async fn test_unknown_path_renders_404() {
    let (server, _state) = server().await;

    let response = server.get("/no-such-page").await;
    assert_eq!(response.status_code(), 404);
    assert!(response.text().contains("404"));
}

#[tokio::test]
async fn test_csrf_failure_renders_400_with_description() {
    let (server, state) = server().await;
    let post = seed_post(&state).await;
    let _ = csrf_token(&server).await;

    let response = server
        .post(&format!("/post/{}/comment", post.id))
        .form(&json!({
            "author": "Visitor",
            "body": "Nice post",
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(response.text().contains("The CSRF token is missing."));
}

#[tokio::test]
async fn test_csrf_mismatch_renders_400_with_description() {
    let (server, state) = server().await;
    let post = seed_post(&state).await;
    let _ = csrf_token(&server).await;

    let response = server
        .post(&format!("/post/{}/comment", post.id))
        .form(&json!({
            "csrf_token": "forged",
            "author": "Visitor",
            "body": "Nice post",
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(response.text().contains("The CSRF tokens do not match."));
}

#[tokio::test]
async fn test_visitor_comment_awaits_review() {
    let (server, state) = server().await;
    let post = seed_post(&state).await;
    let token = csrf_token(&server).await;

    let response = server
        .post(&format!("/post/{}/comment", post.id))
        .form(&json!({
            "csrf_token": token,
            "author": "Visitor",
            "email": "visitor@example.com",
            "body": "Looking forward to more.",
        }))
        .await;
    assert!(response.status_code().is_redirection());

    // Unreviewed comments stay off the public page
    let page = server.get(&format!("/post/{}", post.id)).await.text();
    assert!(!page.contains("Looking forward to more."));

    let unreviewed = state
        .comment_repo
        .count_unreviewed()
        .await
        .expect("Failed to count");
    assert_eq!(unreviewed, 1);
}

#[tokio::test]
async fn test_closed_post_rejects_comments() {
    let (server, state) = server().await;
    let mut post = seed_post(&state).await;
    post.can_comment = false;
    state.post_repo.update(&post).await.expect("Failed to update");

    let token = csrf_token(&server).await;
    let response = server
        .post(&format!("/post/{}/comment", post.id))
        .form(&json!({
            "csrf_token": token,
            "author": "Visitor",
            "body": "Too late",
        }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_login_grants_admin_access() {
    let (server, state) = server().await;
    log_in(&server, &state).await;

    assert_eq!(server.get("/admin/post/manage").await.status_code(), 200);
    assert_eq!(server.get("/admin/settings").await.status_code(), 200);
}

#[tokio::test]
async fn test_bad_credentials_do_not_grant_access() {
    let (server, state) = server().await;
    cli::init(&state.pool, "boss", "correct-horse")
        .await
        .expect("Init failed");

    let token = csrf_token(&server).await;
    let response = server
        .post("/auth/login")
        .form(&json!({
            "csrf_token": token,
            "username": "boss",
            "password": "wrong",
        }))
        .await;
    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("Invalid username or password."));

    let response = server.get("/admin/post/manage").await;
    assert!(response.status_code().is_redirection());
}

#[tokio::test]
async fn test_unread_count_only_shown_to_admin() {
    let (server, state) = server().await;
    let post = seed_post(&state).await;

    // A pending visitor comment
    let token = csrf_token(&server).await;
    server
        .post(&format!("/post/{}/comment", post.id))
        .form(&json!({
            "csrf_token": token,
            "author": "Visitor",
            "body": "Pending",
        }))
        .await;

    let public = server.get("/").await.text();
    assert!(!public.contains("Comments (1)"));

    log_in(&server, &state).await;
    let page = server.get("/").await.text();
    assert!(page.contains("Comments (1)"));
}

#[tokio::test]
async fn test_admin_comment_is_published_immediately() {
    let (server, state) = server().await;
    let post = seed_post(&state).await;
    log_in(&server, &state).await;

    let token = csrf_token(&server).await;
    let response = server
        .post(&format!("/post/{}/comment", post.id))
        .form(&json!({
            "csrf_token": token,
            "body": "Thanks for reading!",
        }))
        .await;
    assert!(response.status_code().is_redirection());

    let page = server.get(&format!("/post/{}", post.id)).await.text();
    assert!(page.contains("Thanks for reading!"));
}

#[tokio::test]
async fn test_default_category_cannot_be_deleted() {
    let (server, state) = server().await;
    let post = seed_post(&state).await;
    log_in(&server, &state).await;

    let default = state
        .category_repo
        .get_by_id(post.category_id)
        .await
        .expect("query")
        .expect("category exists");
    assert!(default.is_default());

    let token = csrf_token(&server).await;
    let response = server
        .post(&format!("/admin/category/{}/delete", default.id))
        .form(&json!({ "csrf_token": token }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_deleting_category_moves_posts_to_default() {
    let (server, state) = server().await;
    let post = seed_post(&state).await;
    log_in(&server, &state).await;

    let other = state
        .category_repo
        .create(&Category::new("Tech".to_string()))
        .await
        .expect("create");
    let mut moved = Post::new("Tech post".to_string(), "Body".to_string(), other.id);
    moved = state.post_repo.create(&moved).await.expect("create");

    let token = csrf_token(&server).await;
    let response = server
        .post(&format!("/admin/category/{}/delete", other.id))
        .form(&json!({ "csrf_token": token }))
        .await;
    assert!(response.status_code().is_redirection());

    let moved = state
        .post_repo
        .get_by_id(moved.id)
        .await
        .expect("query")
        .expect("post exists");
    assert_eq!(moved.category_id, post.category_id);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let (server, state) = server().await;
    log_in(&server, &state).await;

    let token = csrf_token(&server).await;
    let response = server
        .post("/auth/logout")
        .form(&json!({ "csrf_token": token }))
        .await;
    assert!(response.status_code().is_redirection());

    let response = server.get("/admin/post/manage").await;
    assert!(response.status_code().is_redirection());
}
