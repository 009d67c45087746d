//! Template context
//!
//! Every rendered page receives the same base context: the admin record (for
//! titles and the about page), all categories ordered by name, and — only for
//! the authenticated admin — the number of comments awaiting review.
//! Authentication state is an explicit parameter, not ambient global state.

use anyhow::Result;
use tera::Context;

use crate::models::Admin;
use crate::web::csrf::CsrfToken;
use crate::web::middleware::AppState;

/// Build the base context shared by all pages.
///
/// `unread_comments` is only present for an authenticated visitor; templates
/// treat its absence as "not logged in".
pub async fn base_context(
    state: &AppState,
    current: Option<&Admin>,
    csrf: &CsrfToken,
) -> Result<Context> {
    let mut context = Context::new();

    context.insert("admin", &state.admin_repo.first().await?);
    context.insert("categories", &state.category_repo.list_ordered().await?);
    context.insert("csrf_token", &csrf.0);

    if let Some(current) = current {
        context.insert("current_admin", current);
        context.insert(
            "unread_comments",
            &state.comment_repo.count_unreviewed().await?,
        );
    }

    Ok(context)
}

/// Pagination info handed to templates.
#[derive(Debug, serde::Serialize)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
}

impl Pagination {
    /// Compute pagination for a 1-based page over `total` rows.
    pub fn new(page: u32, per_page: u32, total: i64) -> Self {
        let total_pages = ((total.max(0) as u32) + per_page - 1) / per_page;
        let total_pages = total_pages.max(1);
        Self {
            page,
            total_pages,
            has_prev: page > 1,
            has_next: page < total_pages,
        }
    }

    /// Clamp a requested page into range and return the row offset.
    pub fn offset(page: u32, per_page: u32) -> i64 {
        ((page.max(1) - 1) as i64) * per_page as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_bounds() {
        let p = Pagination::new(1, 10, 25);
        assert_eq!(p.total_pages, 3);
        assert!(!p.has_prev);
        assert!(p.has_next);

        let p = Pagination::new(3, 10, 25);
        assert!(p.has_prev);
        assert!(!p.has_next);
    }

    #[test]
    fn test_pagination_empty_store() {
        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_prev);
        assert!(!p.has_next);
    }

    #[test]
    fn test_offset() {
        assert_eq!(Pagination::offset(1, 10), 0);
        assert_eq!(Pagination::offset(3, 10), 20);
        // Page zero is treated as page one
        assert_eq!(Pagination::offset(0, 10), 0);
    }
}
