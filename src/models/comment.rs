//! Comment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A visitor (or admin) comment on a post.
///
/// Visitor comments start unreviewed and only appear publicly once the admin
/// approves them. Admin replies are marked `from_admin` and auto-reviewed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    /// Author display name
    pub author: String,
    /// Author email (not displayed, used for notifications)
    pub email: Option<String>,
    /// Author website
    pub site: Option<String>,
    /// Comment text
    pub body: String,
    /// Whether the comment was written by the logged-in admin
    pub from_admin: bool,
    /// Whether the admin has approved the comment for display
    pub reviewed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Post the comment belongs to
    pub post_id: i64,
    /// Comment this one replies to, if any
    pub replied_id: Option<i64>,
}

impl Comment {
    /// Create a new visitor comment on the given post. Starts unreviewed.
    pub fn new(author: String, body: String, post_id: i64) -> Self {
        Self {
            id: 0,
            author,
            email: None,
            site: None,
            body,
            from_admin: false,
            reviewed: false,
            created_at: Utc::now(),
            post_id,
            replied_id: None,
        }
    }

    /// Create an admin comment, which is reviewed immediately.
    pub fn from_admin(author: String, body: String, post_id: i64) -> Self {
        Self {
            from_admin: true,
            reviewed: true,
            ..Self::new(author, body, post_id)
        }
    }
}
