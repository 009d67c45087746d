//! Post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post. Every post belongs to exactly one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier
    pub id: i64,
    /// Post title
    pub title: String,
    /// Post body (stored as rendered HTML)
    pub body: String,
    /// Whether visitors may leave comments
    pub can_comment: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Owning category
    pub category_id: i64,
}

impl Post {
    /// Create a new Post in the given category. The ID is assigned by the
    /// database; commenting is enabled by default.
    pub fn new(title: String, body: String, category_id: i64) -> Self {
        Self {
            id: 0,
            title,
            body,
            can_comment: true,
            created_at: Utc::now(),
            category_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_new() {
        let post = Post::new("Hello".to_string(), "<p>World</p>".to_string(), 1);

        assert_eq!(post.id, 0);
        assert_eq!(post.title, "Hello");
        assert_eq!(post.category_id, 1);
        assert!(post.can_comment);
    }
}
