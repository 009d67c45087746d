//! Category model

use serde::{Deserialize, Serialize};

/// Name of the category that always exists and receives orphaned posts.
pub const DEFAULT_CATEGORY_NAME: &str = "Default";

/// A post category. Names are unique and listings are ordered by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique identifier
    pub id: i64,
    /// Category name (unique)
    pub name: String,
}

impl Category {
    /// Create a new Category. The ID is assigned by the database.
    pub fn new(name: String) -> Self {
        Self { id: 0, name }
    }

    /// Check if this is the default category, which cannot be deleted.
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_CATEGORY_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_new() {
        let category = Category::new("Travel".to_string());
        assert_eq!(category.id, 0);
        assert_eq!(category.name, "Travel");
    }

    #[test]
    fn test_category_is_default() {
        assert!(Category::new("Default".to_string()).is_default());
        assert!(!Category::new("Travel".to_string()).is_default());
    }
}
