//! Admin model
//!
//! Bluelog is a single-author blog: the first row of the `admin` table is
//! treated as "the" administrator. The invariant is enforced by convention
//! (the `init` command updates the existing row instead of inserting), not
//! by the schema.

use serde::{Deserialize, Serialize};

/// The blog administrator, including the site-wide display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    /// Unique identifier
    pub id: i64,
    /// Login name
    pub username: String,
    /// Password hash (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Blog title shown in the header
    pub blog_title: String,
    /// Blog subtitle shown under the title
    pub blog_sub_title: String,
    /// Display name used for admin comments
    pub name: String,
    /// Free-form about text for the about page
    pub about: String,
}

impl Admin {
    /// Create a new Admin with the given login credentials and default
    /// profile text. The ID is assigned by the database.
    ///
    /// The password must already be hashed; use
    /// `services::password::hash_password`.
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: 0,
            username,
            password_hash,
            blog_title: "Bluelog".to_string(),
            blog_sub_title: "No, I'm the real thing.".to_string(),
            name: "Admin".to_string(),
            about: "Anything about you.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_new_defaults() {
        let admin = Admin::new("boss".to_string(), "hash".to_string());

        assert_eq!(admin.id, 0);
        assert_eq!(admin.username, "boss");
        assert_eq!(admin.blog_title, "Bluelog");
        assert_eq!(admin.blog_sub_title, "No, I'm the real thing.");
        assert_eq!(admin.name, "Admin");
        assert_eq!(admin.about, "Anything about you.");
    }

    #[test]
    fn test_admin_serialization_skips_password_hash() {
        let admin = Admin::new("boss".to_string(), "secret-hash".to_string());
        let json = serde_json::to_string(&admin).expect("Failed to serialize admin");

        assert!(!json.contains("secret-hash"));
        assert!(json.contains("boss"));
    }
}
