//! Session model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A login session for the administrator, carried in a cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque session token (UUID)
    pub token: String,
    /// Admin the session belongs to
    pub admin_id: i64,
    /// Expiry timestamp; sessions past this point are invalid
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Check whether the session is still valid.
    pub fn is_valid(&self) -> bool {
        self.expires_at > Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_session_validity() {
        let valid = Session {
            token: "t".to_string(),
            admin_id: 1,
            expires_at: Utc::now() + Duration::hours(1),
        };
        let expired = Session {
            token: "t".to_string(),
            admin_id: 1,
            expires_at: Utc::now() - Duration::hours(1),
        };

        assert!(valid.is_valid());
        assert!(!expired.is_valid());
    }
}
