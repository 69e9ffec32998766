//! Identity Entity
//!
//! The persisted account record in the user directory. A row exists only
//! for verified accounts; registrations awaiting email confirmation live
//! in the pending-state cache instead.

use crate::domain::value_object::{Email, Role};
use chrono::{DateTime, Utc};
use kernel::id::IdentityId;
use platform::password::PasswordHash;

/// Verified storefront account
#[derive(Debug, Clone)]
pub struct Identity {
    /// Primary identifier
    pub identity_id: IdentityId,
    /// Email address (unique within the directory)
    pub email: Email,
    /// Argon2id PHC-format password hash
    pub password_hash: PasswordHash,
    /// Storefront role
    pub role: Role,
    /// Optional display name chosen at registration
    pub display_name: Option<String>,
    /// Currently valid refresh token, if a session is open
    pub refresh_token: Option<String>,
    /// Most recent successful login
    pub last_login_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Create a new identity at the moment of email verification
    pub fn new(
        email: Email,
        password_hash: PasswordHash,
        role: Role,
        display_name: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            identity_id: IdentityId::new(),
            email,
            password_hash,
            role,
            display_name,
            refresh_token: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a successful login
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::PlainPassword;

    fn sample_identity() -> Identity {
        let email = Email::new("customer@example.com".to_string()).unwrap();
        let hash = PlainPassword::new("Str0ngP@ss1".to_string())
            .unwrap()
            .hash(None)
            .unwrap();
        Identity::new(email, hash, Role::default(), Some("Customer".to_string()))
    }

    #[test]
    fn test_new_identity_defaults() {
        let identity = sample_identity();
        assert_eq!(identity.role, Role::Customer);
        assert!(identity.refresh_token.is_none());
        assert!(identity.last_login_at.is_none());
        assert_eq!(identity.created_at, identity.updated_at);
    }

    #[test]
    fn test_record_login_sets_timestamp() {
        let mut identity = sample_identity();
        identity.record_login();
        assert!(identity.last_login_at.is_some());
        assert!(identity.updated_at >= identity.created_at);
    }
}
