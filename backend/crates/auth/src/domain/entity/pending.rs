//! Pending States
//!
//! Short-lived records parked in the cache while a verification code is
//! outstanding. They are serialized to JSON for storage and disappear on
//! their own when the TTL elapses.

use crate::domain::value_object::{Email, OtpCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registration awaiting email verification, keyed by its code.
///
/// The candidate password is carried as submitted; it only ever lives
/// inside the TTL'd cache entry and is hashed the moment verification
/// succeeds. No identity row exists until then.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRegistration {
    pub code: OtpCode,
    pub email: Email,
    pub password: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PendingRegistration {
    pub fn new(
        code: OtpCode,
        email: Email,
        password: String,
        display_name: Option<String>,
    ) -> Self {
        Self {
            code,
            email,
            password,
            display_name,
            created_at: Utc::now(),
        }
    }
}

/// Password reset awaiting code confirmation, keyed by email.
///
/// One live reset per email: storing a new one overwrites the old.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingReset {
    pub email: Email,
    pub code: OtpCode,
    pub created_at: DateTime<Utc>,
}

impl PendingReset {
    pub fn new(email: Email, code: OtpCode) -> Self {
        Self {
            email,
            code,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_registration_json_round_trip() {
        let pending = PendingRegistration::new(
            OtpCode::parse("123456").unwrap(),
            Email::new("new@example.com".to_string()).unwrap(),
            "Str0ngP@ss1".to_string(),
            None,
        );
        let json = serde_json::to_string(&pending).unwrap();
        let back: PendingRegistration = serde_json::from_str(&json).unwrap();
        assert_eq!(back.code, pending.code);
        assert_eq!(back.email.as_str(), "new@example.com");
        assert_eq!(back.password, "Str0ngP@ss1");
    }
}
