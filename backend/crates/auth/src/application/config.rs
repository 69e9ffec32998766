//! Application Configuration
//!
//! All tunables for the auth application layer live here; nothing reads
//! environment variables or globals below this point.

use std::time::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret shared by access and refresh tokens
    pub token_secret: Vec<u8>,
    /// Access token lifetime (1 hour)
    pub access_ttl: Duration,
    /// Refresh token lifetime (24 hours)
    pub refresh_ttl: Duration,
    /// Pending-entry lifetime for verification codes (5 minutes)
    pub otp_ttl: Duration,
    /// Attempts to store a freshly drawn code before giving up on collisions
    pub otp_store_attempts: u32,
    /// Uniform per-request timeout applied at the HTTP layer
    pub request_timeout: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            access_ttl: Duration::from_secs(3600),         // 1 hour
            refresh_ttl: Duration::from_secs(24 * 3600),   // 24 hours
            otp_ttl: Duration::from_secs(5 * 60),          // 5 minutes
            otp_store_attempts: 3,
            request_timeout: Duration::from_secs(10),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Get the OTP TTL in whole seconds (cache expiry granularity)
    pub fn otp_ttl_secs(&self) -> u64 {
        self.otp_ttl.as_secs()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_ttl_shorter_than_refresh() {
        let config = AuthConfig::default();
        assert!(config.access_ttl < config.refresh_ttl);
    }

    #[test]
    fn test_random_secret_is_set() {
        let config = AuthConfig::with_random_secret();
        assert_eq!(config.token_secret.len(), 32);
        assert!(config.token_secret.iter().any(|&b| b != 0));
    }
}
