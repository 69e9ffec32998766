//! Token Service
//!
//! JWT issuance and validation for access/refresh pairs. Both tokens are
//! HS256-signed with the secret injected through `AuthConfig`; no key
//! material is read from globals. Validation here checks the signature
//! and structure only: expiry is an explicit, caller-side comparison so
//! that an expired-but-authentic token can be told apart from a forged
//! one at the decode layer while still being rejected identically.

use crate::application::config::AuthConfig;
use crate::domain::value_object::Role;
use crate::error::{AuthError, AuthResult};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use kernel::id::IdentityId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Identity ID (UUID string)
    pub sub: String,
    /// Storefront role
    pub role: Role,
    /// Email address
    pub email: String,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

/// Claims carried by a refresh token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Identity ID (UUID string)
    pub sub: String,
    /// Unique token id. Without it, two issuances for the same identity
    /// within the same second produce byte-identical tokens and rotation
    /// would swap a value for itself.
    pub jti: String,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

impl RefreshClaims {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }

    /// Parse the subject back into a typed identity ID
    pub fn identity_id(&self) -> AuthResult<IdentityId> {
        IdentityId::parse(&self.sub).map_err(|_| AuthError::TokenInvalid)
    }
}

/// An access/refresh pair issued together
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Signs access/refresh pairs
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenIssuer {
    /// Build an issuer from the injected config.
    ///
    /// The access TTL must be strictly shorter than the refresh TTL; a
    /// config violating that is a deployment mistake caught at startup.
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        if config.access_ttl >= config.refresh_ttl {
            return Err(AuthError::Internal(
                "access TTL must be shorter than refresh TTL".to_string(),
            ));
        }
        if config.token_secret.is_empty() {
            return Err(AuthError::Internal("token secret is empty".to_string()));
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(&config.token_secret),
            access_ttl_secs: config.access_ttl.as_secs() as i64,
            refresh_ttl_secs: config.refresh_ttl.as_secs() as i64,
        })
    }

    /// Issue a fresh pair for an identity.
    ///
    /// Either both tokens sign or neither is returned; a half-issued pair
    /// never escapes.
    pub fn issue(
        &self,
        identity_id: &IdentityId,
        role: Role,
        email: &str,
    ) -> AuthResult<TokenPair> {
        let now = Utc::now().timestamp();

        let access_claims = AccessClaims {
            sub: identity_id.to_string(),
            role,
            email: email.to_string(),
            iat: now,
            exp: now + self.access_ttl_secs,
        };
        let refresh_claims = RefreshClaims {
            sub: identity_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + self.refresh_ttl_secs,
        };

        let header = Header::new(Algorithm::HS256);
        let access = jsonwebtoken::encode(&header, &access_claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenIssuance(e.to_string()))?;
        let refresh = jsonwebtoken::encode(&header, &refresh_claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenIssuance(e.to_string()))?;

        Ok(TokenPair { access, refresh })
    }
}

/// Decodes and signature-checks tokens; expiry is left to the caller
pub struct ClaimsValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl ClaimsValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked explicitly by the use cases so an authentic
        // expired token maps to TokenExpired instead of TokenInvalid.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        Self {
            decoding_key: DecodingKey::from_secret(&config.token_secret),
            validation,
        }
    }

    pub fn decode_access(&self, token: &str) -> AuthResult<AccessClaims> {
        jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::TokenInvalid)
    }

    pub fn decode_refresh(&self, token: &str) -> AuthResult<RefreshClaims> {
        jsonwebtoken::decode::<RefreshClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::TokenInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config() -> AuthConfig {
        AuthConfig {
            token_secret: b"unit-test-secret-key-not-for-prod".to_vec(),
            ..Default::default()
        }
    }

    fn issue_pair(config: &AuthConfig) -> TokenPair {
        let issuer = TokenIssuer::new(config).unwrap();
        let identity_id = IdentityId::new();
        issuer
            .issue(&identity_id, Role::Customer, "user@example.com")
            .unwrap()
    }

    #[test]
    fn test_issued_deltas_match_ttls() {
        let config = test_config();
        let validator = ClaimsValidator::new(&config);
        let pair = issue_pair(&config);

        let access = validator.decode_access(&pair.access).unwrap();
        let refresh = validator.decode_refresh(&pair.refresh).unwrap();

        assert_eq!(access.exp - access.iat, config.access_ttl.as_secs() as i64);
        assert_eq!(
            refresh.exp - refresh.iat,
            config.refresh_ttl.as_secs() as i64
        );
        assert!(access.exp < refresh.exp);
    }

    #[test]
    fn test_typed_claims_round_trip() {
        let config = test_config();
        let issuer = TokenIssuer::new(&config).unwrap();
        let validator = ClaimsValidator::new(&config);

        let identity_id = IdentityId::new();
        let pair = issuer
            .issue(&identity_id, Role::Admin, "admin@example.com")
            .unwrap();

        let access = validator.decode_access(&pair.access).unwrap();
        assert_eq!(access.sub, identity_id.to_string());
        assert_eq!(access.role, Role::Admin);
        assert_eq!(access.email, "admin@example.com");

        let refresh = validator.decode_refresh(&pair.refresh).unwrap();
        assert_eq!(refresh.identity_id().unwrap(), identity_id);
    }

    #[test]
    fn test_issued_refresh_tokens_are_distinct() {
        let config = test_config();
        let issuer = TokenIssuer::new(&config).unwrap();
        let validator = ClaimsValidator::new(&config);
        let identity_id = IdentityId::new();

        // Same identity, back to back (likely the same second): the jti
        // still makes each refresh token unique so rotation replaces it.
        let first = issuer
            .issue(&identity_id, Role::Customer, "user@example.com")
            .unwrap();
        let second = issuer
            .issue(&identity_id, Role::Customer, "user@example.com")
            .unwrap();
        assert_ne!(first.refresh, second.refresh);

        let a = validator.decode_refresh(&first.refresh).unwrap();
        let b = validator.decode_refresh(&second.refresh).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let config = test_config();
        let validator = ClaimsValidator::new(&config);
        let pair = issue_pair(&config);

        let mut tampered = pair.refresh.clone();
        tampered.push('x');
        assert!(matches!(
            validator.decode_refresh(&tampered),
            Err(AuthError::TokenInvalid)
        ));

        let other = AuthConfig {
            token_secret: b"a-different-secret-entirely".to_vec(),
            ..Default::default()
        };
        let foreign_validator = ClaimsValidator::new(&other);
        assert!(matches!(
            foreign_validator.decode_refresh(&pair.refresh),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_expired_token_still_decodes() {
        // Signature validation and expiry are separate concerns: an
        // expired token decodes fine and reports expiry via is_expired.
        let config = test_config();
        let issuer = TokenIssuer::new(&config).unwrap();
        let validator = ClaimsValidator::new(&config);

        let pair = issuer
            .issue(&IdentityId::new(), Role::Customer, "user@example.com")
            .unwrap();
        let claims = validator.decode_refresh(&pair.refresh).unwrap();

        let future = Utc::now() + chrono::Duration::days(2);
        assert!(claims.is_expired(future));
        assert!(!claims.is_expired(Utc::now()));
    }

    #[test]
    fn test_issuer_rejects_inverted_ttls() {
        let config = AuthConfig {
            token_secret: b"secret".to_vec(),
            access_ttl: Duration::from_secs(7200),
            refresh_ttl: Duration::from_secs(3600),
            ..Default::default()
        };
        assert!(TokenIssuer::new(&config).is_err());
    }
}
