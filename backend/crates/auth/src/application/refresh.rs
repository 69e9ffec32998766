//! Refresh Token Use Case
//!
//! Rotates a session: the supplied refresh token must be authentic,
//! unexpired, and still the one on record. Rotation replaces the stored
//! token atomically, keyed on the old value, so concurrent refreshes of
//! the same session produce exactly one winner.

use std::sync::Arc;

use crate::application::token::{ClaimsValidator, TokenIssuer, TokenPair};
use crate::domain::repository::UserDirectory;
use crate::error::{AuthError, AuthResult};
use chrono::Utc;

/// Refresh output
#[derive(Debug)]
pub struct RefreshOutput {
    pub tokens: TokenPair,
}

/// Refresh token use case
pub struct RefreshTokenUseCase<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
    issuer: Arc<TokenIssuer>,
    validator: Arc<ClaimsValidator>,
}

impl<D> RefreshTokenUseCase<D>
where
    D: UserDirectory,
{
    pub fn new(directory: Arc<D>, issuer: Arc<TokenIssuer>, validator: Arc<ClaimsValidator>) -> Self {
        Self {
            directory,
            issuer,
            validator,
        }
    }

    pub async fn execute(&self, refresh_token: &str) -> AuthResult<RefreshOutput> {
        let claims = self.validator.decode_refresh(refresh_token)?;

        // Expiry is rejected before any lookup; nothing is mutated.
        if claims.is_expired(Utc::now()) {
            return Err(AuthError::TokenExpired);
        }

        let identity_id = claims.identity_id()?;
        let identity = self
            .directory
            .find_by_id(&identity_id)
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        // An authentic token that has already been rotated out is treated
        // like a forgery.
        match identity.refresh_token.as_deref() {
            Some(stored) if stored == refresh_token => {}
            _ => return Err(AuthError::TokenInvalid),
        }

        let tokens = self
            .issuer
            .issue(&identity.identity_id, identity.role, identity.email.as_str())?;

        let swapped = self
            .directory
            .swap_refresh_token(&identity.identity_id, refresh_token, &tokens.refresh)
            .await?;
        if !swapped {
            tracing::warn!(
                identity_id = %identity.identity_id,
                "Refresh lost a rotation race"
            );
            return Err(AuthError::TokenInvalid);
        }

        tracing::debug!(identity_id = %identity.identity_id, "Session rotated");

        Ok(RefreshOutput { tokens })
    }
}
