//! Verify Email Use Case
//!
//! Completes a registration: consumes the pending entry, creates the
//! identity, and opens a session by issuing the first token pair.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenIssuer, TokenPair};
use crate::domain::entity::identity::Identity;
use crate::domain::repository::{PendingStore, UserDirectory};
use crate::domain::value_object::{Email, OtpCode, Role};
use crate::error::{AuthError, AuthResult};
use platform::password::PlainPassword;

/// Verify email input
pub struct VerifyEmailInput {
    pub email: String,
    pub code: String,
}

/// Verify email output
#[derive(Debug)]
pub struct VerifyEmailOutput {
    pub identity: Identity,
    pub tokens: TokenPair,
}

/// Verify email use case
pub struct VerifyEmailUseCase<D, P>
where
    D: UserDirectory,
    P: PendingStore,
{
    directory: Arc<D>,
    pending: Arc<P>,
    issuer: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<D, P> VerifyEmailUseCase<D, P>
where
    D: UserDirectory,
    P: PendingStore,
{
    pub fn new(
        directory: Arc<D>,
        pending: Arc<P>,
        issuer: Arc<TokenIssuer>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            directory,
            pending,
            issuer,
            config,
        }
    }

    pub async fn execute(&self, input: VerifyEmailInput) -> AuthResult<VerifyEmailOutput> {
        let email = Email::new(input.email)?;
        let code = OtpCode::parse(&input.code).map_err(|_| AuthError::InvalidOrExpiredCode)?;

        // Absent and expired look the same to the caller.
        let pending = self
            .pending
            .get_registration(&code)
            .await?
            .ok_or(AuthError::InvalidOrExpiredCode)?;

        // The code must belong to this email; a mismatch leaves the
        // pending entry untouched.
        if pending.email != email {
            tracing::warn!(
                email = %email.masked(),
                "Verification attempted with a code issued to another address"
            );
            return Err(AuthError::InvalidOrExpiredCode);
        }

        let password_hash =
            PlainPassword::new(pending.password.clone())?.hash(self.config.pepper())?;

        let mut identity = Identity::new(
            pending.email.clone(),
            password_hash,
            Role::default(),
            pending.display_name.clone(),
        );

        self.directory.create(&identity).await?;

        // Single-use: consume the entry once the identity exists.
        self.pending.delete_registration(&code).await?;

        let tokens = self
            .issuer
            .issue(&identity.identity_id, identity.role, identity.email.as_str())?;
        self.directory
            .store_refresh_token(&identity.identity_id, &tokens.refresh)
            .await?;
        identity.refresh_token = Some(tokens.refresh.clone());

        tracing::info!(
            identity_id = %identity.identity_id,
            email = %identity.email.masked(),
            "Identity created"
        );

        Ok(VerifyEmailOutput { identity, tokens })
    }
}
