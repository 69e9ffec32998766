//! Reset Password Use Case
//!
//! Completes a password reset: the supplied code must match the live
//! pending entry for the email. The new password replaces the stored
//! hash, the entry is consumed, and any open session is ended.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{PendingStore, UserDirectory};
use crate::domain::value_object::{Email, OtpCode};
use crate::error::{AuthError, AuthResult};
use platform::password::PlainPassword;

/// Reset password input
pub struct ResetPasswordInput {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

/// Reset password use case
pub struct ResetPasswordUseCase<D, P>
where
    D: UserDirectory,
    P: PendingStore,
{
    directory: Arc<D>,
    pending: Arc<P>,
    config: Arc<AuthConfig>,
}

impl<D, P> ResetPasswordUseCase<D, P>
where
    D: UserDirectory,
    P: PendingStore,
{
    pub fn new(directory: Arc<D>, pending: Arc<P>, config: Arc<AuthConfig>) -> Self {
        Self {
            directory,
            pending,
            config,
        }
    }

    pub async fn execute(&self, input: ResetPasswordInput) -> AuthResult<()> {
        let email = Email::new(input.email)?;
        let code = OtpCode::parse(&input.code).map_err(|_| AuthError::InvalidOrExpiredCode)?;

        let pending = self
            .pending
            .get_reset(&email)
            .await?
            .ok_or(AuthError::InvalidOrExpiredCode)?;

        if pending.code != code {
            tracing::warn!(email = %email.masked(), "Reset attempted with a wrong code");
            return Err(AuthError::InvalidOrExpiredCode);
        }

        let identity = self
            .directory
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::IdentityNotFound)?;

        let password_hash = PlainPassword::new(input.new_password)?.hash(self.config.pepper())?;

        self.directory
            .store_password_hash(&identity.identity_id, &password_hash)
            .await?;

        // A reset ends existing sessions.
        self.directory
            .clear_refresh_token(&identity.identity_id)
            .await?;

        self.pending.delete_reset(&email).await?;

        tracing::info!(
            identity_id = %identity.identity_id,
            email = %email.masked(),
            "Password reset completed"
        );

        Ok(())
    }
}
