//! Forgot Password Use Case
//!
//! Starts a password reset: parks a code in the pending-state cache under
//! the account's email and mails it. Re-requesting overwrites the previous
//! code, so only the latest one is live.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::pending::PendingReset;
use crate::domain::repository::{CodeMailer, PendingStore, UserDirectory};
use crate::domain::value_object::{Email, OtpCode};
use crate::error::{AuthError, AuthResult};

/// Forgot password output (acknowledgement only)
#[derive(Debug)]
pub struct ForgotPasswordOutput {
    pub email: Email,
    pub expires_in_secs: u64,
}

/// Forgot password use case
pub struct ForgotPasswordUseCase<D, P, M>
where
    D: UserDirectory,
    P: PendingStore,
    M: CodeMailer,
{
    directory: Arc<D>,
    pending: Arc<P>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<D, P, M> ForgotPasswordUseCase<D, P, M>
where
    D: UserDirectory,
    P: PendingStore,
    M: CodeMailer,
{
    pub fn new(directory: Arc<D>, pending: Arc<P>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            directory,
            pending,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, email: String) -> AuthResult<ForgotPasswordOutput> {
        let email = Email::new(email)?;

        if self.directory.find_by_email(&email).await?.is_none() {
            return Err(AuthError::IdentityNotFound);
        }

        let pending = PendingReset::new(email.clone(), OtpCode::generate());
        self.pending.put_reset(&pending, self.config.otp_ttl).await?;

        self.mailer.send_reset_code(&pending.email, &pending.code).await?;

        tracing::info!(email = %email.masked(), "Password reset code dispatched");

        Ok(ForgotPasswordOutput {
            email,
            expires_in_secs: self.config.otp_ttl_secs(),
        })
    }
}
