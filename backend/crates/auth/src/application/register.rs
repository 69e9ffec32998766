//! Register Use Case
//!
//! Starts a registration: validates the candidate credentials, parks them
//! in the pending-state cache under a fresh code, and mails the code. No
//! identity is created here; that happens at verification.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::pending::PendingRegistration;
use crate::domain::repository::{CodeMailer, PendingStore, UserDirectory};
use crate::domain::value_object::{Email, OtpCode};
use crate::error::{AuthError, AuthResult};
use platform::password::PlainPassword;

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// Register output (acknowledgement only)
#[derive(Debug)]
pub struct RegisterOutput {
    pub email: Email,
    /// How long the mailed code stays valid, in seconds
    pub expires_in_secs: u64,
}

/// Register use case
pub struct RegisterUseCase<D, P, M>
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

impl<D, P, M> RegisterUseCase<D, P, M>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let email = Email::new(input.email)?;

        if self.directory.email_taken(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        // Validate the policy up front; the plaintext itself travels into
        // the pending entry and is hashed only at verification.
        PlainPassword::new(input.password.clone())?;

        // Conditional put: a code collision leaves the existing entry
        // untouched and we retry with a fresh draw, bounded.
        let mut stored = None;
        for attempt in 0..self.config.otp_store_attempts {
            let code = OtpCode::generate();
            let pending = PendingRegistration::new(
                code,
                email.clone(),
                input.password.clone(),
                input.display_name.clone(),
            );
            if self
                .pending
                .put_registration_if_absent(&pending, self.config.otp_ttl)
                .await?
            {
                stored = Some(pending);
                break;
            }
            tracing::warn!(attempt, "Verification code collision, retrying");
        }
        let pending = stored.ok_or_else(|| {
            AuthError::Internal("could not allocate a verification code".to_string())
        })?;

        // A failed dispatch aborts the flow; the orphaned pending entry
        // simply expires.
        self.mailer
            .send_registration_code(&pending.email, &pending.code)
            .await?;

        tracing::info!(email = %email.masked(), "Registration code dispatched");

        Ok(RegisterOutput {
            email,
            expires_in_secs: self.config.otp_ttl_secs(),
        })
    }
}
