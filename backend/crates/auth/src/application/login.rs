//! Login Use Case
//!
//! Authenticates a verified identity by email and password and opens a
//! session by issuing a fresh token pair.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenIssuer, TokenPair};
use crate::domain::entity::identity::Identity;
use crate::domain::repository::UserDirectory;
use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};
use platform::password::PlainPassword;

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub identity: Identity,
    pub tokens: TokenPair,
}

/// Login use case
pub struct LoginUseCase<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
    issuer: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<D> LoginUseCase<D>
where
    D: UserDirectory,
{
    pub fn new(directory: Arc<D>, issuer: Arc<TokenIssuer>, config: Arc<AuthConfig>) -> Self {
        Self {
            directory,
            issuer,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::new(input.email)?;

        let mut identity = self
            .directory
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::IdentityNotFound)?;

        // Policy checks do not apply to login: whatever was stored at
        // registration time is what we verify against.
        let password = PlainPassword::new_unchecked(input.password);
        if !identity.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self
            .issuer
            .issue(&identity.identity_id, identity.role, identity.email.as_str())?;
        self.directory
            .store_refresh_token(&identity.identity_id, &tokens.refresh)
            .await?;
        identity.refresh_token = Some(tokens.refresh.clone());

        // Best effort; a failed timestamp update must not fail the login.
        if let Err(e) = self.directory.record_login(&identity.identity_id).await {
            tracing::warn!(
                identity_id = %identity.identity_id,
                error = %e,
                "Failed to record login timestamp"
            );
        } else {
            identity.record_login();
        }

        tracing::info!(
            identity_id = %identity.identity_id,
            email = %identity.email.masked(),
            "Login succeeded"
        );

        Ok(LoginOutput { identity, tokens })
    }
}
