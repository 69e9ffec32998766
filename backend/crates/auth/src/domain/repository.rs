//! Repository Traits
//!
//! Interfaces the use cases depend on. Implementations live in the
//! infrastructure layer: Postgres for the user directory, Redis for the
//! pending-state cache, SMTP for code delivery.

use crate::domain::entity::identity::Identity;
use crate::domain::entity::pending::{PendingRegistration, PendingReset};
use crate::domain::value_object::{Email, OtpCode};
use crate::error::AuthResult;
use kernel::id::IdentityId;
use platform::password::PasswordHash;
use std::time::Duration;

/// User directory trait
#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    /// Check whether an email is already registered
    async fn email_taken(&self, email: &Email) -> AuthResult<bool>;

    /// Create a new identity
    async fn create(&self, identity: &Identity) -> AuthResult<()>;

    /// Find identity by ID
    async fn find_by_id(&self, identity_id: &IdentityId) -> AuthResult<Option<Identity>>;

    /// Find identity by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Identity>>;

    /// Store the refresh token for an open session
    async fn store_refresh_token(
        &self,
        identity_id: &IdentityId,
        refresh_token: &str,
    ) -> AuthResult<()>;

    /// Atomically replace the refresh token, keyed on its current value.
    ///
    /// Returns `false` when the stored token no longer equals `current`,
    /// i.e. a concurrent rotation already won.
    async fn swap_refresh_token(
        &self,
        identity_id: &IdentityId,
        current: &str,
        next: &str,
    ) -> AuthResult<bool>;

    /// Drop the stored refresh token, ending the session
    async fn clear_refresh_token(&self, identity_id: &IdentityId) -> AuthResult<()>;

    /// Replace the stored password hash
    async fn store_password_hash(
        &self,
        identity_id: &IdentityId,
        password_hash: &PasswordHash,
    ) -> AuthResult<()>;

    /// Record a successful login timestamp
    async fn record_login(&self, identity_id: &IdentityId) -> AuthResult<()>;
}

/// Pending-state cache trait
///
/// Entries expire on their own after the TTL; an expired entry is
/// indistinguishable from one that never existed.
#[trait_variant::make(PendingStore: Send)]
pub trait LocalPendingStore {
    /// Store a pending registration under its code, only if the key is free.
    ///
    /// Returns `false` on a code collision so the caller can retry with a
    /// fresh code.
    async fn put_registration_if_absent(
        &self,
        pending: &PendingRegistration,
        ttl: Duration,
    ) -> AuthResult<bool>;

    /// Fetch a pending registration by code
    async fn get_registration(&self, code: &OtpCode) -> AuthResult<Option<PendingRegistration>>;

    /// Delete a pending registration (consume-once)
    async fn delete_registration(&self, code: &OtpCode) -> AuthResult<()>;

    /// Store a pending reset under its email, overwriting any live one
    async fn put_reset(&self, pending: &PendingReset, ttl: Duration) -> AuthResult<()>;

    /// Fetch a pending reset by email
    async fn get_reset(&self, email: &Email) -> AuthResult<Option<PendingReset>>;

    /// Delete a pending reset (consume-once)
    async fn delete_reset(&self, email: &Email) -> AuthResult<()>;
}

/// Verification-code delivery trait
#[trait_variant::make(CodeMailer: Send)]
pub trait LocalCodeMailer {
    /// Send a registration verification code
    async fn send_registration_code(&self, email: &Email, code: &OtpCode) -> AuthResult<()>;

    /// Send a password-reset code
    async fn send_reset_code(&self, email: &Email, code: &OtpCode) -> AuthResult<()>;
}
