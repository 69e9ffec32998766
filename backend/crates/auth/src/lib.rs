//! Auth (Credential & Session) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, token service, configuration
//! - `infra/` - Postgres, Redis, and SMTP adapters
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Email + password registration with mailed verification codes
//! - Pending registrations/resets parked in a TTL'd cache; no identity
//!   row exists before verification
//! - JWT access/refresh pairs with typed claims and rotation
//! - Password reset via mailed code; a reset ends open sessions
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application-wide pepper
//! - Refresh tokens single-use: rotation is an atomic compare-and-swap
//! - Verification codes are consume-once and expire server-side
//! - Infrastructure failures cross the HTTP boundary as opaque errors

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::{AccessClaims, ClaimsValidator, RefreshClaims, TokenIssuer, TokenPair};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserDirectory;
pub use infra::redis::RedisPendingStore;
pub use infra::smtp::{MailSettings, SmtpCodeMailer};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
