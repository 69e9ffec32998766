//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod forgot_password;
pub mod login;
pub mod refresh;
pub mod register;
pub mod reset_password;
pub mod token;
pub mod verify_email;

// Re-exports
pub use config::AuthConfig;
pub use forgot_password::{ForgotPasswordOutput, ForgotPasswordUseCase};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use refresh::{RefreshOutput, RefreshTokenUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use reset_password::{ResetPasswordInput, ResetPasswordUseCase};
pub use token::{
    AccessClaims, ClaimsValidator, RefreshClaims, TokenIssuer, TokenPair,
};
pub use verify_email::{VerifyEmailInput, VerifyEmailOutput, VerifyEmailUseCase};
