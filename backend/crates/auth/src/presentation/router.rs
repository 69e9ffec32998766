//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{ClaimsValidator, TokenIssuer};
use crate::domain::repository::{CodeMailer, PendingStore, UserDirectory};
use crate::error::AuthResult;
use crate::infra::postgres::PgUserDirectory;
use crate::infra::redis::RedisPendingStore;
use crate::infra::smtp::SmtpCodeMailer;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with the production adapters
pub fn auth_router(
    directory: PgUserDirectory,
    pending: RedisPendingStore,
    mailer: SmtpCodeMailer,
    config: AuthConfig,
) -> AuthResult<Router> {
    auth_router_generic(directory, pending, mailer, config)
}

/// Create a generic Auth router for any set of adapters
pub fn auth_router_generic<D, P, M>(
    directory: D,
    pending: P,
    mailer: M,
    config: AuthConfig,
) -> AuthResult<Router>
where
    D: UserDirectory + Clone + Send + Sync + 'static,
    P: PendingStore + Clone + Send + Sync + 'static,
    M: CodeMailer + Clone + Send + Sync + 'static,
{
    let issuer = Arc::new(TokenIssuer::new(&config)?);
    let validator = Arc::new(ClaimsValidator::new(&config));

    let state = AuthAppState {
        directory: Arc::new(directory),
        pending: Arc::new(pending),
        mailer: Arc::new(mailer),
        issuer,
        validator,
        config: Arc::new(config),
    };

    Ok(Router::new()
        .route("/register", post(handlers::register::<D, P, M>))
        .route("/verify", post(handlers::verify::<D, P, M>))
        .route("/login", post(handlers::login::<D, P, M>))
        .route("/forgot-password", post(handlers::forgot_password::<D, P, M>))
        .route(
            "/verify-forgot-password",
            post(handlers::reset_password::<D, P, M>),
        )
        .route("/token/{refresh}", get(handlers::refresh_token::<D, P, M>))
        .with_state(state))
}
