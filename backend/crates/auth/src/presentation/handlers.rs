//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{ClaimsValidator, TokenIssuer};
use crate::application::{
    ForgotPasswordUseCase, LoginInput, LoginUseCase, RefreshTokenUseCase, RegisterInput,
    RegisterUseCase, ResetPasswordInput, ResetPasswordUseCase, VerifyEmailInput,
    VerifyEmailUseCase,
};
use crate::domain::repository::{CodeMailer, PendingStore, UserDirectory};
use crate::error::AuthResult;
use crate::presentation::dto::{
    ForgotPasswordRequest, ForgotPasswordResponse, IdentityResponse, LoginRequest, LoginResponse,
    RefreshResponse, RegisterRequest, RegisterResponse, ResetPasswordRequest, VerifyRequest,
    VerifyResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<D, P, M>
where
    D: UserDirectory + Send + Sync + 'static,
    P: PendingStore + Send + Sync + 'static,
    M: CodeMailer + Send + Sync + 'static,
{
    pub directory: Arc<D>,
    pub pending: Arc<P>,
    pub mailer: Arc<M>,
    pub issuer: Arc<TokenIssuer>,
    pub validator: Arc<ClaimsValidator>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<D, P, M>(
    State(state): State<AuthAppState<D, P, M>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<Json<RegisterResponse>>
where
    D: UserDirectory + Send + Sync + 'static,
    P: PendingStore + Send + Sync + 'static,
    M: CodeMailer + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.directory.clone(),
        state.pending.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(RegisterInput {
            email: req.email,
            password: req.password,
            display_name: req.display_name,
        })
        .await?;

    Ok(Json(RegisterResponse {
        email: output.email.as_str().to_string(),
        expires_in_secs: output.expires_in_secs,
    }))
}

// ============================================================================
// Verify
// ============================================================================

/// POST /api/auth/verify
pub async fn verify<D, P, M>(
    State(state): State<AuthAppState<D, P, M>>,
    Json(req): Json<VerifyRequest>,
) -> AuthResult<(StatusCode, Json<VerifyResponse>)>
where
    D: UserDirectory + Send + Sync + 'static,
    P: PendingStore + Send + Sync + 'static,
    M: CodeMailer + Send + Sync + 'static,
{
    let use_case = VerifyEmailUseCase::new(
        state.directory.clone(),
        state.pending.clone(),
        state.issuer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(VerifyEmailInput {
            email: req.email,
            code: req.code,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(VerifyResponse {
            identity: IdentityResponse::from_identity(&output.identity),
            access_token: output.tokens.access,
            refresh_token: output.tokens.refresh,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<D, P, M>(
    State(state): State<AuthAppState<D, P, M>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    D: UserDirectory + Send + Sync + 'static,
    P: PendingStore + Send + Sync + 'static,
    M: CodeMailer + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.directory.clone(),
        state.issuer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        identity: IdentityResponse::from_identity(&output.identity),
        access_token: output.tokens.access,
        refresh_token: output.tokens.refresh,
    }))
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /api/auth/forgot-password
pub async fn forgot_password<D, P, M>(
    State(state): State<AuthAppState<D, P, M>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AuthResult<Json<ForgotPasswordResponse>>
where
    D: UserDirectory + Send + Sync + 'static,
    P: PendingStore + Send + Sync + 'static,
    M: CodeMailer + Send + Sync + 'static,
{
    let use_case = ForgotPasswordUseCase::new(
        state.directory.clone(),
        state.pending.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(req.email).await?;

    Ok(Json(ForgotPasswordResponse {
        email: output.email.as_str().to_string(),
        expires_in_secs: output.expires_in_secs,
    }))
}

/// POST /api/auth/verify-forgot-password
pub async fn reset_password<D, P, M>(
    State(state): State<AuthAppState<D, P, M>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AuthResult<StatusCode>
where
    D: UserDirectory + Send + Sync + 'static,
    P: PendingStore + Send + Sync + 'static,
    M: CodeMailer + Send + Sync + 'static,
{
    let use_case = ResetPasswordUseCase::new(
        state.directory.clone(),
        state.pending.clone(),
        state.config.clone(),
    );

    use_case
        .execute(ResetPasswordInput {
            email: req.email,
            code: req.code,
            new_password: req.new_password,
        })
        .await?;

    Ok(StatusCode::CREATED)
}

// ============================================================================
// Refresh
// ============================================================================

/// GET /api/auth/token/{refresh}
pub async fn refresh_token<D, P, M>(
    State(state): State<AuthAppState<D, P, M>>,
    Path(refresh): Path<String>,
) -> AuthResult<(StatusCode, Json<RefreshResponse>)>
where
    D: UserDirectory + Send + Sync + 'static,
    P: PendingStore + Send + Sync + 'static,
    M: CodeMailer + Send + Sync + 'static,
{
    let use_case = RefreshTokenUseCase::new(
        state.directory.clone(),
        state.issuer.clone(),
        state.validator.clone(),
    );

    let output = use_case.execute(&refresh).await?;

    Ok((
        StatusCode::CREATED,
        Json(RefreshResponse {
            access_token: output.tokens.access,
            refresh_token: output.tokens.refresh,
        }),
    ))
}
