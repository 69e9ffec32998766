//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::identity::Identity;

// ============================================================================
// Register
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// Registration acknowledgement
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub email: String,
    /// Seconds before the mailed code expires
    pub expires_in_secs: u64,
}

// ============================================================================
// Verify
// ============================================================================

/// Email verification request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

/// Public identity profile
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    pub identity_id: String,
    pub email: String,
    pub role: String,
    pub display_name: Option<String>,
}

impl IdentityResponse {
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            identity_id: identity.identity_id.to_string(),
            email: identity.email.as_str().to_string(),
            role: identity.role.code().to_string(),
            display_name: identity.display_name.clone(),
        }
    }
}

/// Verification response (first session)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub identity: IdentityResponse,
    pub access_token: String,
    pub refresh_token: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub identity: IdentityResponse,
    pub access_token: String,
    pub refresh_token: String,
}

// ============================================================================
// Password Reset
// ============================================================================

/// Forgot password request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Forgot password acknowledgement
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordResponse {
    pub email: String,
    pub expires_in_secs: u64,
}

/// Reset confirmation request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

// ============================================================================
// Refresh
// ============================================================================

/// Refresh response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
}
