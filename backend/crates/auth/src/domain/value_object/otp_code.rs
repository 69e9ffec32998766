//! OTP Code Value Object
//!
//! A fixed-width numeric verification code. Always either freshly drawn
//! from the platform generator or parsed from untrusted input, never
//! constructed from arbitrary strings.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// One-time verification code (6 zero-padded digits)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OtpCode(String);

impl OtpCode {
    /// Draw a fresh random code
    pub fn generate() -> Self {
        Self(platform::otp::generate_code())
    }

    /// Parse a code supplied by a client
    pub fn parse(raw: &str) -> AppResult<Self> {
        let code = raw.trim();

        if code.len() != platform::otp::CODE_LENGTH
            || !code.chars().all(|c| c.is_ascii_digit())
        {
            return Err(AppError::bad_request("Invalid verification code format"));
        }

        Ok(Self(code.to_string()))
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OtpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_parses() {
        let code = OtpCode::generate();
        let parsed = OtpCode::parse(code.as_str()).unwrap();
        assert_eq!(parsed, code);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let code = OtpCode::parse(" 042317 ").unwrap();
        assert_eq!(code.as_str(), "042317");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(OtpCode::parse("").is_err());
        assert!(OtpCode::parse("12345").is_err());
        assert!(OtpCode::parse("1234567").is_err());
        assert!(OtpCode::parse("12a456").is_err());
        assert!(OtpCode::parse("one two").is_err());
    }
}
