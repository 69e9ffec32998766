//! Password Hashing and Verification
//!
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of sensitive data
//! - Constant-time comparison via the hash function itself
//!
//! Plaintext passwords only exist wrapped in [`PlainPassword`], which is
//! erased from memory on drop and redacted in `Debug` output. Verification
//! never errors: a malformed stored hash is treated as a mismatch.

use std::fmt;

use argon2::{Argon2, PasswordHash as PhcHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in Unicode code points
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in Unicode code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password contains invalid characters (control characters)
    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    /// Password is missing a required character class
    #[error("Password must contain at least one letter and one digit")]
    MissingCharacterClass,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Plain Password (Zeroized on drop)
// ============================================================================

/// Plaintext password with automatic memory zeroization
///
/// Does not implement `Clone` to prevent accidental copies.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PlainPassword(String);

impl PlainPassword {
    /// Create a new plaintext password with policy validation
    ///
    /// Policy:
    /// - 8 to 128 Unicode code points (counted after NFKC normalization)
    /// - No control characters
    /// - At least one letter and one digit
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        for ch in normalized.chars() {
            if ch.is_control() && ch != ' ' && ch != '\t' {
                return Err(PasswordPolicyError::InvalidCharacter);
            }
        }

        let has_letter = normalized.chars().any(|c| c.is_alphabetic());
        let has_digit = normalized.chars().any(|c| c.is_ascii_digit());
        if !has_letter || !has_digit {
            return Err(PasswordPolicyError::MissingCharacterClass);
        }

        Ok(Self(normalized))
    }

    /// Create without validation (for already-validated input)
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password using Argon2id
    ///
    /// ## Arguments
    /// * `pepper` - Optional application-wide secret mixed into the input
    ///
    /// ## Returns
    /// PHC-formatted hash string wrapped in [`PasswordHash`]
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<PasswordHash, PasswordHashError> {
        let password_bytes = peppered(self.as_bytes(), pepper);

        let salt = SaltString::generate(OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(&password_bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(PasswordHash {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Password Hash (Safe to store)
// ============================================================================

/// Password hash in PHC string format
///
/// The PHC string embeds the algorithm, parameters, and salt, so the
/// stored value alone is enough to verify later attempts.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    hash: String,
}

impl PasswordHash {
    /// Create from PHC string (e.g., from the user directory)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        PhcHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Returns `false` on any mismatch, including a malformed stored hash.
    /// Argon2 performs the comparison in constant time internally.
    pub fn verify(&self, password: &PlainPassword, pepper: Option<&[u8]>) -> bool {
        let password_bytes = peppered(password.as_bytes(), pepper);

        let parsed_hash = match PhcHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(&password_bytes, &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHash").field("hash", &"[HASH]").finish()
    }
}

fn peppered(password: &[u8], pepper: Option<&[u8]>) -> Vec<u8> {
    match pepper {
        Some(p) => {
            let mut combined = password.to_vec();
            combined.extend_from_slice(p);
            combined
        }
        None => password.to_vec(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_too_short() {
        let result = PlainPassword::new("sh0rt".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::TooShort { .. })));
    }

    #[test]
    fn test_password_too_long() {
        let long_password = format!("a1{}", "a".repeat(MAX_PASSWORD_LENGTH));
        let result = PlainPassword::new(long_password);
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_empty() {
        let result = PlainPassword::new("".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::EmptyOrWhitespace)));
    }

    #[test]
    fn test_password_whitespace_only() {
        let result = PlainPassword::new("        ".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::EmptyOrWhitespace)));
    }

    #[test]
    fn test_password_missing_character_class() {
        let result = PlainPassword::new("onlyletters".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::MissingCharacterClass)
        ));

        let result = PlainPassword::new("1234567890".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::MissingCharacterClass)
        ));
    }

    #[test]
    fn test_valid_password() {
        assert!(PlainPassword::new("Str0ngP@ss1".to_string()).is_ok());
        assert!(PlainPassword::new("correct horse battery 9".to_string()).is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let password = PlainPassword::new_unchecked("TestPassword123".to_string());
        let hashed = password.hash(None).unwrap();

        assert!(hashed.verify(&password, None));

        let wrong_password = PlainPassword::new_unchecked("WrongPassword123".to_string());
        assert!(!hashed.verify(&wrong_password, None));
    }

    #[test]
    fn test_hash_with_pepper() {
        let password = PlainPassword::new_unchecked("TestPassword123".to_string());
        let pepper = b"storefront_pepper";
        let hashed = password.hash(Some(pepper)).unwrap();

        assert!(hashed.verify(&password, Some(pepper)));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&password, Some(b"wrong_pepper")));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let password = PlainPassword::new_unchecked("TestPassword123".to_string());
        let hashed = password.hash(None).unwrap();

        let phc_string = hashed.as_phc_string().to_string();
        let restored = PasswordHash::from_phc_string(phc_string).unwrap();

        assert!(restored.verify(&password, None));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(PasswordHash::from_phc_string("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_verify_never_panics_on_garbage_hash() {
        // A hash that bypassed from_phc_string validation must still
        // verify to false, never error.
        let garbage = PasswordHash {
            hash: "$argon2id$garbage".to_string(),
        };
        let password = PlainPassword::new_unchecked("TestPassword123".to_string());
        assert!(!garbage.verify(&password, None));
    }

    #[test]
    fn test_debug_redaction() {
        let password = PlainPassword::new_unchecked("secret12".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret12"));
    }
}
