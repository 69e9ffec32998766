//! One-Time Verification Code Generation
//!
//! Fixed-width numeric codes used to prove control of an email address.
//! Codes are drawn from the thread-local CSPRNG (`ThreadRng`), which is
//! seeded from OS entropy once and periodically reseeded in the
//! background, never per call. Generation itself cannot fail; an
//! unavailable entropy source is a process-fatal condition, not a
//! per-call error.

use rand::Rng;

/// Number of digits in a verification code
pub const CODE_LENGTH: usize = 6;

/// Generate a zero-padded numeric verification code
///
/// ## Examples
/// ```
/// let code = platform::otp::generate_code();
/// assert_eq!(code.len(), platform::otp::CODE_LENGTH);
/// assert!(code.chars().all(|c| c.is_ascii_digit()));
/// ```
pub fn generate_code() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{:0width$}", n, width = CODE_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_fixed_width() {
        for _ in 0..256 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_codes_are_not_constant() {
        let first = generate_code();
        let varied = (0..64).map(|_| generate_code()).any(|c| c != first);
        assert!(varied, "64 draws should not all produce the same code");
    }

    #[test]
    fn test_zero_padding() {
        // Directly check the formatting path used for small draws.
        let formatted = format!("{:0width$}", 42u32, width = CODE_LENGTH);
        assert_eq!(formatted, "000042");
    }
}
