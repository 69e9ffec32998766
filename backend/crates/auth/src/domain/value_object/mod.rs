//! Value Objects

pub mod email;
pub mod otp_code;
pub mod role;

pub use email::Email;
pub use otp_code::OtpCode;
pub use role::Role;
