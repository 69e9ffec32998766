//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, constant-time verification)
//! - One-time verification code generation

pub mod otp;
pub mod password;
