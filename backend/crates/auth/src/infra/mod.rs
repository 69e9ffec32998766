//! Infrastructure Layer
//!
//! Database, cache, and mail transport implementations.

pub mod postgres;
pub mod redis;
pub mod smtp;

pub use postgres::PgUserDirectory;
pub use redis::RedisPendingStore;
pub use smtp::{MailSettings, SmtpCodeMailer};
