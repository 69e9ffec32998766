//! SMTP Code Mailer Implementation
//!
//! Delivers verification codes over async SMTP. When no host is
//! configured the mailer runs in no-op mode and only logs, which is what
//! local development wants.

use lettre::message::{header::ContentType, Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::sync::Arc;

use crate::domain::repository::CodeMailer;
use crate::domain::value_object::{Email, OtpCode};
use crate::error::{AuthError, AuthResult};

/// SMTP connection settings
#[derive(Debug, Clone, Default)]
pub struct MailSettings {
    /// SMTP relay host; empty means no-op mode
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    /// From address, e.g. `Storefront <no-reply@example.com>`
    pub smtp_from: String,
    pub use_starttls: bool,
}

/// Async SMTP transport wrapper (or no-op)
#[derive(Clone)]
pub struct SmtpCodeMailer {
    transport: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,
    from: Mailbox,
}

impl SmtpCodeMailer {
    /// Build the mailer from settings.
    ///
    /// An empty SMTP host yields a mailer that logs instead of sending.
    pub fn new(settings: &MailSettings) -> AuthResult<Self> {
        let from = settings
            .smtp_from
            .parse::<Mailbox>()
            .map_err(|e| AuthError::Internal(format!("Invalid SMTP from address: {e}")))?;

        let transport = if settings.smtp_host.trim().is_empty() {
            tracing::warn!("SMTP host not configured; codes will only be logged");
            None
        } else {
            let builder = if settings.use_starttls {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_host)
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.smtp_host)
            }
            .map_err(|e| AuthError::Internal(format!("Failed to configure SMTP transport: {e}")))?
            .port(settings.smtp_port);

            let builder = if let (Some(username), Some(password)) =
                (&settings.smtp_username, &settings.smtp_password)
            {
                builder.credentials(Credentials::new(username.to_string(), password.to_string()))
            } else {
                builder
            };

            Some(Arc::new(builder.build()))
        };

        Ok(Self { transport, from })
    }

    /// Check if SMTP transport is enabled
    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    async fn send(&self, to: &Email, subject: &str, body: String) -> AuthResult<()> {
        let Some(transport) = &self.transport else {
            tracing::info!(email = %to.masked(), subject, "No-op mailer: skipping dispatch");
            return Ok(());
        };

        let to_mailbox = to
            .as_str()
            .parse::<Mailbox>()
            .map_err(|e| AuthError::Mail(format!("invalid recipient: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AuthError::Mail(format!("build message: {e}")))?;

        transport
            .send(message)
            .await
            .map_err(|e| AuthError::Mail(format!("smtp send: {e}")))?;

        tracing::debug!(email = %to.masked(), subject, "Verification mail sent");

        Ok(())
    }
}

impl CodeMailer for SmtpCodeMailer {
    async fn send_registration_code(&self, email: &Email, code: &OtpCode) -> AuthResult<()> {
        let body = format!(
            "Welcome!\n\nYour verification code is: {code}\n\nThe code expires shortly. If you did not request this, please ignore this email.",
        );
        self.send(email, "Verify your email address", body).await
    }

    async fn send_reset_code(&self, email: &Email, code: &OtpCode) -> AuthResult<()> {
        let body = format!(
            "We received a password reset request for your account.\n\nYour reset code is: {code}\n\nThe code expires shortly. If you did not request this, you can safely ignore this email.",
        );
        self.send(email, "Password reset code", body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mailer_noop_without_host() {
        let settings = MailSettings {
            smtp_from: "Storefront <no-reply@localhost.localdomain>".to_string(),
            ..Default::default()
        };
        let mailer = SmtpCodeMailer::new(&settings).unwrap();
        assert!(!mailer.is_enabled());
    }

    #[tokio::test]
    async fn test_mailer_enabled_with_host() {
        let settings = MailSettings {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_from: "Storefront <no-reply@example.com>".to_string(),
            use_starttls: true,
            ..Default::default()
        };
        let mailer = SmtpCodeMailer::new(&settings).unwrap();
        assert!(mailer.is_enabled());
    }
}
