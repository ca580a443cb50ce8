//! Outbound email
//!
//! A thin abstraction over [lettre](https://lettre.rs): handlers hand a
//! rendered [`OutgoingEmail`] to a [`MailTransport`], which is injected
//! through application state so tests can swap in a recording transport.
//!
//! # Environment Variables
//!
//! [`SmtpMailer::from_config`] is driven by [`crate::config::MailConfig`]:
//!
//! | Variable | Required | Description |
//! |----------|----------|-------------|
//! | `SMTP_HOST` | Yes | SMTP server hostname |
//! | `SMTP_PORT` | No | Port (default: 587) |
//! | `SMTP_USER` | No | Username for authentication |
//! | `SMTP_PASSWORD` | No | Password for authentication |
//! | `SMTP_TLS` | No | `starttls` (default), `tls`, or `none` |
//! | `FROM_EMAIL` | No | Sender address (default: `SMTP_USER`) |
//! | `FROM_NAME` | No | Sender display name (default: `SLJ Solutions`) |

#[cfg(test)]
pub(crate) mod memory;
mod smtp;
pub mod templates;

pub use smtp::SmtpMailer;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),

    #[error("mail transport timed out after {0:?}")]
    Timeout(Duration),
}

/// A fully rendered email, ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Anything that can deliver an [`OutgoingEmail`].
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}
