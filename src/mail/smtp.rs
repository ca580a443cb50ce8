//! SMTP transport backed by lettre

use super::{MailError, MailTransport, OutgoingEmail};
use crate::config::{MailConfig, SmtpSecurity};
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info, warn};

/// Sends mail through an SMTP relay.
///
/// The underlying transport keeps its own connection pool, so one
/// instance is shared by every request.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let builder = match config.security {
            SmtpSecurity::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                .map_err(|e| MailError::Smtp(e.to_string()))?,
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .map_err(|e| MailError::Smtp(e.to_string()))?,
            SmtpSecurity::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host),
        };

        let mut builder = builder.port(config.smtp_port).timeout(Some(config.timeout));

        if let (Some(user), Some(password)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        let from = Mailbox::new(Some(config.from_name.clone()), parse_address(&config.from_email)?);
        parse_address(&config.admin_email)?;

        info!(
            "📮 SMTP relay configured: {}:{} ({:?})",
            config.smtp_host, config.smtp_port, config.security
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(Mailbox::new(None, parse_address(&email.to)?))
            .subject(email.subject.clone());

        // Reply-To is a convenience; an address lettre cannot parse must not block delivery.
        if let Some(reply_to) = &email.reply_to {
            match parse_address(reply_to) {
                Ok(address) => builder = builder.reply_to(Mailbox::new(None, address)),
                Err(e) => warn!("Sending to {} without Reply-To: {}", email.to, e),
            }
        }

        builder
            .multipart(MultiPart::alternative_plain_html(email.text.clone(), email.html.clone()))
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = self.build_message(email)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        debug!("SMTP accepted message for {} (code {})", email.to, response.code());
        Ok(())
    }
}

fn parse_address(raw: &str) -> Result<Address, MailError> {
    raw.trim()
        .parse::<Address>()
        .map_err(|_| MailError::InvalidAddress(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mailer() -> SmtpMailer {
        let config = MailConfig {
            smtp_host: "localhost".to_string(),
            security: SmtpSecurity::None,
            from_email: "site@sljsolutions.com".to_string(),
            ..Default::default()
        };
        SmtpMailer::from_config(&config).unwrap()
    }

    fn email(to: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: to.to_string(),
            reply_to: Some("asha@example.com".to_string()),
            subject: "Hello".to_string(),
            text: "plain".to_string(),
            html: "<p>html</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_build_message_sets_headers() {
        let message = mailer().build_message(&email("admin@sljsolutions.com")).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("SLJ Solutions"));
        assert!(raw.contains("<site@sljsolutions.com>"));
        assert!(raw.contains("To: admin@sljsolutions.com"));
        assert!(raw.contains("Reply-To: asha@example.com"));
        assert!(raw.contains("multipart/alternative"));
    }

    #[tokio::test]
    async fn test_unparseable_reply_to_is_dropped() {
        for reply_to in ["a,b@example.com", "a..b@example.com", "a<b>@example.com"] {
            let mut admin = email("admin@sljsolutions.com");
            admin.reply_to = Some(reply_to.to_string());

            let message = mailer().build_message(&admin).unwrap();
            let raw = String::from_utf8(message.formatted()).unwrap();

            assert!(raw.contains("To: admin@sljsolutions.com"), "reply-to {}", reply_to);
            assert!(!raw.contains("Reply-To:"), "reply-to {}", reply_to);
        }
    }

    #[tokio::test]
    async fn test_invalid_recipient_is_rejected() {
        let result = mailer().build_message(&email("not an address"));
        assert!(matches!(result, Err(MailError::InvalidAddress(_))));
    }

    #[test]
    fn test_invalid_from_address() {
        let config = MailConfig {
            security: SmtpSecurity::None,
            from_email: "nope".to_string(),
            ..Default::default()
        };
        assert!(matches!(SmtpMailer::from_config(&config), Err(MailError::InvalidAddress(_))));
    }

    #[test]
    fn test_invalid_admin_address_fails_at_startup() {
        let config = MailConfig {
            security: SmtpSecurity::None,
            admin_email: "sales at sljsolutions".to_string(),
            ..Default::default()
        };
        let result = SmtpMailer::from_config(&config);
        assert!(matches!(result, Err(MailError::InvalidAddress(a)) if a == "sales at sljsolutions"));
    }
}
