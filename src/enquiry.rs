//! Enquiry submission service
//!
//! Validates a submission, renders the two emails and hands them to the
//! mail transport: the admin notification first, then the acknowledgement
//! to the person who enquired. Each dispatch is bounded by a timeout and
//! nothing is retried.
//!
//! If the acknowledgement fails after the admin notification went out, the
//! whole submission still fails. A user who then resubmits produces a second
//! admin notification, so admin delivery is at-least-once. The
//! [`DeliveryReport`] attached to the error says which dispatch failed.

use crate::config::Settings;
use crate::error::AppError;
use crate::mail::{templates, MailError, MailTransport, OutgoingEmail};
use crate::models::{Enquiry, EnquiryRequest};
use chrono::{Datelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Confirmation shown to the user after both emails are sent.
pub const SUCCESS_MESSAGE: &str =
    "Thank you! Your enquiry has been submitted successfully. Please check your email for confirmation.";

/// Outcome of a single dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Failed,
    Skipped,
}

/// Per-dispatch outcome of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReport {
    pub admin_notification: DeliveryStatus,
    pub acknowledgement: DeliveryStatus,
}

impl Default for DeliveryReport {
    fn default() -> Self {
        Self {
            admin_notification: DeliveryStatus::Skipped,
            acknowledgement: DeliveryStatus::Skipped,
        }
    }
}

/// Relays enquiries through the configured mail transport
pub struct EnquiryService {
    transport: Arc<dyn MailTransport>,
    admin_email: String,
    timeout: Duration,
    timezone: Tz,
    expose_details: bool,
}

impl EnquiryService {
    pub fn new(transport: Arc<dyn MailTransport>, settings: &Settings) -> Self {
        Self {
            transport,
            admin_email: settings.mail.admin_email.clone(),
            timeout: settings.mail.timeout,
            timezone: settings.mail.timezone,
            expose_details: settings.environment.exposes_error_details(),
        }
    }

    /// Validate and relay one enquiry.
    pub async fn submit(&self, request: EnquiryRequest) -> Result<(Enquiry, DeliveryReport), AppError> {
        let enquiry = request.validated()?;
        let received_at = Utc::now().with_timezone(&self.timezone);
        let mut delivery = DeliveryReport::default();

        info!(
            "📧 Enquiry {} received ({:?}, project type: {})",
            enquiry.reference,
            enquiry.kind,
            enquiry.project_type.map(|t| t.as_str()).unwrap_or("none")
        );

        let admin = templates::admin_notification(&enquiry, &received_at);
        let admin_email = OutgoingEmail {
            to: self.admin_email.clone(),
            reply_to: Some(enquiry.email.clone()),
            subject: admin.subject,
            text: admin.text,
            html: admin.html,
        };

        if let Err(e) = self.dispatch(&admin_email).await {
            delivery.admin_notification = DeliveryStatus::Failed;
            return Err(self.dispatch_failed(&enquiry, e, delivery));
        }
        delivery.admin_notification = DeliveryStatus::Sent;
        debug!("Admin notification for enquiry {} sent", enquiry.reference);

        let thanks = templates::thank_you(&enquiry.name, received_at.year());
        let user_email = OutgoingEmail {
            to: enquiry.email.clone(),
            reply_to: None,
            subject: thanks.subject,
            text: thanks.text,
            html: thanks.html,
        };

        if let Err(e) = self.dispatch(&user_email).await {
            delivery.acknowledgement = DeliveryStatus::Failed;
            warn!(
                "⚠️  Enquiry {} reached the admin but the acknowledgement failed",
                enquiry.reference
            );
            return Err(self.dispatch_failed(&enquiry, e, delivery));
        }
        delivery.acknowledgement = DeliveryStatus::Sent;

        info!("✅ Enquiry {} relayed", enquiry.reference);
        Ok((enquiry, delivery))
    }

    async fn dispatch(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        match tokio::time::timeout(self.timeout, self.transport.send(email)).await {
            Ok(result) => result,
            Err(_) => Err(MailError::Timeout(self.timeout)),
        }
    }

    fn dispatch_failed(&self, enquiry: &Enquiry, source: MailError, delivery: DeliveryReport) -> AppError {
        warn!("❌ Enquiry {} dispatch failed: {}", enquiry.reference, source);
        AppError::Dispatch {
            source,
            delivery,
            expose_details: self.expose_details,
        }
    }
}
