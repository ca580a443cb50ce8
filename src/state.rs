//! Application state management
//!
//! Contains shared state accessible across all handlers. Nothing here is
//! mutated after startup; every request is independent.

use crate::config::Settings;
use crate::enquiry::EnquiryService;
use crate::mail::MailTransport;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Enquiry relay (owns the mail transport)
    pub enquiries: EnquiryService,
}

impl AppState {
    pub fn new(transport: Arc<dyn MailTransport>, settings: &Settings) -> Self {
        Self {
            enquiries: EnquiryService::new(transport, settings),
        }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
