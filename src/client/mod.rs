//! Enquiry form client
//!
//! Front-end side of the enquiry flow: an HTTP client for `POST /api/contact`,
//! the per-submission form state machine, and the modal controller that lets
//! any part of a UI open the quote form.
//!
//! ```ignore
//! let client = EnquiryClient::new("https://sljsolutions.com")?;
//! let mut form = EnquiryForm::new(FormVariant::Contact);
//! if let Some(fields) = form.fields_mut() {
//!     fields.name = "Asha".into();
//!     // ...
//! }
//! match form.submit(&client).await {
//!     FormState::Submitted { message } => println!("{message}"),
//!     FormState::Failed { error } => eprintln!("{error}"),
//!     _ => {}
//! }
//! ```

mod form;
mod http;
mod modal;

pub use form::{EnquiryForm, FormFields, FormState, FormVariant, COUNTRY_CODES};
pub use http::{EnquiryClient, SubmissionResponse};
pub use modal::{EnquiryModal, ModalController};

use crate::error::GENERIC_FAILURE_MESSAGE;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned HTTP {status}")]
    Server { status: u16, message: Option<String> },

    #[error("submission was not accepted")]
    Rejected(Option<String>),

    #[error("unexpected response (HTTP {0})")]
    InvalidResponse(u16),

    #[error("{0}")]
    Validation(String),

    #[error("the form is not accepting submissions")]
    Busy,
}

impl ClientError {
    /// Text to show the user. Server-provided messages are passed through;
    /// transport and parse failures fall back to the generic message.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Server { message: Some(m), .. } | ClientError::Rejected(Some(m)) => m.clone(),
            ClientError::Validation(m) => m.clone(),
            ClientError::Busy => "Your enquiry is already being sent.".to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}
