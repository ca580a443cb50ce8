//! Enquiry form state machine
//!
//! Each submission moves `Idle → Submitting → Submitted | Failed`.
//! `Submitting` is the only double-submit guard and it is advisory: it
//! gates this form, not the network.

use super::{ClientError, EnquiryClient};
use crate::models::{is_valid_email, missing_fields_message, EnquiryRequest, ProjectType, BROCHURE_SUBJECT};
use tracing::{debug, warn};

/// Default message sent by the quote form when the user leaves it blank
pub const QUOTE_DEFAULT_MESSAGE: &str = "Enquiry from website modal form";

/// Message sent with every brochure download
pub const BROCHURE_MESSAGE: &str = "Downloaded SLJ Solutions Brochure";

/// Dial code preselected by the brochure form
pub const DEFAULT_COUNTRY_CODE: &str = "+91";

/// Dial codes offered by the brochure form
pub const COUNTRY_CODES: [(&str, &str); 10] = [
    ("+91", "India"),
    ("+1", "USA/Canada"),
    ("+44", "UK"),
    ("+971", "UAE"),
    ("+966", "Saudi Arabia"),
    ("+65", "Singapore"),
    ("+61", "Australia"),
    ("+92", "Pakistan"),
    ("+880", "Bangladesh"),
    ("+977", "Nepal"),
];

/// The forms on the site that post enquiries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormVariant {
    /// Contact page: message required, project type optional
    Contact,
    /// "Get Free Quote" modal: project type required, message optional
    Quote,
    /// Brochure download: name, phone and email only
    Brochure,
}

impl FormVariant {
    fn required_fields(&self) -> &'static [&'static str] {
        match self {
            FormVariant::Contact => &["name", "email", "phone", "message"],
            FormVariant::Quote => &["name", "email", "phone", "project type"],
            FormVariant::Brochure => &["name", "email", "phone"],
        }
    }
}

/// Raw field values as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    /// Wire value of the selected project type, empty when none
    pub project_type: String,
    /// Dial code prefixed to the phone number by the brochure form
    pub country_code: String,
}

impl FormFields {
    pub fn initial(variant: FormVariant) -> Self {
        match variant {
            FormVariant::Brochure => Self {
                country_code: DEFAULT_COUNTRY_CODE.to_string(),
                ..Self::default()
            },
            _ => Self::default(),
        }
    }

    fn value(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            "email" => &self.email,
            "phone" => &self.phone,
            "message" => &self.message,
            "project type" => &self.project_type,
            _ => "",
        }
    }
}

/// Where a submission stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Submitted { message: String },
    Failed { error: String },
}

/// One form instance and its submission state
#[derive(Debug, Clone)]
pub struct EnquiryForm {
    variant: FormVariant,
    fields: FormFields,
    state: FormState,
}

impl EnquiryForm {
    pub fn new(variant: FormVariant) -> Self {
        Self {
            variant,
            fields: FormFields::initial(variant),
            state: FormState::Idle,
        }
    }

    pub fn variant(&self) -> FormVariant {
        self.variant
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Fields are editable while idle or after a failure.
    pub fn fields_mut(&mut self) -> Option<&mut FormFields> {
        match self.state {
            FormState::Idle | FormState::Failed { .. } => Some(&mut self.fields),
            FormState::Submitting | FormState::Submitted { .. } => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    /// Enter `Submitting` and return the request to post.
    ///
    /// Refused with [`ClientError::Busy`] unless the form is `Idle` or
    /// `Failed`. A failed local check moves the form to `Failed` without
    /// touching the network.
    pub fn begin_submit(&mut self) -> Result<EnquiryRequest, ClientError> {
        if !matches!(self.state, FormState::Idle | FormState::Failed { .. }) {
            return Err(ClientError::Busy);
        }

        if let Err(e) = self.precheck() {
            self.state = FormState::Failed { error: e.user_message() };
            return Err(e);
        }

        self.state = FormState::Submitting;
        Ok(self.to_request())
    }

    /// Record the outcome of the request started by [`begin_submit`](Self::begin_submit).
    ///
    /// Ignored unless the form is `Submitting`.
    pub fn complete(&mut self, outcome: Result<String, ClientError>) {
        if self.state != FormState::Submitting {
            return;
        }

        self.state = match outcome {
            Ok(message) => FormState::Submitted { message },
            Err(e) => {
                warn!("Enquiry submission failed: {}", e);
                FormState::Failed { error: e.user_message() }
            }
        };
    }

    /// Clear every field and return to `Idle`.
    pub fn reset(&mut self) {
        self.fields = FormFields::initial(self.variant);
        self.state = FormState::Idle;
    }

    /// Validate, post and record the outcome in one step.
    pub async fn submit(&mut self, client: &EnquiryClient) -> &FormState {
        match self.begin_submit() {
            Ok(request) => {
                debug!("Submitting {:?} enquiry to {}", self.variant, client.endpoint());
                let outcome = client.submit(&request).await;
                self.complete(outcome);
            }
            Err(e) => debug!("Enquiry not sent: {}", e),
        }
        &self.state
    }

    fn precheck(&self) -> Result<(), ClientError> {
        let missing: Vec<&str> = self
            .variant
            .required_fields()
            .iter()
            .copied()
            .filter(|field| self.fields.value(field).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(ClientError::Validation(missing_fields_message(&missing)));
        }

        if !is_valid_email(self.fields.email.trim()) {
            return Err(ClientError::Validation("Invalid email format".to_string()));
        }

        let project_type = self.fields.project_type.trim();
        if !project_type.is_empty() && project_type.parse::<ProjectType>().is_err() {
            return Err(ClientError::Validation("Invalid project type".to_string()));
        }

        Ok(())
    }

    fn to_request(&self) -> EnquiryRequest {
        let f = &self.fields;

        let base = EnquiryRequest {
            name: optional(&f.name),
            email: optional(&f.email),
            phone: optional(&f.phone),
            ..Default::default()
        };

        match self.variant {
            FormVariant::Contact => EnquiryRequest {
                message: optional(&f.message),
                project_type: optional(&f.project_type),
                ..base
            },
            FormVariant::Quote => EnquiryRequest {
                message: Some(optional(&f.message).unwrap_or_else(|| QUOTE_DEFAULT_MESSAGE.to_string())),
                project_type: optional(&f.project_type),
                ..base
            },
            FormVariant::Brochure => EnquiryRequest {
                phone: optional(&format!("{} {}", f.country_code.trim(), f.phone.trim())),
                message: Some(BROCHURE_MESSAGE.to_string()),
                subject: Some(BROCHURE_SUBJECT.to_string()),
                ..base
            },
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
