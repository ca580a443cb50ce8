//! Enquiry models and validation
//!
//! One request schema serves every form on the site. Fields the forms
//! disagree on (message, project type, subject) are optional here and
//! resolved into a normalized [`Enquiry`] by [`EnquiryRequest::validated`].

use crate::error::{validation_error, AppError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// Basic `local@domain.tld` shape check shared by the server and the form client.
pub static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

/// Subject value sent by the brochure download form.
pub const BROCHURE_SUBJECT: &str = "Brochure Download Request";

/// Message used when a submission carries neither a message nor a project type.
pub const DEFAULT_MESSAGE: &str = "Enquiry from website form";

/// Returns true when `email` has the basic `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Enquiry submission as received on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryRequest {
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(length(max = 254, message = "Email must be at most 254 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[validate(length(max = 40, message = "Phone must be at most 40 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[validate(length(max = 5000, message = "Message must be at most 5000 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,

    #[validate(length(max = 200, message = "Subject must be at most 200 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Kind of project the enquiry is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Residential,
    Commercial,
    Turnkey,
    Corporate,
    Modular,
    Renovation,
    Other,
}

impl ProjectType {
    pub const ALL: [ProjectType; 7] = [
        ProjectType::Residential,
        ProjectType::Commercial,
        ProjectType::Turnkey,
        ProjectType::Corporate,
        ProjectType::Modular,
        ProjectType::Renovation,
        ProjectType::Other,
    ];

    /// Wire value, as sent by the forms
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Residential => "residential",
            ProjectType::Commercial => "commercial",
            ProjectType::Turnkey => "turnkey",
            ProjectType::Corporate => "corporate",
            ProjectType::Modular => "modular",
            ProjectType::Renovation => "renovation",
            ProjectType::Other => "other",
        }
    }

    /// Human-readable label shown in the quote form and in emails
    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::Residential => "Residential Interior Design",
            ProjectType::Commercial => "Commercial Interior Design",
            ProjectType::Turnkey => "Turnkey Interior Solutions",
            ProjectType::Corporate => "Corporate Interiors",
            ProjectType::Modular => "Modular Kitchen & Wardrobes",
            ProjectType::Renovation => "Renovation & Upgrades",
            ProjectType::Other => "Other",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ProjectType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| validation_error("Invalid project type"))
    }
}

/// Which admin notification an enquiry produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnquiryKind {
    General,
    BrochureDownload,
}

impl EnquiryKind {
    pub fn from_subject(subject: Option<&str>) -> Self {
        match subject {
            Some(BROCHURE_SUBJECT) => EnquiryKind::BrochureDownload,
            _ => EnquiryKind::General,
        }
    }
}

/// A validated, normalized enquiry ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Enquiry {
    /// Reference id quoted in logs and in the admin email
    pub reference: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub project_type: Option<ProjectType>,
    pub kind: EnquiryKind,
}

impl EnquiryRequest {
    /// Validate the submission and normalize it into an [`Enquiry`].
    ///
    /// Checks run in a fixed order: required fields, email format,
    /// project type, then field lengths.
    pub fn validated(self) -> Result<Enquiry, AppError> {
        let name = non_blank(self.name.as_deref());
        // The address is checked as sent; stray whitespace fails the format check.
        let email = self.email.clone().filter(|e| !e.trim().is_empty());

        let mut missing = Vec::new();
        if name.is_none() {
            missing.push("name");
        }
        if email.is_none() {
            missing.push("email");
        }
        if !missing.is_empty() {
            return Err(validation_error(missing_fields_message(&missing)));
        }
        let (name, email) = (name.unwrap_or_default(), email.unwrap_or_default());

        if !is_valid_email(&email) {
            return Err(validation_error("Invalid email format"));
        }

        let project_type = non_blank(self.project_type.as_deref())
            .map(|raw| raw.parse::<ProjectType>())
            .transpose()?;

        self.validate()
            .map_err(|errors| validation_error(first_error_message(&errors)))?;

        let message = non_blank(self.message.as_deref()).unwrap_or_else(|| match project_type {
            Some(t) => format!("Enquiry for {}", t.label()),
            None => DEFAULT_MESSAGE.to_string(),
        });

        Ok(Enquiry {
            reference: Uuid::new_v4(),
            name,
            email,
            phone: non_blank(self.phone.as_deref()),
            message,
            project_type,
            kind: EnquiryKind::from_subject(self.subject.as_deref()),
        })
    }
}

/// Build "Name is required" / "Name and email are required" /
/// "Name, email, and message are required".
pub fn missing_fields_message(fields: &[&str]) -> String {
    let mut names: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
    if let Some(first) = names.first_mut() {
        let mut chars = first.chars();
        let capitalized: String = match chars.next() {
            Some(c) => c.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        *first = capitalized;
    }

    match names.len() {
        0 => "Required fields are missing".to_string(),
        1 => format!("{} is required", names[0]),
        2 => format!("{} and {} are required", names[0], names[1]),
        n => format!("{}, and {} are required", names[..n - 1].join(", "), names[n - 1]),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn first_error_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().collect();
    fields.sort();

    fields
        .into_iter()
        .filter_map(|field| field_errors.get(field))
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid enquiry".to_string())
}
