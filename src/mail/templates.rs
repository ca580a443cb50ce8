//! Email templates
//!
//! Renders the admin notification and the thank-you acknowledgement, each as
//! an HTML body with a plaintext mirror. User input is HTML-escaped before it
//! is embedded in markup.

use crate::models::{Enquiry, EnquiryKind};
use chrono::{DateTime, Datelike, TimeZone};
use std::fmt::Display;

pub const BRAND_NAME: &str = "SLJ Solutions";
pub const BRAND_TAGLINE: &str = "One Solution For All Needs";
pub const WEBSITE_URL: &str = "https://sljsolutions.com";
pub const SALES_EMAIL: &str = "sales@sljsolutions.com";
pub const PHONE_DISPLAY: &str = "+91 99535 51248";
pub const PHONE_TEL: &str = "+919953551248";
pub const ADDRESS: &str = "C-15/1, Street No. 7, Krishna Nagar, New Delhi - 110092";

const ACCENT: &str = "#ED2028";
const INK: &str = "#0a0a0a";

/// Subject, plaintext and HTML of one email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Subject line of the admin notification.
///
/// Depends only on the enquiry kind and the submitter's name.
pub fn admin_subject(kind: EnquiryKind, name: &str) -> String {
    match kind {
        EnquiryKind::BrochureDownload => format!("📄 Brochure Download Request from {} - {}", name, BRAND_NAME),
        EnquiryKind::General => format!("🏠 New Enquiry from {} - {}", name, BRAND_NAME),
    }
}

/// Subject line of the thank-you email.
pub fn thank_you_subject() -> String {
    format!("✅ Thank You for Contacting {}!", BRAND_NAME)
}

/// Format a timestamp the way the business reads it, e.g. `19/10/2026, 3:45:12 pm IST`.
pub fn format_received_at<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%d/%m/%Y, %-I:%M:%S %P %Z").to_string()
}

/// Render the notification sent to the business.
pub fn admin_notification<Tz>(enquiry: &Enquiry, received_at: &DateTime<Tz>) -> RenderedEmail
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let received = format_received_at(received_at);
    let phone = enquiry.phone.as_deref().unwrap_or("Not provided");
    let project = enquiry
        .project_type
        .map(|t| t.label())
        .unwrap_or("Not specified");

    let heading = match enquiry.kind {
        EnquiryKind::BrochureDownload => "📄 Brochure Download Request",
        EnquiryKind::General => "📬 New Contact Form Submission",
    };

    let text = format!(
        "{heading} - {brand}\n\n\
         Name: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Project Type: {project}\n\n\
         Message:\n{message}\n\n\
         ---\n\
         Reference: {reference}\n\
         Received on: {received}\n",
        heading = heading.trim_start_matches(|c: char| !c.is_ascii_alphanumeric()),
        brand = BRAND_NAME,
        name = enquiry.name,
        email = enquiry.email,
        phone = phone,
        project = project,
        message = enquiry.message,
        reference = enquiry.reference,
        received = received,
    );

    let name = escape_html(&enquiry.name);
    let email = escape_html(&enquiry.email);

    let mut rows = vec![
        detail_row("Name", &name),
        detail_row("Email", &format!(r#"<a href="mailto:{email}" style="color: #333333; text-decoration: none;">{email}</a>"#)),
    ];
    rows.push(match &enquiry.phone {
        Some(p) => {
            let p = escape_html(p);
            detail_row("Phone", &format!(r#"<a href="tel:{p}" style="color: #333333; text-decoration: none;">{p}</a>"#))
        }
        None => detail_row("Phone", "Not provided"),
    });
    if let Some(t) = enquiry.project_type {
        rows.push(detail_row("Project Type", &escape_html(t.label())));
    }
    rows.push(detail_row("Message", &multiline(&enquiry.message)));

    let content = format!(
        r#"<h2 style="margin: 0 0 20px; color: {INK}; font-size: 22px;">{heading}</h2>
<p style="color: #666666; font-size: 14px; line-height: 1.6; margin: 0 0 30px;">You have received a new enquiry from the {BRAND_NAME} website. Here are the details:</p>
<table width="100%" cellpadding="0" cellspacing="0" style="background-color: #fafafa; border-left: 3px solid {ACCENT};">
<tr><td style="padding: 20px;"><table width="100%" cellpadding="0" cellspacing="0">
{rows}
</table></td></tr>
</table>
<div style="text-align: center; margin-top: 30px;">
<a href="mailto:{email}?subject=Re: Your Enquiry to {BRAND_NAME}" style="display: inline-block; background-color: {ACCENT}; color: #ffffff; text-decoration: none; padding: 14px 32px; font-size: 14px; font-weight: 600; text-transform: uppercase;">Reply to {name}</a>
</div>
<p style="color: #999999; font-size: 12px; margin-top: 30px; text-align: center;">Received on {received}<br>Reference {reference}</p>"#,
        rows = rows.join("\n"),
        received = escape_html(&received),
        reference = enquiry.reference,
    );

    RenderedEmail {
        subject: admin_subject(enquiry.kind, &enquiry.name),
        text,
        html: layout("New Enquiry", "New Enquiry Received", &content, received_at.year()),
    }
}

/// Render the acknowledgement sent to the person who enquired.
pub fn thank_you(name: &str, year: i32) -> RenderedEmail {
    let text = format!(
        "Dear {name},\n\n\
         Thank you for reaching out to {BRAND_NAME}!\n\n\
         We have successfully received your enquiry and our team will review it shortly. \
         We typically respond within 24-48 hours.\n\n\
         If you need immediate assistance, please call us at {PHONE_DISPLAY}.\n\n\
         Best regards,\n\
         {BRAND_NAME} Team\n\n\
         ---\n\
         {ADDRESS}\n\
         Email: {SALES_EMAIL}\n\
         Phone: {PHONE_DISPLAY}\n"
    );

    let content = format!(
        r#"<h2 style="margin: 0 0 20px; color: {INK}; font-size: 28px; text-align: center;">Thank You, {name}!</h2>
<p style="color: #666666; font-size: 16px; line-height: 1.8; margin: 0 0 25px; text-align: center;">We have successfully received your enquiry and our team will review it shortly.</p>
<div style="background-color: #fafafa; border-left: 4px solid {ACCENT}; padding: 20px 25px; margin: 30px 0;">
<p style="margin: 0; color: #333333; font-size: 14px; line-height: 1.7;"><strong>What happens next?</strong><br><br>Our design experts will review your requirements and get back to you within <strong style="color: {ACCENT};">24-48 hours</strong> with a personalized response.</p>
</div>
<div style="background-color: {INK}; padding: 25px; margin-top: 35px; text-align: center;">
<p style="margin: 0 0 15px; color: #ffffff; font-size: 14px; font-weight: 600;">Need immediate assistance?</p>
<a href="tel:{PHONE_TEL}" style="color: {ACCENT}; font-size: 20px; font-weight: 700; text-decoration: none;">📞 {PHONE_DISPLAY}</a>
<div style="margin-top: 20px;"><a href="{WEBSITE_URL}" style="display: inline-block; background-color: {ACCENT}; color: #ffffff; text-decoration: none; padding: 12px 28px; font-size: 13px; font-weight: 600; text-transform: uppercase;">Visit Our Website</a></div>
</div>
<p style="margin: 30px 0 0; color: #666666; font-size: 13px; text-align: center; line-height: 2;">Turnkey Construction • Office Interiors • Residential Design • Modular Kitchens<br>IKEA Furnishing • Terrace Gardens • Wall Murals • Sculptures</p>"#,
        name = escape_html(name),
    );

    RenderedEmail {
        subject: thank_you_subject(),
        text,
        html: layout("Thank You", BRAND_TAGLINE, &content, year),
    }
}

/// Escape text for inclusion in HTML element content or quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn multiline(raw: &str) -> String {
    escape_html(raw).replace("\r\n", "\n").replace('\n', "<br>")
}

fn detail_row(label: &str, value_html: &str) -> String {
    format!(
        r#"<tr><td style="padding: 10px 0; border-bottom: 1px solid #eeeeee;"><strong style="color: {ACCENT}; font-size: 12px; text-transform: uppercase; letter-spacing: 1px;">{label}</strong><br><span style="color: #333333; font-size: 15px; line-height: 1.6;">{value_html}</span></td></tr>"#
    )
}

fn layout(title: &str, banner: &str, content: &str, year: i32) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} - {BRAND_NAME}</title>
</head>
<body style="margin: 0; padding: 0; background-color: #f5f5f5; font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;">
<table width="100%" cellpadding="0" cellspacing="0" style="background-color: #f5f5f5; padding: 40px 20px;">
<tr><td align="center">
<table width="600" cellpadding="0" cellspacing="0" style="background-color: #ffffff; box-shadow: 0 4px 20px rgba(0,0,0,0.1);">
<tr><td style="background-color: {INK}; padding: 30px 40px; text-align: center;">
<h1 style="margin: 0; color: #ffffff; font-size: 28px; font-weight: 700;"><span style="color: {ACCENT};">SLJ</span> Solutions</h1>
<p style="margin: 8px 0 0; color: #888888; font-size: 12px; text-transform: uppercase; letter-spacing: 2px;">{banner}</p>
</td></tr>
<tr><td style="background-color: {ACCENT}; height: 4px;"></td></tr>
<tr><td style="padding: 40px;">
{content}
</td></tr>
<tr><td style="background-color: {INK}; padding: 25px 40px; text-align: center;">
<p style="margin: 0 0 8px;"><a href="{WEBSITE_URL}" style="color: {ACCENT}; font-size: 13px; text-decoration: none;">www.sljsolutions.com</a></p>
<p style="margin: 0; color: #888888; font-size: 12px;">© {year} {BRAND_NAME}. All rights reserved.</p>
<p style="margin: 8px 0 0; color: #666666; font-size: 11px;">{ADDRESS}<br>📧 {SALES_EMAIL} | 📞 {PHONE_DISPLAY}</p>
</td></tr>
</table>
</td></tr>
</table>
</body>
</html>"#
    )
}
