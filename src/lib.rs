//! SLJ Solutions enquiry API
//!
//! Relays website enquiries (contact, quote and brochure forms) to the sales
//! inbox and sends the visitor a thank-you email. The [`client`] module holds
//! the form-side half of the flow.

pub mod client;
pub mod config;
pub mod enquiry;
pub mod error;
pub mod mail;
pub mod models;
pub mod routes;
pub mod state;
