//! Data models and DTOs (Data Transfer Objects)
//!
//! Contains all request/response structures used by the API.

pub mod enquiry;

// Re-export commonly used types
pub use enquiry::*;

use serde::{Deserialize, Serialize};

/// Message-only success response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
