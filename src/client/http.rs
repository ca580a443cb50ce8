//! HTTP client for the enquiry endpoint

use super::ClientError;
use crate::models::EnquiryRequest;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Body returned by `POST /api/contact`, success or failure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// Posts enquiries to the relay service
#[derive(Debug, Clone)]
pub struct EnquiryClient {
    http: reqwest::Client,
    endpoint: String,
}

impl EnquiryClient {
    /// Client for the service rooted at `base_url` (e.g. `https://sljsolutions.com`).
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/api/contact", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one enquiry. Returns the server's confirmation message.
    ///
    /// Exactly one request is made; failures are never retried.
    pub async fn submit(&self, request: &EnquiryRequest) -> Result<String, ClientError> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let body: SubmissionResponse =
            serde_json::from_slice(&bytes).map_err(|_| ClientError::InvalidResponse(status.as_u16()))?;

        debug!("Enquiry endpoint answered HTTP {}", status);

        if !status.is_success() {
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: body.error,
            });
        }

        match body.success {
            Some(true) => Ok(body.message.unwrap_or_default()),
            _ => Err(ClientError::Rejected(body.error)),
        }
    }
}
