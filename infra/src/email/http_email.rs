//! HTTP mail-provider dispatcher.
//!
//! Posts a JSON payload to the configured provider endpoint with bearer-token
//! authentication. The dispatch seam reports errors as strings; the engine
//! logs them and never fails a flow over delivery.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use otp_core::services::otp::OtpDispatcher;

use crate::config::EmailConfig;
use crate::InfrastructureError;

const REQUEST_TIMEOUT_SECONDS: u64 = 30;

#[derive(Serialize)]
struct OutboundEmail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

pub struct HttpEmailService {
    client: reqwest::Client,
    config: EmailConfig,
}

impl HttpEmailService {
    pub fn new(config: EmailConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()
            .map_err(InfrastructureError::Http)?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl OtpDispatcher for HttpEmailService {
    async fn dispatch(&self, address: &str, subject: &str, body: &str) -> Result<String, String> {
        let payload = OutboundEmail {
            from: &self.config.from_address,
            to: address,
            subject,
            text: body,
        };

        debug!("Posting mail to provider at {}", self.config.api_url);
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("mail provider request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Mail provider returned {}", status);
            return Err(format!("mail provider returned {}", status));
        }

        // Providers echo a delivery identifier in a response header.
        let message_id = response
            .headers()
            .get("x-message-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        Ok(message_id)
    }
}
