//! Mock email service for development and testing.
//!
//! Records outbound mail in memory instead of sending it, and can be told
//! to fail so delivery-failure paths can be exercised.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use otp_core::services::otp::OtpDispatcher;

/// A message captured by the mock instead of being delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct MockEmailService {
    sent: Mutex<Vec<SentEmail>>,
    simulate_failure: bool,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that rejects every dispatch.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            simulate_failure: true,
        }
    }

    /// All mail captured so far, in dispatch order.
    pub fn sent_emails(&self) -> Vec<SentEmail> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl OtpDispatcher for MockEmailService {
    async fn dispatch(&self, address: &str, subject: &str, body: &str) -> Result<String, String> {
        if self.simulate_failure {
            return Err("simulated mail failure".to_string());
        }

        info!("Mock mail to {} ({})", address, subject);
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SentEmail {
                to: address.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });

        Ok(format!("mock-msg-{}", Uuid::new_v4()))
    }
}
