//! Redis-backed registration OTP cache.
//!
//! Entries serialize to JSON under `registration:otp:{email}`. Each write
//! carries the configured TTL, so Redis evicts abandoned registrations on
//! its own in addition to the engine's lazy expiry checks.

use async_trait::async_trait;
use tracing::debug;

use otp_core::domain::entities::RegistrationOtpEntry;
use otp_core::errors::{OtpError, OtpResult};
use otp_core::repositories::RegistrationOtpCache;

use crate::cache::RedisClient;
use crate::InfrastructureError;

const REGISTRATION_KEY_PREFIX: &str = "registration:otp";

pub struct RedisRegistrationCache {
    client: RedisClient,
    ttl_seconds: u64,
}

impl RedisRegistrationCache {
    pub fn new(client: RedisClient, ttl_seconds: u64) -> Self {
        Self {
            client,
            ttl_seconds,
        }
    }

    fn key(email: &str) -> String {
        format!("{}:{}", REGISTRATION_KEY_PREFIX, email)
    }
}

#[async_trait]
impl RegistrationOtpCache for RedisRegistrationCache {
    async fn get(&self, email: &str) -> OtpResult<Option<RegistrationOtpEntry>> {
        let raw = self
            .client
            .get(&Self::key(email))
            .await
            .map_err(OtpError::from)?;

        match raw {
            Some(json) => {
                let entry = serde_json::from_str(&json)
                    .map_err(|e| OtpError::from(InfrastructureError::Serialization(e)))?;
                Ok(Some(entry))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, entry: RegistrationOtpEntry) -> OtpResult<()> {
        let key = Self::key(&entry.email);
        let json = serde_json::to_string(&entry)
            .map_err(|e| OtpError::from(InfrastructureError::Serialization(e)))?;

        debug!("Caching registration entry under '{}'", key);
        self.client
            .set_with_expiry(&key, &json, self.ttl_seconds)
            .await
            .map_err(OtpError::from)
    }

    async fn remove(&self, email: &str) -> OtpResult<()> {
        self.client
            .delete(&Self::key(email))
            .await
            .map_err(OtpError::from)?;
        Ok(())
    }
}
