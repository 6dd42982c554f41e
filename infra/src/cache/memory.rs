//! In-memory store implementations.
//!
//! Suitable for single-node deployments and tests. State lives for the
//! lifetime of the process; expiry is enforced lazily by the engine, not by
//! the store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use otp_core::domain::entities::{AttemptRecord, OtpRecord, RegistrationOtpEntry};
use otp_core::errors::OtpResult;
use otp_core::repositories::{AttemptStore, OtpStore, RegistrationOtpCache};

/// Login OTP records keyed by account number.
#[derive(Default)]
pub struct InMemoryOtpStore {
    records: RwLock<HashMap<String, OtpRecord>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn get(&self, account_number: &str) -> OtpResult<Option<OtpRecord>> {
        Ok(self.records.read().await.get(account_number).cloned())
    }

    async fn put(&self, record: OtpRecord) -> OtpResult<()> {
        self.records
            .write()
            .await
            .insert(record.account_number.clone(), record);
        Ok(())
    }

    async fn delete(&self, account_number: &str) -> OtpResult<()> {
        self.records.write().await.remove(account_number);
        Ok(())
    }
}

/// Registration OTP entries keyed by email.
#[derive(Default)]
pub struct InMemoryRegistrationCache {
    entries: RwLock<HashMap<String, RegistrationOtpEntry>>,
}

impl InMemoryRegistrationCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegistrationOtpCache for InMemoryRegistrationCache {
    async fn get(&self, email: &str) -> OtpResult<Option<RegistrationOtpEntry>> {
        Ok(self.entries.read().await.get(email).cloned())
    }

    async fn put(&self, entry: RegistrationOtpEntry) -> OtpResult<()> {
        self.entries
            .write()
            .await
            .insert(entry.email.clone(), entry);
        Ok(())
    }

    async fn remove(&self, email: &str) -> OtpResult<()> {
        self.entries.write().await.remove(email);
        Ok(())
    }
}

/// Generation attempt counters keyed by account number.
#[derive(Default)]
pub struct InMemoryAttemptStore {
    records: RwLock<HashMap<String, AttemptRecord>>,
}

impl InMemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttemptStore for InMemoryAttemptStore {
    async fn get(&self, account_number: &str) -> OtpResult<AttemptRecord> {
        Ok(self
            .records
            .read()
            .await
            .get(account_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn put(&self, account_number: &str, record: AttemptRecord) -> OtpResult<()> {
        self.records
            .write()
            .await
            .insert(account_number.to_string(), record);
        Ok(())
    }
}
