//! Mock collaborators for engine tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::entities::{
    AttemptRecord, OtpRecord, PendingRegistration, RegistrationOtpEntry,
};
use crate::errors::OtpResult;
use crate::repositories::{AccountDirectory, AttemptStore, OtpStore, RegistrationOtpCache};
use crate::services::otp::{Clock, CodeGenerator, OtpConfig, OtpDispatcher, OtpEngine};

// Account directory backed by a plain set of known accounts.
pub struct MockAccountDirectory {
    accounts: HashSet<String>,
}

impl MockAccountDirectory {
    pub fn with_accounts(accounts: &[&str]) -> Self {
        Self {
            accounts: accounts.iter().map(|a| a.to_string()).collect(),
        }
    }
}

#[async_trait]
impl AccountDirectory for MockAccountDirectory {
    async fn account_exists(&self, account_number: &str) -> OtpResult<bool> {
        Ok(self.accounts.contains(account_number))
    }
}

#[derive(Default)]
pub struct MemoryOtpStore {
    pub records: Mutex<HashMap<String, OtpRecord>>,
}

#[async_trait]
impl OtpStore for MemoryOtpStore {
    async fn get(&self, account_number: &str) -> OtpResult<Option<OtpRecord>> {
        Ok(self.records.lock().unwrap().get(account_number).cloned())
    }

    async fn put(&self, record: OtpRecord) -> OtpResult<()> {
        self.records
            .lock()
            .unwrap()
            .insert(record.account_number.clone(), record);
        Ok(())
    }

    async fn delete(&self, account_number: &str) -> OtpResult<()> {
        self.records.lock().unwrap().remove(account_number);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRegistrationCache {
    pub entries: Mutex<HashMap<String, RegistrationOtpEntry>>,
}

#[async_trait]
impl RegistrationOtpCache for MemoryRegistrationCache {
    async fn get(&self, email: &str) -> OtpResult<Option<RegistrationOtpEntry>> {
        Ok(self.entries.lock().unwrap().get(email).cloned())
    }

    async fn put(&self, entry: RegistrationOtpEntry) -> OtpResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(entry.email.clone(), entry);
        Ok(())
    }

    async fn remove(&self, email: &str) -> OtpResult<()> {
        self.entries.lock().unwrap().remove(email);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryAttemptStore {
    pub records: Mutex<HashMap<String, AttemptRecord>>,
}

#[async_trait]
impl AttemptStore for MemoryAttemptStore {
    async fn get(&self, account_number: &str) -> OtpResult<AttemptRecord> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(account_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn put(&self, account_number: &str, record: AttemptRecord) -> OtpResult<()> {
        self.records
            .lock()
            .unwrap()
            .insert(account_number.to_string(), record);
        Ok(())
    }
}

// Dispatcher that records outbound mail instead of sending it.
#[derive(Default)]
pub struct MockDispatcher {
    pub sent: Mutex<Vec<(String, String, String)>>,
    pub should_fail: bool,
}

impl MockDispatcher {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            should_fail: true,
        }
    }
}

#[async_trait]
impl OtpDispatcher for MockDispatcher {
    async fn dispatch(&self, address: &str, subject: &str, body: &str) -> Result<String, String> {
        if self.should_fail {
            return Err("mail service error".to_string());
        }
        self.sent.lock().unwrap().push((
            address.to_string(),
            subject.to_string(),
            body.to_string(),
        ));
        Ok("mock-msg-0001".to_string())
    }
}

// Manually advanced clock.
pub struct MockClock {
    now: Mutex<DateTime<Utc>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()),
        }
    }

    pub fn advance_minutes(&self, minutes: i64) {
        *self.now.lock().unwrap() += Duration::minutes(minutes);
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.now.lock().unwrap() += Duration::seconds(seconds);
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// Generator returning a scripted sequence of codes.
pub struct ScriptedCodeGenerator {
    codes: Mutex<VecDeque<String>>,
}

impl ScriptedCodeGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
        }
    }
}

impl CodeGenerator for ScriptedCodeGenerator {
    fn generate(&self) -> String {
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted code generator exhausted")
    }
}

/// Engine wired to mocks, with handles kept for inspection.
pub struct TestHarness {
    pub engine:
        OtpEngine<MockAccountDirectory, MemoryOtpStore, MemoryRegistrationCache, MemoryAttemptStore>,
    pub clock: Arc<MockClock>,
    pub dispatcher: Arc<MockDispatcher>,
    pub otp_store: Arc<MemoryOtpStore>,
    pub registration_cache: Arc<MemoryRegistrationCache>,
    pub attempt_store: Arc<MemoryAttemptStore>,
}

impl TestHarness {
    pub fn new(codes: &[&str]) -> Self {
        Self::build(codes, Arc::new(MockDispatcher::default()))
    }

    pub fn with_dispatcher(codes: &[&str], dispatcher: MockDispatcher) -> Self {
        Self::build(codes, Arc::new(dispatcher))
    }

    fn build(codes: &[&str], dispatcher: Arc<MockDispatcher>) -> Self {
        let accounts = Arc::new(MockAccountDirectory::with_accounts(&["ACC001", "ACC002"]));
        let otp_store = Arc::new(MemoryOtpStore::default());
        let registration_cache = Arc::new(MemoryRegistrationCache::default());
        let attempt_store = Arc::new(MemoryAttemptStore::default());
        let clock = Arc::new(MockClock::new());

        let engine = OtpEngine::new(
            Arc::clone(&accounts),
            Arc::clone(&otp_store),
            Arc::clone(&registration_cache),
            Arc::clone(&attempt_store),
            dispatcher.clone(),
            Arc::new(ScriptedCodeGenerator::new(codes)),
            clock.clone(),
            OtpConfig::default(),
        );

        Self {
            engine,
            clock,
            dispatcher,
            otp_store,
            registration_cache,
            attempt_store,
        }
    }

    pub fn attempts(&self, account_number: &str) -> AttemptRecord {
        self.attempt_store
            .records
            .lock()
            .unwrap()
            .get(account_number)
            .cloned()
            .unwrap_or_default()
    }
}

pub fn sample_registration(email: &str) -> PendingRegistration {
    PendingRegistration {
        name: "Jordan Doe".to_string(),
        email: email.to_string(),
        country_code: "+61".to_string(),
        phone_number: "412345678".to_string(),
        address: "1 Bank St".to_string(),
        password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
    }
}
