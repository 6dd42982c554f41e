//! The OTP engine orchestrating the login and registration flows.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use tokio::task::JoinHandle;

use crate::domain::entities::{
    AttemptRecord, OtpRecord, PendingRegistration, RegistrationOtpEntry,
};
use crate::errors::{OtpError, OtpResult};
use crate::repositories::{AccountDirectory, AttemptStore, OtpStore, RegistrationOtpCache};

use super::clock::Clock;
use super::config::OtpConfig;
use super::dispatcher::{self, OtpDispatcher};
use super::generator::CodeGenerator;
use super::lock::KeyedLocks;

/// Engine for issuing and verifying one-time passcodes.
///
/// Generic over its collaborators so storage, directory lookups, time, and
/// randomness can all be swapped without touching flow logic. Same-identity
/// operations serialize on a per-key lock; different identities never block
/// on each other.
pub struct OtpEngine<A, S, R, T>
where
    A: AccountDirectory,
    S: OtpStore,
    R: RegistrationOtpCache,
    T: AttemptStore,
{
    accounts: Arc<A>,
    otp_store: Arc<S>,
    registration_cache: Arc<R>,
    attempt_store: Arc<T>,
    dispatcher: Arc<dyn OtpDispatcher>,
    generator: Arc<dyn CodeGenerator>,
    clock: Arc<dyn Clock>,
    config: OtpConfig,
    locks: KeyedLocks,
}

impl<A, S, R, T> OtpEngine<A, S, R, T>
where
    A: AccountDirectory,
    S: OtpStore,
    R: RegistrationOtpCache,
    T: AttemptStore,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        accounts: Arc<A>,
        otp_store: Arc<S>,
        registration_cache: Arc<R>,
        attempt_store: Arc<T>,
        dispatcher: Arc<dyn OtpDispatcher>,
        generator: Arc<dyn CodeGenerator>,
        clock: Arc<dyn Clock>,
        config: OtpConfig,
    ) -> Self {
        Self {
            accounts,
            otp_store,
            registration_cache,
            attempt_store,
            dispatcher,
            generator,
            clock,
            config,
            locks: KeyedLocks::new(),
        }
    }

    /// Generate a login OTP for an account.
    ///
    /// While a previously issued code is still valid, repeated requests
    /// refresh its timestamp and resend the same code instead of minting a
    /// new one. Every call counts toward the generation attempt limit.
    ///
    /// # Errors
    ///
    /// * [`OtpError::AccountNotFound`] if the account is unknown
    /// * [`OtpError::RetryLimitExceeded`] while the account is rate limited
    pub async fn generate_login_otp(&self, account_number: &str) -> OtpResult<String> {
        if !self.accounts.account_exists(account_number).await? {
            tracing::warn!(
                account = %mask_identity(account_number),
                event = "otp_account_unknown",
                "OTP requested for unknown account"
            );
            return Err(OtpError::AccountNotFound {
                account_number: account_number.to_string(),
            });
        }

        let _guard = self.locks.acquire(account_number).await;
        let now = self.clock.now();

        match self.otp_store.get(account_number).await? {
            None => {
                self.record_attempt(account_number).await?;
                self.mint_login_code(account_number, now).await
            }
            Some(record) => {
                self.enforce_retry_limit(account_number, &record, now)
                    .await?;

                if record.is_expired(now, self.config.expiry_minutes) {
                    self.otp_store.delete(account_number).await?;
                    self.record_attempt(account_number).await?;
                    return self.mint_login_code(account_number, now).await;
                }

                // Still valid: refresh the timestamp and resend the code.
                self.otp_store.put(record.refreshed(now)).await?;
                self.record_attempt(account_number).await?;
                tracing::info!(
                    account = %mask_identity(account_number),
                    event = "otp_resent",
                    "Refreshed existing OTP for resend"
                );
                Ok(record.code)
            }
        }
    }

    /// Validate a candidate login code.
    ///
    /// A matching record that has expired is deleted and reported as
    /// `Ok(false)`. A matching record that is still fresh stays stored, so
    /// the code remains usable until it expires.
    ///
    /// # Errors
    ///
    /// [`OtpError::InvalidOtp`] when no stored record matches the account
    /// and code pair at all.
    pub async fn validate_login_otp(&self, account_number: &str, code: &str) -> OtpResult<bool> {
        let _guard = self.locks.acquire(account_number).await;
        let now = self.clock.now();

        let record = match self.otp_store.get(account_number).await? {
            Some(record) if codes_match(&record.code, code) => record,
            _ => {
                tracing::warn!(
                    account = %mask_identity(account_number),
                    event = "otp_invalid",
                    "OTP validation failed: no matching record"
                );
                return Err(OtpError::InvalidOtp);
            }
        };

        if record.is_expired(now, self.config.expiry_minutes) {
            self.otp_store.delete(account_number).await?;
            tracing::info!(
                account = %mask_identity(account_number),
                event = "otp_expired",
                "Matching OTP had expired and was removed"
            );
            return Ok(false);
        }

        tracing::info!(
            account = %mask_identity(account_number),
            event = "otp_validated",
            "OTP validated successfully"
        );
        Ok(true)
    }

    /// Generate a registration OTP for an email, caching the candidate
    /// account payload alongside it.
    ///
    /// No existence check and no rate limiting apply here: the email need
    /// not map to an account yet, and a newer request simply overwrites the
    /// previous entry wholesale.
    pub async fn generate_registration_otp(
        &self,
        email: &str,
        pending: PendingRegistration,
    ) -> OtpResult<String> {
        let _guard = self.locks.acquire(email).await;
        let now = self.clock.now();

        let code = self.generator.generate();
        self.registration_cache
            .put(RegistrationOtpEntry::new(
                email.to_string(),
                code.clone(),
                pending,
                now,
            ))
            .await?;

        tracing::info!(
            email = %mask_identity(email),
            event = "registration_otp_generated",
            "Generated registration OTP"
        );
        Ok(code)
    }

    /// Verify a candidate registration code.
    ///
    /// Returns `Ok(false)` when no entry exists, when the entry expired
    /// (removing it), or when the code mismatches (keeping the entry so the
    /// caller may retry before expiry). On a match the entry transitions to
    /// `Verified` and stays cached for the consume step.
    pub async fn verify_registration_otp(&self, email: &str, code: &str) -> OtpResult<bool> {
        let _guard = self.locks.acquire(email).await;
        let now = self.clock.now();

        let mut entry = match self.registration_cache.get(email).await? {
            Some(entry) => entry,
            None => return Ok(false),
        };

        if entry.is_expired(now, self.config.expiry_minutes) {
            self.registration_cache.remove(email).await?;
            tracing::info!(
                email = %mask_identity(email),
                event = "registration_otp_expired",
                "Registration OTP had expired and was removed"
            );
            return Ok(false);
        }

        if !codes_match(&entry.code, code) {
            tracing::warn!(
                email = %mask_identity(email),
                event = "registration_otp_mismatch",
                "Registration OTP mismatch"
            );
            return Ok(false);
        }

        entry.mark_verified();
        self.registration_cache.put(entry).await?;
        tracing::info!(
            email = %mask_identity(email),
            event = "registration_otp_verified",
            "Registration OTP verified"
        );
        Ok(true)
    }

    /// Release the cached candidate-account payload, removing the entry.
    ///
    /// Verify-then-consume for one email is logically sequential; of two
    /// concurrent consume calls, the second observes not-found.
    ///
    /// # Errors
    ///
    /// [`OtpError::PendingRegistrationNotFound`] when nothing is cached for
    /// the email.
    pub async fn consume_pending_registration(
        &self,
        email: &str,
    ) -> OtpResult<PendingRegistration> {
        let _guard = self.locks.acquire(email).await;

        match self.registration_cache.get(email).await? {
            Some(entry) => {
                self.registration_cache.remove(email).await?;
                tracing::info!(
                    email = %mask_identity(email),
                    event = "registration_consumed",
                    "Pending registration payload consumed"
                );
                Ok(entry.pending)
            }
            None => Err(OtpError::PendingRegistrationNotFound),
        }
    }

    /// Fire-and-forget delivery of a login code by email.
    ///
    /// The account number is masked in the mail body. Failures are logged
    /// and never unwind committed OTP state; the returned handle exists for
    /// callers that want to await completion.
    pub fn dispatch_login_otp(
        &self,
        email: &str,
        name: &str,
        account_number: &str,
        code: &str,
    ) -> JoinHandle<()> {
        let body = dispatcher::login_otp_body(
            name,
            &dispatcher::mask_account_number(account_number),
            code,
            self.config.expiry_minutes,
        );
        self.spawn_dispatch(
            email.to_string(),
            dispatcher::LOGIN_OTP_SUBJECT.to_string(),
            body,
        )
    }

    /// Fire-and-forget delivery of a registration code by email.
    pub fn dispatch_registration_otp(&self, email: &str, name: &str, code: &str) -> JoinHandle<()> {
        let body = dispatcher::registration_otp_body(name, code, self.config.expiry_minutes);
        self.spawn_dispatch(
            email.to_string(),
            dispatcher::REGISTRATION_OTP_SUBJECT.to_string(),
            body,
        )
    }

    fn spawn_dispatch(&self, address: String, subject: String, body: String) -> JoinHandle<()> {
        let dispatcher = Arc::clone(&self.dispatcher);
        tokio::spawn(async move {
            match dispatcher.dispatch(&address, &subject, &body).await {
                Ok(message_id) => tracing::info!(
                    to = %mask_identity(&address),
                    message_id = %message_id,
                    event = "otp_dispatched",
                    "OTP mail dispatched"
                ),
                Err(error) => tracing::error!(
                    to = %mask_identity(&address),
                    error = %error,
                    event = "otp_dispatch_failed",
                    "OTP mail dispatch failed"
                ),
            }
        })
    }

    async fn mint_login_code(
        &self,
        account_number: &str,
        now: DateTime<Utc>,
    ) -> OtpResult<String> {
        let code = self.generator.generate();
        self.otp_store
            .put(OtpRecord::new(
                account_number.to_string(),
                code.clone(),
                now,
            ))
            .await?;

        tracing::info!(
            account = %mask_identity(account_number),
            event = "otp_generated",
            "Generated new login OTP"
        );
        Ok(code)
    }

    async fn record_attempt(&self, account_number: &str) -> OtpResult<()> {
        let record = self.attempt_store.get(account_number).await?;
        self.attempt_store
            .put(account_number, record.incremented())
            .await
    }

    /// Retry-limit policy, evaluated only when a record already exists.
    ///
    /// The limit trips once the attempt count reaches the configured limit
    /// while the record's generation timestamp is still inside the retry
    /// window. A tripped account is released once its own limit-hit marker
    /// is older than the reset waiting window, which also zeroes its
    /// counter.
    async fn enforce_retry_limit(
        &self,
        account_number: &str,
        record: &OtpRecord,
        now: DateTime<Utc>,
    ) -> OtpResult<()> {
        let attempts = self.attempt_store.get(account_number).await?;
        if attempts.count < self.config.attempts_limit {
            return Ok(());
        }

        let window_start = now - Duration::minutes(self.config.retry_limit_window_minutes);
        if record.generated_at <= window_start {
            // Last generation fell out of the limit window.
            return Ok(());
        }

        let reset_before = now - Duration::minutes(self.config.reset_waiting_minutes);
        match attempts.limit_hit_at {
            Some(hit_at) if hit_at <= reset_before => {
                self.attempt_store
                    .put(account_number, AttemptRecord::default())
                    .await?;
                tracing::info!(
                    account = %mask_identity(account_number),
                    event = "otp_attempts_reset",
                    "Attempt counter reset after waiting window"
                );
                Ok(())
            }
            Some(hit_at) => {
                let elapsed = (now - hit_at).num_minutes();
                let minutes_remaining = self.config.reset_waiting_minutes - elapsed;
                tracing::warn!(
                    account = %mask_identity(account_number),
                    minutes_remaining,
                    event = "otp_rate_limited",
                    "OTP generation rate limit exceeded"
                );
                Err(OtpError::RetryLimitExceeded { minutes_remaining })
            }
            None => {
                let tripped = AttemptRecord {
                    limit_hit_at: Some(now),
                    ..attempts
                };
                self.attempt_store.put(account_number, tripped).await?;
                tracing::warn!(
                    account = %mask_identity(account_number),
                    minutes_remaining = self.config.reset_waiting_minutes,
                    event = "otp_rate_limited",
                    "OTP generation rate limit reached"
                );
                Err(OtpError::RetryLimitExceeded {
                    minutes_remaining: self.config.reset_waiting_minutes,
                })
            }
        }
    }
}

/// Constant-time code comparison; length mismatch short-circuits.
fn codes_match(stored: &str, candidate: &str) -> bool {
    stored.len() == candidate.len() && constant_time_eq(stored.as_bytes(), candidate.as_bytes())
}

/// Mask an identity for logging, keeping only the last four characters.
fn mask_identity(identity: &str) -> String {
    if identity.len() <= 4 {
        "****".to_string()
    } else {
        format!("***{}", &identity[identity.len() - 4..])
    }
}
