//! Pending self-registration and its OTP entry.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Candidate account data captured at registration time and held in the
/// registration cache until the email OTP is confirmed and the payload is
/// consumed. The credential arrives already hashed; hashing is not this
/// crate's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRegistration {
    pub name: String,
    pub email: String,
    pub country_code: String,
    pub phone_number: String,
    pub address: String,
    pub password_hash: String,
}

/// Lifecycle of a registration OTP entry.
///
/// Entries start `Pending` and move to `Verified` after a successful code
/// check. Consuming the pending payload removes the entry entirely, and
/// expiry removes it lazily during verification, so neither state needs a
/// variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationOtpState {
    Pending,
    Verified,
}

/// One OTP plus candidate-account payload per email.
///
/// Single use: consumed exactly once after successful verification, or
/// overwritten wholesale by a newer request for the same email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationOtpEntry {
    /// Email the code was sent to (the registration identity)
    pub email: String,

    /// The 6-digit code
    pub code: String,

    /// When the code was generated
    pub generated_at: DateTime<Utc>,

    /// Where the entry is in its verify/consume lifecycle
    pub state: RegistrationOtpState,

    /// Candidate account data released on consumption
    pub pending: PendingRegistration,
}

impl RegistrationOtpEntry {
    /// Creates a fresh `Pending` entry.
    pub fn new(
        email: String,
        code: String,
        pending: PendingRegistration,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            email,
            code,
            generated_at,
            state: RegistrationOtpState::Pending,
            pending,
        }
    }

    /// Whether the entry is older than `expiry_minutes` at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>, expiry_minutes: i64) -> bool {
        self.generated_at < now - Duration::minutes(expiry_minutes)
    }

    /// Records a successful code check.
    pub fn mark_verified(&mut self) {
        self.state = RegistrationOtpState::Verified;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn payload() -> PendingRegistration {
        PendingRegistration {
            name: "Jordan Doe".to_string(),
            email: "a@x.com".to_string(),
            country_code: "+61".to_string(),
            phone_number: "412345678".to_string(),
            address: "1 Bank St".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_new_entry_is_pending() {
        let entry = RegistrationOtpEntry::new(
            "a@x.com".to_string(),
            "482193".to_string(),
            payload(),
            at(0),
        );
        assert_eq!(entry.state, RegistrationOtpState::Pending);
        assert!(!entry.is_expired(at(299), 5));
    }

    #[test]
    fn test_entry_expires_past_boundary() {
        let entry = RegistrationOtpEntry::new(
            "a@x.com".to_string(),
            "482193".to_string(),
            payload(),
            at(0),
        );
        assert!(!entry.is_expired(at(300), 5));
        assert!(entry.is_expired(at(301), 5));
    }

    #[test]
    fn test_mark_verified_transitions_state() {
        let mut entry = RegistrationOtpEntry::new(
            "a@x.com".to_string(),
            "482193".to_string(),
            payload(),
            at(0),
        );
        entry.mark_verified();
        assert_eq!(entry.state, RegistrationOtpState::Verified);
    }
}
