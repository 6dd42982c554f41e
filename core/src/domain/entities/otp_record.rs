//! Login OTP record keyed by account number.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Length of a generated OTP code.
pub const CODE_LENGTH: usize = 6;

/// A login one-time passcode bound to an account number.
///
/// At most one record exists per account at any time. Regeneration either
/// replaces the record wholesale (when the previous code expired) or
/// refreshes `generated_at` while keeping the same code (resend). Expired
/// records are deleted lazily when a validation finds them; there is no
/// background sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Account number the code was issued for
    pub account_number: String,

    /// The 6-digit code
    pub code: String,

    /// When the code was generated or last refreshed
    pub generated_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a record for a freshly minted code.
    pub fn new(account_number: String, code: String, generated_at: DateTime<Utc>) -> Self {
        Self {
            account_number,
            code,
            generated_at,
        }
    }

    /// Whether the record is older than `expiry_minutes` at `now`.
    ///
    /// A record exactly `expiry_minutes` old is still valid; only a strictly
    /// greater age expires it.
    pub fn is_expired(&self, now: DateTime<Utc>, expiry_minutes: i64) -> bool {
        self.generated_at < now - Duration::minutes(expiry_minutes)
    }

    /// Returns a copy with `generated_at` moved to `now`, keeping the code.
    pub fn refreshed(&self, now: DateTime<Utc>) -> Self {
        Self {
            generated_at: now,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_not_expired_within_window() {
        let record = OtpRecord::new("ACC001".to_string(), "482193".to_string(), at(0));
        assert!(!record.is_expired(at(299), 5));
    }

    #[test]
    fn test_not_expired_exactly_at_boundary() {
        let record = OtpRecord::new("ACC001".to_string(), "482193".to_string(), at(0));
        assert!(!record.is_expired(at(300), 5));
    }

    #[test]
    fn test_expired_past_boundary() {
        let record = OtpRecord::new("ACC001".to_string(), "482193".to_string(), at(0));
        assert!(record.is_expired(at(301), 5));
    }

    #[test]
    fn test_refreshed_keeps_code() {
        let record = OtpRecord::new("ACC001".to_string(), "482193".to_string(), at(0));
        let refreshed = record.refreshed(at(120));

        assert_eq!(refreshed.code, record.code);
        assert_eq!(refreshed.account_number, record.account_number);
        assert_eq!(refreshed.generated_at, at(120));
        assert!(!refreshed.is_expired(at(420), 5));
    }
}
