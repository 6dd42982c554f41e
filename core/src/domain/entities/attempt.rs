//! Per-account OTP generation attempt tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generation attempts for one account since the last reset.
///
/// `limit_hit_at` records when this account first tripped the attempt
/// limit. The marker is scoped to the account, so one account's limit
/// event never shifts the reset window of any other account. The store
/// holding these records carries no TTL of its own; the retry and reset
/// windows are derived from the timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Generation calls counted since the last reset
    pub count: u32,

    /// When the attempt limit was first reached, if it currently is
    pub limit_hit_at: Option<DateTime<Utc>>,
}

impl AttemptRecord {
    /// Returns a copy with the count bumped by one.
    pub fn incremented(&self) -> Self {
        Self {
            count: self.count + 1,
            limit_hit_at: self.limit_hit_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_is_zero_attempts() {
        let record = AttemptRecord::default();
        assert_eq!(record.count, 0);
        assert!(record.limit_hit_at.is_none());
    }

    #[test]
    fn test_incremented_preserves_marker() {
        let hit_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let record = AttemptRecord {
            count: 3,
            limit_hit_at: Some(hit_at),
        };

        let bumped = record.incremented();
        assert_eq!(bumped.count, 4);
        assert_eq!(bumped.limit_hit_at, Some(hit_at));
    }
}
