//! Durable keyed storage for login OTP records.

use async_trait::async_trait;

use crate::domain::entities::OtpRecord;
use crate::errors::OtpResult;

/// Keyed store holding at most one active [`OtpRecord`] per account number.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Fetch the active record for an account, if any.
    async fn get(&self, account_number: &str) -> OtpResult<Option<OtpRecord>>;

    /// Insert or replace the record for the account the record names.
    async fn put(&self, record: OtpRecord) -> OtpResult<()>;

    /// Remove the record for an account. Removing a missing record is not
    /// an error.
    async fn delete(&self, account_number: &str) -> OtpResult<()>;
}
