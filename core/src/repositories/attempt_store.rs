//! Keyed storage for generation attempt records.

use async_trait::async_trait;

use crate::domain::entities::AttemptRecord;
use crate::errors::OtpResult;

/// Keyed store tracking [`AttemptRecord`]s per account number.
///
/// There is no implicit expiry on these records; the retry and reset
/// windows are derived from the timestamps the engine stores in them.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Fetch the attempt record for an account, defaulting to zero attempts
    /// when none is stored.
    async fn get(&self, account_number: &str) -> OtpResult<AttemptRecord>;

    /// Insert or replace the attempt record for an account.
    async fn put(&self, account_number: &str, record: AttemptRecord) -> OtpResult<()>;
}
