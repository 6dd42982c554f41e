//! Account existence lookups.

use async_trait::async_trait;

use crate::errors::OtpResult;

/// External identity check for the login flow. The registration flow never
/// consults this: an email need not map to an account yet.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Whether the account number is known to the account system.
    async fn account_exists(&self, account_number: &str) -> OtpResult<bool>;
}
