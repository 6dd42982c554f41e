//! Ephemeral keyed storage for registration OTP entries.

use async_trait::async_trait;

use crate::domain::entities::RegistrationOtpEntry;
use crate::errors::OtpResult;

/// Keyed cache holding one [`RegistrationOtpEntry`] per email.
///
/// `put` overwrites wholesale; a newer request for the same email replaces
/// whatever was there.
#[async_trait]
pub trait RegistrationOtpCache: Send + Sync {
    /// Fetch the entry for an email, if any.
    async fn get(&self, email: &str) -> OtpResult<Option<RegistrationOtpEntry>>;

    /// Insert or replace the entry for the email the entry names.
    async fn put(&self, entry: RegistrationOtpEntry) -> OtpResult<()>;

    /// Remove the entry for an email. Removing a missing entry is not an
    /// error.
    async fn remove(&self, email: &str) -> OtpResult<()>;
}
