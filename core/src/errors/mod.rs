//! Domain-specific error types for the OTP flows.

use thiserror::Error;

/// Errors surfaced by the OTP engine.
///
/// Identity-not-found and rate-limit conditions are always explicit errors.
/// Expiry and simple code mismatch are reported as `Ok(false)` instead, so
/// callers can drive "resend code" versus "wrong code" UX without
/// error-driven control flow.
#[derive(Error, Debug)]
pub enum OtpError {
    /// The account number is unknown to the account system (login flow only).
    #[error("Account not found: {account_number}")]
    AccountNotFound { account_number: String },

    /// No stored record matches the account and code pair at all.
    /// Deliberately ambiguous between a wrong code and no code existing.
    #[error("Invalid OTP")]
    InvalidOtp,

    /// The generation attempt limit was hit; retry after the reported wait.
    #[error("OTP generation limit exceeded. Try again in {minutes_remaining} minutes")]
    RetryLimitExceeded { minutes_remaining: i64 },

    /// No pending registration payload is cached for the email.
    #[error("No pending registration found")]
    PendingRegistrationNotFound,

    /// An underlying keyed store failed.
    #[error("Storage error: {message}")]
    Storage { message: String },
}

pub type OtpResult<T> = Result<T, OtpError>;
