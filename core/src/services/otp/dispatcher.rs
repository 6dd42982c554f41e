//! Outbound message dispatch for issued codes.

use async_trait::async_trait;

/// Transport delivering an issued code to the user's channel.
///
/// Dispatch is fire-and-forget from the engine's point of view: failures
/// are logged and never roll back already-committed OTP state.
#[async_trait]
pub trait OtpDispatcher: Send + Sync {
    /// Send `body` to `address` under the given subject. Returns a
    /// provider message id on success.
    async fn dispatch(&self, address: &str, subject: &str, body: &str) -> Result<String, String>;
}

/// Subject line for login OTP mail.
pub(crate) const LOGIN_OTP_SUBJECT: &str = "OTP Verification";

/// Subject line for registration OTP mail.
pub(crate) const REGISTRATION_OTP_SUBJECT: &str = "Registration OTP Verification";

/// Mask an account number for outbound mail, keeping only the tail digits.
pub fn mask_account_number(account_number: &str) -> String {
    if account_number.len() <= 3 {
        "xxx".to_string()
    } else {
        format!("xxx{}", &account_number[3..])
    }
}

pub(crate) fn login_otp_body(
    name: &str,
    masked_account: &str,
    code: &str,
    expiry_minutes: i64,
) -> String {
    format!(
        "Dear {name},\n\n\
         The one-time passcode for your account {masked_account} is: {code}\n\
         It expires in {expiry_minutes} minutes.\n\n\
         If you did not request this code, please contact support immediately."
    )
}

pub(crate) fn registration_otp_body(name: &str, code: &str, expiry_minutes: i64) -> String {
    format!(
        "Dear {name},\n\n\
         Your registration confirmation code is: {code}\n\
         It expires in {expiry_minutes} minutes.\n\n\
         If you did not start a registration, you can ignore this message."
    )
}
