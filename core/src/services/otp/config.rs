//! Configuration for the OTP engine.

/// Tunable policy knobs for OTP issuance and rate limiting.
#[derive(Debug, Clone)]
pub struct OtpConfig {
    /// Minutes before an issued code expires
    pub expiry_minutes: i64,
    /// Generation calls allowed before the retry limit trips
    pub attempts_limit: u32,
    /// Minutes an account waits after tripping the limit before its
    /// counter resets
    pub reset_waiting_minutes: i64,
    /// Window over which generation attempts count toward the limit,
    /// measured from the stored record's generation timestamp. Independent
    /// of the code's own expiry.
    pub retry_limit_window_minutes: i64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            expiry_minutes: 5,
            attempts_limit: 3,
            reset_waiting_minutes: 10,
            retry_limit_window_minutes: 15,
        }
    }
}
