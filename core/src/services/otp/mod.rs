//! OTP issuance, verification, and abuse rate limiting.
//!
//! This module provides the complete one-time passcode workflow:
//! - login OTP generation with resend-same-code semantics and lazy expiry
//! - a per-account generation rate limit with a reset waiting window
//! - registration OTP plus pending-payload cache with a two-call
//!   verify/consume contract
//! - fire-and-forget email dispatch of issued codes

mod clock;
mod config;
mod dispatcher;
mod engine;
mod generator;
mod lock;

#[cfg(test)]
mod tests;

pub use clock::{Clock, SystemClock};
pub use config::OtpConfig;
pub use dispatcher::{mask_account_number, OtpDispatcher};
pub use engine::OtpEngine;
pub use generator::{CodeGenerator, RandomCodeGenerator, CODE_MAX, CODE_MIN};
pub use lock::KeyedLocks;
