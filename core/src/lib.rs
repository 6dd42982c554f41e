//! # Banking Portal OTP Core
//!
//! Core domain and business logic for the banking portal's one-time
//! passcode flows. This crate contains the domain entities, the engine
//! orchestrating login and registration OTPs, repository traits, and
//! error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
