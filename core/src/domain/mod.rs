//! Domain entities for the OTP flows.

pub mod entities;

pub use entities::*;
