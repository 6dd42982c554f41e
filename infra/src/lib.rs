//! # Infrastructure Layer
//!
//! Concrete implementations of the OTP engine's storage and delivery seams:
//!
//! - **Database**: MySQL-backed OTP records and account lookups using SQLx
//! - **Cache**: Redis-backed registration cache, plus in-memory stores for
//!   single-node deployments and tests
//! - **Email**: HTTP mail-provider dispatcher and a mock for testing
//!
//! Everything here implements a trait from `otp_core`; the engine never
//! depends on this crate directly.

pub mod cache;
pub mod config;
pub mod database;
pub mod email;

mod error;

pub use error::InfrastructureError;
