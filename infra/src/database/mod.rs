//! MySQL implementations using SQLx.

pub mod mysql;

pub use mysql::{MySqlAccountDirectory, MySqlOtpStore};
