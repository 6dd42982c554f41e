//! Outbound mail implementations of the OTP dispatch seam.

pub mod http_email;
pub mod mock_email;

pub use http_email::HttpEmailService;
pub use mock_email::{MockEmailService, SentEmail};
