//! Tests for the OTP engine.

#[cfg(test)]
mod mocks;
