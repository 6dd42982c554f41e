//! Time source abstraction.
//!
//! Every expiry and rate-limit window in the engine is derived from a
//! single injected clock, so tests can advance time without sleeping and a
//! deployment has exactly one authoritative time source.

use chrono::{DateTime, Utc};

/// Supplies the engine's notion of "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
