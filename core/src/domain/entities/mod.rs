//! Domain entities.

mod attempt;
mod otp_record;
mod registration;

pub use attempt::AttemptRecord;
pub use otp_record::{OtpRecord, CODE_LENGTH};
pub use registration::{PendingRegistration, RegistrationOtpEntry, RegistrationOtpState};
