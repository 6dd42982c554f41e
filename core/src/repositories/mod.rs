//! Repository traits decoupling the engine from storage and directory
//! lookups.
//!
//! Every store is a keyed get/put/delete capability so an in-process map,
//! Redis, or a database can sit behind the same engine logic. The stores
//! only need individually atomic operations; read-modify-write sequences
//! are serialized by the engine's per-key locks.

mod account;
mod attempt_store;
mod otp_store;
mod registration_cache;

pub use account::AccountDirectory;
pub use attempt_store::AttemptStore;
pub use otp_store::OtpStore;
pub use registration_cache::RegistrationOtpCache;
