//! Per-key async locks serializing same-identity read-modify-write.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Map of per-identity mutexes.
///
/// Operations for different identities proceed fully independently;
/// operations for the same identity serialize on that identity's mutex, so
/// two concurrent generate calls for one account cannot both read
/// `attempts = 2` and both write `attempts = 3`. Lock entries are created
/// on first use and kept for the life of the process.
#[derive(Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `key`, creating it if absent.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(locks.entry(key.to_string()).or_default())
        };
        lock.lock_owned().await
    }
}
