//! Per-key serialisation of cache pipelines.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Weak};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Hands out one async lock per key.
///
/// Holders of the same key run one after another; different keys never
/// block each other. Entries are dropped once no guard for them is alive.
pub struct KeyedLocks<K> {
    locks: Mutex<HashMap<K, Weak<Mutex<()>>>>,
}

impl<K: Eq + Hash + Clone> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn lock(&self, key: K) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.retain(|_, weak| weak.strong_count() > 0);

            if let Some(existing) = locks.get(&key).and_then(Weak::upgrade) {
                existing
            } else {
                let created = Arc::new(Mutex::new(()));
                locks.insert(key, Arc::downgrade(&created));
                created
            }
        };

        lock.lock_owned().await
    }

    /// Number of keys with a live guard or waiter.
    pub async fn active(&self) -> usize {
        self.locks
            .lock()
            .await
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}
