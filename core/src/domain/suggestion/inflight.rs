use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::suggestion::value_objects::CacheKey;

type Slots = Arc<Mutex<HashMap<CacheKey, Arc<AsyncMutex<()>>>>>;

/// Per-key serialisation of suggestion generation inside one process.
///
/// Callers that hold the guard for a key run alone; the others wait and then
/// re-check the cache, so concurrent misses for the same key generate once.
#[derive(Clone, Default)]
pub struct InFlight {
    slots: Slots,
}

pub struct InFlightGuard {
    // Field order matters: the lock is released before the slot is reclaimed.
    _guard: OwnedMutexGuard<()>,
    _slot: SlotRelease,
}

/// Drops the key's slot once nobody holds or waits on it. Lives for the whole
/// of `acquire`, so a caller cancelled while queued cleans up too.
struct SlotRelease {
    key: CacheKey,
    slots: Slots,
}

impl InFlight {
    pub async fn acquire(&self, key: &CacheKey) -> InFlightGuard {
        let release = SlotRelease {
            key: key.clone(),
            slots: self.slots.clone(),
        };

        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            slots
                .entry(key.clone())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        let guard = slot.lock_owned().await;

        InFlightGuard {
            _guard: guard,
            _slot: release,
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked_keys(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Drop for SlotRelease {
    fn drop(&mut self) {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        // Only the map still references the slot.
        if slots
            .get(&self.key)
            .is_some_and(|slot| Arc::strong_count(slot) == 1)
        {
            slots.remove(&self.key);
        }
    }
}
