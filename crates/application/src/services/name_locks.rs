use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-service-name async locks serialising the reconcile phase of
/// enrichment and disable calls that target the same service.
///
/// An entry lives only while someone holds or waits on it.
#[derive(Default)]
pub struct NameLocks {
    locks: DashMap<Arc<str>, Arc<Mutex<()>>>,
}

/// Held for the duration of one reconcile. Dropping it releases the lock and
/// evicts the entry when no other caller is holding or waiting on it.
pub struct NameLockGuard<'a> {
    locks: &'a DashMap<Arc<str>, Arc<Mutex<()>>>,
    name: Arc<str>,
    _guard: OwnedMutexGuard<()>,
}

impl NameLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, name: &str) -> NameLockGuard<'_> {
        let name: Arc<str> = Arc::from(name);
        let mutex = self
            .locks
            .entry(Arc::clone(&name))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        NameLockGuard {
            locks: &self.locks,
            name,
            _guard: mutex.lock_owned().await,
        }
    }
}

impl Drop for NameLockGuard<'_> {
    fn drop(&mut self) {
        // One reference in the map, one inside this guard.
        self.locks
            .remove_if(&self.name, |_, mutex| Arc::strong_count(mutex) == 2);
    }
}
