use servicedex_domain::{
    normalize_service_name, DomainError, ServiceInfo, ServiceRecord,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, instrument};

use crate::ports::{ServiceControlPort, ServiceInfoRepository};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

type RefreshResult = Result<Vec<ServiceRecord>, DomainError>;
type InflightSender = watch::Sender<Option<RefreshResult>>;

/// The service list as of the last successful enumeration.
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    pub records: Vec<ServiceRecord>,
    pub last_updated: Instant,
    pub ttl: Duration,
}

impl CacheSnapshot {
    pub fn is_fresh(&self) -> bool {
        self.last_updated.elapsed() < self.ttl
    }
}

enum RefreshRole {
    Leader,
    Follower(watch::Receiver<Option<RefreshResult>>),
}

/// Owns the in-flight slot for one leader. Publishing empties the slot and
/// disarms the guard; a guard dropped before publishing clears the slot,
/// which wakes followers with a closed channel. The slot can only hold this
/// leader's sender until one of the two happens.
struct InflightLeaderGuard<'a> {
    slot: &'a Mutex<Option<InflightSender>>,
    published: bool,
}

impl<'a> InflightLeaderGuard<'a> {
    fn new(slot: &'a Mutex<Option<InflightSender>>) -> Self {
        Self {
            slot,
            published: false,
        }
    }

    fn publish(mut self, result: &RefreshResult) {
        let tx = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.published = true;
        if let Some(tx) = tx {
            let _ = tx.send(Some(result.clone()));
        }
    }
}

impl Drop for InflightLeaderGuard<'_> {
    fn drop(&mut self) {
        if self.published {
            return;
        }
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

/// Time-bound cache of the service list with single-flight refresh.
pub struct ServiceCache {
    control: Arc<dyn ServiceControlPort>,
    info_repo: Arc<dyn ServiceInfoRepository>,
    ttl: Duration,
    snapshot: RwLock<Option<CacheSnapshot>>,
    inflight: Mutex<Option<InflightSender>>,
}

impl ServiceCache {
    pub fn new(
        control: Arc<dyn ServiceControlPort>,
        info_repo: Arc<dyn ServiceInfoRepository>,
    ) -> Self {
        Self {
            control,
            info_repo,
            ttl: DEFAULT_CACHE_TTL,
            snapshot: RwLock::new(None),
            inflight: Mutex::new(None),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached list, refreshing it first when stale or absent.
    #[instrument(skip(self))]
    pub async fn get_services(&self) -> Result<Vec<ServiceRecord>, DomainError> {
        if let Some(snapshot) = self.snapshot.read().await.as_ref() {
            if snapshot.is_fresh() {
                debug!(count = snapshot.records.len(), "Service cache HIT");
                return Ok(snapshot.records.clone());
            }
        }

        debug!("Service cache MISS");
        self.refresh().await
    }

    /// Forces a refresh regardless of TTL. Joins a refresh already in flight.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Vec<ServiceRecord>, DomainError> {
        loop {
            match self.register_or_join_inflight() {
                RefreshRole::Leader => return self.refresh_as_leader().await,
                RefreshRole::Follower(rx) => {
                    if let Some(result) = Self::wait_for_leader(rx).await {
                        return result;
                    }
                    debug!("Refresh leader went away, retrying");
                }
            }
        }
    }

    /// Looks up one record by normalized name in the current snapshot,
    /// loading a snapshot first if none exists yet. Staleness is ignored.
    pub async fn find(&self, name: &str) -> Result<Option<ServiceRecord>, DomainError> {
        if let Some(snapshot) = self.snapshot.read().await.as_ref() {
            return Ok(snapshot.records.iter().find(|r| r.name.as_ref() == name).cloned());
        }

        let records = self.get_services().await?;
        Ok(records.into_iter().find(|r| r.name.as_ref() == name))
    }

    /// Mutates the record named `name` in place under the snapshot write
    /// lock. Returns the updated record, or `None` if it is not cached.
    pub async fn update_record<F>(&self, name: &str, mutate: F) -> Option<ServiceRecord>
    where
        F: FnOnce(&mut ServiceRecord),
    {
        let mut guard = self.snapshot.write().await;
        let record = guard
            .as_mut()?
            .records
            .iter_mut()
            .find(|r| r.name.as_ref() == name)?;
        mutate(record);
        Some(record.clone())
    }

    pub async fn snapshot(&self) -> Option<CacheSnapshot> {
        self.snapshot.read().await.clone()
    }

    fn register_or_join_inflight(&self) -> RefreshRole {
        let mut slot = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(tx) => RefreshRole::Follower(tx.subscribe()),
            None => {
                let (tx, _rx) = watch::channel(None);
                *slot = Some(tx);
                RefreshRole::Leader
            }
        }
    }

    async fn wait_for_leader(
        mut rx: watch::Receiver<Option<RefreshResult>>,
    ) -> Option<RefreshResult> {
        rx.changed().await.ok()?;
        let result = rx.borrow().clone();
        result
    }

    async fn refresh_as_leader(&self) -> RefreshResult {
        let guard = InflightLeaderGuard::new(&self.inflight);

        let result = self.load_records().await;

        if let Ok(records) = &result {
            *self.snapshot.write().await = Some(CacheSnapshot {
                records: records.clone(),
                last_updated: Instant::now(),
                ttl: self.ttl,
            });
            info!(count = records.len(), "Refreshed service cache");
        }

        guard.publish(&result);
        result
    }

    async fn load_records(&self) -> RefreshResult {
        let entries = self.control.enumerate().await?;
        let stored = self.info_repo.get_all().await;

        let mut seen = HashSet::with_capacity(entries.len());
        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            let name: Arc<str> = Arc::from(normalize_service_name(&entry.name));
            if !seen.insert(Arc::clone(&name)) {
                debug!(service = %entry.name, normalized = %name, "Skipping duplicate instance");
                continue;
            }
            let info = stored
                .get(name.as_ref())
                .cloned()
                .unwrap_or_else(ServiceInfo::not_loaded);
            records.push(ServiceRecord::from_entry(name, entry, info));
        }

        Ok(records)
    }
}
