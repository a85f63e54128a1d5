#![allow(dead_code)]

use async_trait::async_trait;
use servicedex_application::ports::{
    AuditLogPort, MutationOutcome, Resolution, ServiceControlPort, ServiceInfoRepository,
    ServiceInfoResolver,
};
use servicedex_domain::{
    AuditLogEntry, DomainError, InfoSource, ServiceEntry, ServiceInfo, ServiceName, ServiceState,
    StartupType,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;

/// Shared, ordered record of calls across mocks.
#[derive(Clone, Default)]
pub struct CallLog {
    events: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

pub fn entry(name: &str, state: ServiceState, startup_type: StartupType) -> ServiceEntry {
    ServiceEntry::new(name, &format!("{} display", name), state, startup_type)
}

pub fn running(name: &str) -> ServiceEntry {
    entry(name, ServiceState::Running, StartupType::Automatic)
}

// ── ServiceControlPort ────────────────────────────────────────────────────────

pub struct MockServiceControl {
    entries: RwLock<Vec<ServiceEntry>>,
    enumerate_calls: AtomicUsize,
    active_enumerations: AtomicUsize,
    peak_enumerations: AtomicUsize,
    disable_calls: AtomicUsize,
    enumerate_delay: Mutex<Duration>,
    fail_enumerate: AtomicBool,
    disable_response: Mutex<Option<Result<MutationOutcome, DomainError>>>,
    call_log: CallLog,
}

impl MockServiceControl {
    pub fn new(entries: Vec<ServiceEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
            enumerate_calls: AtomicUsize::new(0),
            active_enumerations: AtomicUsize::new(0),
            peak_enumerations: AtomicUsize::new(0),
            disable_calls: AtomicUsize::new(0),
            enumerate_delay: Mutex::new(Duration::ZERO),
            fail_enumerate: AtomicBool::new(false),
            disable_response: Mutex::new(None),
            call_log: CallLog::new(),
        }
    }

    pub fn with_call_log(mut self, call_log: CallLog) -> Self {
        self.call_log = call_log;
        self
    }

    pub fn with_enumerate_delay(self, delay: Duration) -> Self {
        *self.enumerate_delay.lock().unwrap() = delay;
        self
    }

    pub async fn set_entries(&self, entries: Vec<ServiceEntry>) {
        *self.entries.write().await = entries;
    }

    pub fn set_fail_enumerate(&self, fail: bool) {
        self.fail_enumerate.store(fail, Ordering::SeqCst);
    }

    pub fn set_disable_response(&self, response: Result<MutationOutcome, DomainError>) {
        *self.disable_response.lock().unwrap() = Some(response);
    }

    pub fn enumerate_calls(&self) -> usize {
        self.enumerate_calls.load(Ordering::SeqCst)
    }

    /// Highest number of `enumerate` calls observed running at once.
    pub fn peak_enumerations(&self) -> usize {
        self.peak_enumerations.load(Ordering::SeqCst)
    }

    pub fn disable_calls(&self) -> usize {
        self.disable_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ServiceControlPort for MockServiceControl {
    async fn enumerate(&self) -> Result<Vec<ServiceEntry>, DomainError> {
        self.enumerate_calls.fetch_add(1, Ordering::SeqCst);
        let active = self.active_enumerations.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_enumerations.fetch_max(active, Ordering::SeqCst);

        let delay = *self.enumerate_delay.lock().unwrap();
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(delay).await;
        }

        let result = if self.fail_enumerate.load(Ordering::SeqCst) {
            Err(DomainError::ServiceControl(
                "Mock enumeration failed".to_string(),
            ))
        } else {
            Ok(self.entries.read().await.clone())
        };
        self.active_enumerations.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn disable(&self, name: &ServiceName) -> Result<MutationOutcome, DomainError> {
        self.disable_calls.fetch_add(1, Ordering::SeqCst);
        self.call_log.push(format!("disable:{}", name));

        if let Some(response) = self.disable_response.lock().unwrap().clone() {
            return response;
        }

        Ok(MutationOutcome::Updated(entry(
            name.as_str(),
            ServiceState::Stopped,
            StartupType::Disabled,
        )))
    }
}

// ── ServiceInfoRepository ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockServiceInfoRepository {
    infos: RwLock<HashMap<String, ServiceInfo>>,
    save_calls: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MockServiceInfoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_infos(infos: Vec<(&str, ServiceInfo)>) -> Self {
        Self {
            infos: RwLock::new(
                infos
                    .into_iter()
                    .map(|(name, info)| (name.to_string(), info))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ServiceInfoRepository for MockServiceInfoRepository {
    async fn get(&self, service_name: &str) -> Option<ServiceInfo> {
        self.infos.read().await.get(service_name).cloned()
    }

    async fn get_all(&self) -> HashMap<String, ServiceInfo> {
        self.infos.read().await.clone()
    }

    async fn save(&self, service_name: &str, info: &ServiceInfo) -> Result<(), DomainError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        self.infos
            .write()
            .await
            .insert(service_name.to_string(), info.clone());
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("Mock disk full".to_string()));
        }
        Ok(())
    }
}

// ── AuditLogPort ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockAuditLog {
    entries: Mutex<Vec<AuditLogEntry>>,
    fail: AtomicBool,
    call_log: CallLog,
}

impl MockAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_call_log(call_log: CallLog) -> Self {
        Self {
            call_log,
            ..Self::default()
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn entries(&self) -> Vec<AuditLogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditLogPort for MockAuditLog {
    async fn append(&self, entry: &AuditLogEntry) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::AuditLog("Mock audit log unwritable".to_string()));
        }
        self.call_log.push(format!("audit:{}", entry.service_name));
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

// ── ServiceInfoResolver ───────────────────────────────────────────────────────

pub struct MockResolver {
    source: InfoSource,
    response: Mutex<Result<Resolution, DomainError>>,
    calls: AtomicUsize,
    call_log: CallLog,
}

impl MockResolver {
    pub fn new(source: InfoSource, response: Result<Resolution, DomainError>) -> Self {
        Self {
            source,
            response: Mutex::new(response),
            calls: AtomicUsize::new(0),
            call_log: CallLog::new(),
        }
    }

    pub fn found(source: InfoSource, info: ServiceInfo) -> Self {
        Self::new(source, Ok(Resolution::Found(info)))
    }

    pub fn not_found(source: InfoSource) -> Self {
        Self::new(source, Ok(Resolution::NotFound))
    }

    pub fn failing(source: InfoSource) -> Self {
        Self::new(
            source,
            Err(DomainError::Transport("Mock resolver failed".to_string())),
        )
    }

    pub fn with_call_log(mut self, call_log: CallLog) -> Self {
        self.call_log = call_log;
        self
    }

    pub fn set_response(&self, response: Result<Resolution, DomainError>) {
        *self.response.lock().unwrap() = response;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ServiceInfoResolver for MockResolver {
    fn source(&self) -> InfoSource {
        self.source
    }

    async fn resolve(&self, service_name: &str) -> Result<Resolution, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.call_log
            .push(format!("resolve:{}:{}", self.source, service_name));
        self.response.lock().unwrap().clone()
    }
}
