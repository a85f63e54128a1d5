#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use servicedex_api::{create_api_routes, AppState};
use servicedex_application::ports::{
    AuditLogPort, MutationOutcome, Resolution, ServiceControlPort, ServiceInfoRepository,
    ServiceInfoResolver,
};
use servicedex_application::services::{NameLocks, ServiceCache};
use servicedex_application::use_cases::{
    DisableServiceUseCase, EnrichServiceInfoUseCase, GetServiceInfoUseCase, GetServicesUseCase,
    RefreshServicesUseCase,
};
use servicedex_domain::{
    AuditLogEntry, DomainError, InfoSource, ServiceEntry, ServiceInfo, ServiceName, ServiceState,
    StartupType,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

pub struct FakeServiceManager {
    entries: Vec<ServiceEntry>,
    pub fail_enumerate: AtomicBool,
    pub rejection: Mutex<Option<String>>,
    pub disable_calls: AtomicUsize,
}

#[async_trait]
impl ServiceControlPort for FakeServiceManager {
    async fn enumerate(&self) -> Result<Vec<ServiceEntry>, DomainError> {
        if self.fail_enumerate.load(Ordering::SeqCst) {
            return Err(DomainError::ServiceControl("access denied".to_string()));
        }
        Ok(self.entries.clone())
    }

    async fn disable(&self, name: &ServiceName) -> Result<MutationOutcome, DomainError> {
        self.disable_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.rejection.lock().unwrap().clone() {
            return Ok(MutationOutcome::Rejected(message));
        }
        let display = self
            .entries
            .iter()
            .find(|e| e.name.as_ref() == name.as_str())
            .map(|e| e.display_name.to_string())
            .unwrap_or_default();
        Ok(MutationOutcome::Updated(ServiceEntry::new(
            name.as_str(),
            &display,
            ServiceState::Stopped,
            StartupType::Disabled,
        )))
    }
}

#[derive(Default)]
pub struct InMemoryInfoStore {
    infos: RwLock<HashMap<String, ServiceInfo>>,
}

#[async_trait]
impl ServiceInfoRepository for InMemoryInfoStore {
    async fn get(&self, service_name: &str) -> Option<ServiceInfo> {
        self.infos.read().await.get(service_name).cloned()
    }

    async fn get_all(&self) -> HashMap<String, ServiceInfo> {
        self.infos.read().await.clone()
    }

    async fn save(&self, service_name: &str, info: &ServiceInfo) -> Result<(), DomainError> {
        self.infos
            .write()
            .await
            .insert(service_name.to_string(), info.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingAuditLog {
    pub entries: Mutex<Vec<String>>,
}

#[async_trait]
impl AuditLogPort for RecordingAuditLog {
    async fn append(&self, entry: &AuditLogEntry) -> Result<(), DomainError> {
        self.entries
            .lock()
            .unwrap()
            .push(entry.service_name.to_string());
        Ok(())
    }
}

/// Knows only the services listed in `known`.
pub struct TableResolver {
    known: HashMap<&'static str, ServiceInfo>,
}

#[async_trait]
impl ServiceInfoResolver for TableResolver {
    fn source(&self) -> InfoSource {
        InfoSource::Scraped
    }

    async fn resolve(&self, service_name: &str) -> Result<Resolution, DomainError> {
        Ok(self
            .known
            .get(service_name)
            .cloned()
            .map(Resolution::Found)
            .unwrap_or(Resolution::NotFound))
    }
}

pub struct TestApp {
    pub router: Router,
    pub manager: Arc<FakeServiceManager>,
    pub store: Arc<InMemoryInfoStore>,
    pub audit: Arc<RecordingAuditLog>,
}

pub fn spooler_info() -> ServiceInfo {
    ServiceInfo::new(
        "Print Spooler",
        "Loads files to memory for later printing",
        "Keep if you print",
        InfoSource::None,
    )
}

pub fn create_test_app() -> TestApp {
    let manager = Arc::new(FakeServiceManager {
        entries: vec![
            ServiceEntry::new(
                "Spooler",
                "Print Spooler",
                ServiceState::Running,
                StartupType::Automatic,
            ),
            ServiceEntry::new(
                "CDPUserSvc_4a1b2",
                "Connected Devices Platform User Service",
                ServiceState::Running,
                StartupType::Automatic,
            ),
        ],
        fail_enumerate: AtomicBool::new(false),
        rejection: Mutex::new(None),
        disable_calls: AtomicUsize::new(0),
    });
    let store = Arc::new(InMemoryInfoStore::default());
    let audit = Arc::new(RecordingAuditLog::default());
    let resolver: Arc<dyn ServiceInfoResolver> = Arc::new(TableResolver {
        known: HashMap::from([("Spooler", spooler_info())]),
    });

    let cache = Arc::new(ServiceCache::new(manager.clone(), store.clone()));
    let locks = Arc::new(NameLocks::new());

    let state = AppState {
        get_services: Arc::new(GetServicesUseCase::new(cache.clone())),
        refresh_services: Arc::new(RefreshServicesUseCase::new(cache.clone())),
        get_service_info: Arc::new(GetServiceInfoUseCase::new(store.clone())),
        enrich_service_info: Arc::new(EnrichServiceInfoUseCase::new(
            vec![resolver],
            store.clone(),
            cache.clone(),
            locks.clone(),
        )),
        disable_service: Arc::new(DisableServiceUseCase::new(
            manager.clone(),
            audit.clone(),
            cache,
            locks,
        )),
    };

    TestApp {
        router: create_api_routes(state),
        manager,
        store,
        audit,
    }
}
