use async_trait::async_trait;
use servicedex_application::ports::ServiceInfoRepository;
use servicedex_domain::{DomainError, ServiceInfo};
use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Metadata store backed by a single pretty-printed JSON file.
///
/// The file is read once at startup and rewritten in full on every save.
/// Writes happen under the map's write lock so two saves never interleave
/// on disk.
pub struct JsonServiceInfoRepository {
    path: PathBuf,
    infos: RwLock<HashMap<String, ServiceInfo>>,
}

impl JsonServiceInfoRepository {
    /// Loads the store from `path`. A missing or unreadable file yields an
    /// empty store.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let infos = match fs::read_to_string(&path).await {
            Ok(contents) => match serde_json::from_str::<HashMap<String, ServiceInfo>>(&contents) {
                Ok(infos) => {
                    info!(path = %path.display(), count = infos.len(), "Loaded service metadata");
                    infos
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Service metadata file is malformed, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "No service metadata file yet, starting empty");
                HashMap::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read service metadata, starting empty");
                HashMap::new()
            }
        };

        Self {
            path,
            infos: RwLock::new(infos),
        }
    }

    async fn write_file(&self, infos: &HashMap<String, ServiceInfo>) -> Result<(), DomainError> {
        let ordered: BTreeMap<&String, &ServiceInfo> = infos.iter().collect();
        let json = serde_json::to_string_pretty(&ordered)
            .map_err(|e| DomainError::Persistence(format!("Failed to serialize metadata: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::Persistence(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        fs::write(&self.path, json).await.map_err(|e| {
            DomainError::Persistence(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl ServiceInfoRepository for JsonServiceInfoRepository {
    async fn get(&self, service_name: &str) -> Option<ServiceInfo> {
        self.infos.read().await.get(service_name).cloned()
    }

    async fn get_all(&self) -> HashMap<String, ServiceInfo> {
        self.infos.read().await.clone()
    }

    async fn save(&self, service_name: &str, info: &ServiceInfo) -> Result<(), DomainError> {
        let mut infos = self.infos.write().await;
        infos.insert(service_name.to_string(), info.clone());
        self.write_file(&infos).await?;
        debug!(service = %service_name, path = %self.path.display(), "Saved service metadata");
        Ok(())
    }
}
