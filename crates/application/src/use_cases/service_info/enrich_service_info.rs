use servicedex_domain::{normalize_service_name, ServiceInfo};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::ports::{Resolution, ServiceInfoRepository, ServiceInfoResolver};
use crate::services::{NameLocks, ServiceCache};

/// Resolves descriptive metadata for one service through an ordered chain
/// of resolvers, falling back to a synthesized description, and persists
/// whatever it ends up with. Never fails.
pub struct EnrichServiceInfoUseCase {
    resolvers: Vec<Arc<dyn ServiceInfoResolver>>,
    info_repo: Arc<dyn ServiceInfoRepository>,
    cache: Arc<ServiceCache>,
    locks: Arc<NameLocks>,
}

impl EnrichServiceInfoUseCase {
    pub fn new(
        resolvers: Vec<Arc<dyn ServiceInfoResolver>>,
        info_repo: Arc<dyn ServiceInfoRepository>,
        cache: Arc<ServiceCache>,
        locks: Arc<NameLocks>,
    ) -> Self {
        Self {
            resolvers,
            info_repo,
            cache,
            locks,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, service_name: &str) -> ServiceInfo {
        let name = normalize_service_name(service_name.trim());
        let info = self.resolve(name).await;
        self.persist(name, info).await
    }

    async fn resolve(&self, name: &str) -> ServiceInfo {
        for resolver in &self.resolvers {
            let source = resolver.source();
            match resolver.resolve(name).await {
                Ok(Resolution::Found(mut info)) => {
                    info.source = source;
                    info!(service = %name, source = %source, "Fetched service info");
                    return info;
                }
                Ok(Resolution::NotFound) => {
                    debug!(service = %name, source = %source, "Resolver found nothing");
                }
                Err(e) => {
                    warn!(service = %name, source = %source, error = %e, "Resolver failed");
                }
            }
        }

        warn!(service = %name, "Using fallback info");
        ServiceInfo::fallback(name)
    }

    async fn persist(&self, name: &str, info: ServiceInfo) -> ServiceInfo {
        let _guard = self.locks.lock(name).await;

        if let Err(e) = self.info_repo.save(name, &info).await {
            error!(service = %name, error = %e, "Failed to persist service info");
        }

        let cached = self
            .cache
            .update_record(name, |record| record.info = info.clone())
            .await;
        if cached.is_none() {
            debug!(service = %name, "No cached record to update");
        }

        info
    }
}
