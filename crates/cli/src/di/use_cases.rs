use super::Adapters;
use servicedex_application::services::{NameLocks, ServiceCache};
use servicedex_application::use_cases::{
    DisableServiceUseCase, EnrichServiceInfoUseCase, GetServiceInfoUseCase, GetServicesUseCase,
    RefreshServicesUseCase,
};
use servicedex_domain::Config;
use std::sync::Arc;

pub struct UseCases {
    pub get_services: Arc<GetServicesUseCase>,
    pub refresh_services: Arc<RefreshServicesUseCase>,
    pub get_service_info: Arc<GetServiceInfoUseCase>,
    pub enrich_service_info: Arc<EnrichServiceInfoUseCase>,
    pub disable_service: Arc<DisableServiceUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, adapters: &Adapters) -> Self {
        let cache = Arc::new(
            ServiceCache::new(adapters.service_control.clone(), adapters.info_repo.clone())
                .with_ttl(config.cache.ttl()),
        );
        let locks = Arc::new(NameLocks::new());

        Self {
            get_services: Arc::new(GetServicesUseCase::new(cache.clone())),
            refresh_services: Arc::new(RefreshServicesUseCase::new(cache.clone())),
            get_service_info: Arc::new(GetServiceInfoUseCase::new(adapters.info_repo.clone())),
            enrich_service_info: Arc::new(EnrichServiceInfoUseCase::new(
                adapters.resolvers.clone(),
                adapters.info_repo.clone(),
                cache.clone(),
                locks.clone(),
            )),
            disable_service: Arc::new(DisableServiceUseCase::new(
                adapters.service_control.clone(),
                adapters.audit_log.clone(),
                cache,
                locks,
            )),
        }
    }
}
