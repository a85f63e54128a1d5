use servicedex_application::use_cases::{
    DisableServiceUseCase, EnrichServiceInfoUseCase, GetServiceInfoUseCase, GetServicesUseCase,
    RefreshServicesUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub get_services: Arc<GetServicesUseCase>,
    pub refresh_services: Arc<RefreshServicesUseCase>,
    pub get_service_info: Arc<GetServiceInfoUseCase>,
    pub enrich_service_info: Arc<EnrichServiceInfoUseCase>,
    pub disable_service: Arc<DisableServiceUseCase>,
}
