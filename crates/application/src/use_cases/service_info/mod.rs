mod enrich_service_info;
mod get_service_info;

pub use enrich_service_info::EnrichServiceInfoUseCase;
pub use get_service_info::GetServiceInfoUseCase;
