pub mod service_info;
pub mod services;

// Re-export use cases
pub use service_info::{EnrichServiceInfoUseCase, GetServiceInfoUseCase};
pub use services::{
    DisableServiceUseCase, GetServicesUseCase, RefreshOutcome, RefreshServicesUseCase,
};
