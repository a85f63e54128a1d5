mod disable_service;
mod get_services;
mod refresh_services;

pub use disable_service::DisableServiceUseCase;
pub use get_services::GetServicesUseCase;
pub use refresh_services::{RefreshOutcome, RefreshServicesUseCase};
