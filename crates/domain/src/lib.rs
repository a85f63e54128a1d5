//! Servicedex Domain Layer
pub mod audit;
pub mod config;
pub mod errors;
pub mod service_info;
pub mod service_name;
pub mod service_record;

pub use audit::AuditLogEntry;
pub use config::{CliOverrides, Config};
pub use errors::DomainError;
pub use service_info::{InfoSource, ServiceInfo};
pub use service_name::{normalize_service_name, ServiceName};
pub use service_record::{ServiceEntry, ServiceRecord, ServiceState, StartupType};
