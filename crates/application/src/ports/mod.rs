mod audit_log;
mod service_control;
mod service_info_repository;
mod service_info_resolver;

pub use audit_log::AuditLogPort;
pub use service_control::{MutationOutcome, ServiceControlPort};
pub use service_info_repository::ServiceInfoRepository;
pub use service_info_resolver::{Resolution, ServiceInfoResolver};
