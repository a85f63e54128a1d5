pub mod file_audit_log;
pub mod json_service_info_repository;

pub use file_audit_log::FileAuditLog;
pub use json_service_info_repository::JsonServiceInfoRepository;
