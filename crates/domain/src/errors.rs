use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid service name: {0}")]
    InvalidServiceName(String),

    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Service control error: {0}")]
    ServiceControl(String),

    #[error("Failed to parse collaborator output: {0}")]
    Parse(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Audit log error: {0}")]
    AuditLog(String),
}
