use async_trait::async_trait;
use servicedex_domain::{DomainError, ServiceEntry, ServiceName};

/// Result of a state mutation the collaborator completed without a
/// transport-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The service's new tuple after the mutation.
    Updated(ServiceEntry),
    /// The collaborator reported an inline error.
    Rejected(String),
}

/// Narrow contract over the operating system's service manager.
#[async_trait]
pub trait ServiceControlPort: Send + Sync {
    async fn enumerate(&self) -> Result<Vec<ServiceEntry>, DomainError>;

    /// Stops the service and sets its startup type to disabled.
    async fn disable(&self, name: &ServiceName) -> Result<MutationOutcome, DomainError>;
}
