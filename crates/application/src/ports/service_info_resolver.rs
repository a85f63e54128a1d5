use async_trait::async_trait;
use servicedex_domain::{DomainError, InfoSource, ServiceInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ServiceInfo),
    NotFound,
}

/// One strategy for producing descriptive metadata for a service.
#[async_trait]
pub trait ServiceInfoResolver: Send + Sync {
    /// Tag stamped on every result this resolver produces.
    fn source(&self) -> InfoSource;

    async fn resolve(&self, service_name: &str) -> Result<Resolution, DomainError>;
}
