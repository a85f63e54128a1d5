use async_trait::async_trait;
use servicedex_domain::{AuditLogEntry, DomainError};

/// Append-only sink for disable actions.
#[async_trait]
pub trait AuditLogPort: Send + Sync {
    async fn append(&self, entry: &AuditLogEntry) -> Result<(), DomainError>;
}
