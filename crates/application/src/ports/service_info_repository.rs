use async_trait::async_trait;
use servicedex_domain::{DomainError, ServiceInfo};
use std::collections::HashMap;

/// Durable mapping from normalized service name to its metadata.
#[async_trait]
pub trait ServiceInfoRepository: Send + Sync {
    async fn get(&self, service_name: &str) -> Option<ServiceInfo>;

    async fn get_all(&self) -> HashMap<String, ServiceInfo>;

    /// Replaces the entry for `service_name` and writes the whole mapping back.
    ///
    /// The in-memory entry is replaced even when the write fails.
    async fn save(&self, service_name: &str, info: &ServiceInfo) -> Result<(), DomainError>;
}
