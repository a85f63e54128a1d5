use servicedex_domain::{DomainError, ServiceRecord};
use std::sync::Arc;
use tracing::instrument;

use crate::services::ServiceCache;

pub struct GetServicesUseCase {
    cache: Arc<ServiceCache>,
}

impl GetServicesUseCase {
    pub fn new(cache: Arc<ServiceCache>) -> Self {
        Self { cache }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<Vec<ServiceRecord>, DomainError> {
        self.cache.get_services().await
    }
}
