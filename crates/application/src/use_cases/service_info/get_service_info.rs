use servicedex_domain::ServiceInfo;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use crate::ports::ServiceInfoRepository;

pub struct GetServiceInfoUseCase {
    repo: Arc<dyn ServiceInfoRepository>,
}

impl GetServiceInfoUseCase {
    pub fn new(repo: Arc<dyn ServiceInfoRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> HashMap<String, ServiceInfo> {
        self.repo.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, service_name: &str) -> Option<ServiceInfo> {
        self.repo.get(service_name).await
    }
}
